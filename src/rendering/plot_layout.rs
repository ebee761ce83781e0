use crate::annotations::point::Point;
use ndarray::{ArrayView2, Axis};

/// Fraction of the data range added on each side of the axes.
const DATA_MARGIN: f64 = 0.05;

/// Position of the axes box as fractions of the figure (left, bottom, right, top).
const AXES_BOX: (f64, f64, f64, f64) = (0.125, 0.11, 0.9, 0.88);

/// Axis-aligned data limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataBounds {
    /// Limits covering every row of an `(n, 2)` point array plus the reference landmark.
    pub fn covering(points: ArrayView2<f64>, reference: Point) -> Self {
        let column_range = |axis: usize, seed: f64| {
            points
                .index_axis(Axis(1), axis)
                .fold((seed, seed), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        };
        let (x_min, x_max) = column_range(0, reference.x);
        let (y_min, y_max) = column_range(1, reference.y);
        DataBounds { x_min, x_max, y_min, y_max }
    }

    /// Pads each axis by a fraction of its span. Zero spans are widened by one unit per side.
    pub fn with_margin(self, fraction: f64) -> Self {
        let pad = |lo: f64, hi: f64| {
            let span = hi - lo;
            if span > 0.0 {
                (lo - span * fraction, hi + span * fraction)
            } else {
                (lo - 1.0, hi + 1.0)
            }
        };
        let (x_min, x_max) = pad(self.x_min, self.x_max);
        let (y_min, y_max) = pad(self.y_min, self.y_max);
        DataBounds { x_min, x_max, y_min, y_max }
    }
}

/// A rectangle in figure units, origin at the bottom-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureRect {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl FigureRect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.bottom + self.top) / 2.0
    }
}

/// Maps data coordinates onto a figure measured in points, with the y axis pointing up.
///
/// Both backends share this layout: the PDF uses it directly, the PNG scales it by dpi / 72 and
/// flips the vertical axis.
#[derive(Clone, Debug, PartialEq)]
pub struct FigureLayout {
    pub width: f64,
    pub height: f64,
    pub axes: FigureRect,
    pub bounds: DataBounds,
}

impl FigureLayout {
    pub fn new(width: f64, height: f64, points: ArrayView2<f64>, reference: Point) -> Self {
        let (left, bottom, right, top) = AXES_BOX;
        FigureLayout {
            width,
            height,
            axes: FigureRect {
                left: left * width,
                bottom: bottom * height,
                right: right * width,
                top: top * height,
            },
            bounds: DataBounds::covering(points, reference).with_margin(DATA_MARGIN),
        }
    }

    pub fn to_figure(&self, point: Point) -> (f64, f64) {
        let b = &self.bounds;
        let fx = (point.x - b.x_min) / (b.x_max - b.x_min);
        let fy = (point.y - b.y_min) / (b.y_max - b.y_min);
        (
            self.axes.left + fx * self.axes.width(),
            self.axes.bottom + fy * self.axes.height(),
        )
    }
}
