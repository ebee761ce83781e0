use crate::annotations::point::Point;

/// A struct representing a bounding box.
///
/// A bounding box is the rectangle a detection model places around the tracked subject in a
/// single frame. The detector's raw output rows are `[x1, y1, x2, y2, score]`; the score lives in
/// the surrounding `Detection`, the rectangle lives here.
///
/// This project uses the standard convention of the left side of the image being x=0 and the top
/// of the image being y=0.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl BoundingBox {
    /// Checks if a box has valid parameters before constructing.
    ///
    /// Degenerate boxes (zero width or height) are valid, only inverted ones are rejected.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, String> {
        if left > right {
            Err(format!(
                "Failed to create BoundingBox, value for left > value for right ({} > {}).",
                left, right
            ))
        } else if top > bottom {
            Err(format!(
                "Failed to create BoundingBox, value for top > value for bottom ({} > {}).",
                top, bottom
            ))
        } else {
            Ok(BoundingBox { left, top, right, bottom })
        }
    }
}

/// Geometry shared by every annotation that wraps a rectangle.
pub trait BoundingBoxGeometry {
    fn left(&self) -> f64;
    fn top(&self) -> f64;
    fn right(&self) -> f64;
    fn bottom(&self) -> f64;

    /// Center of mass of the rectangle, `((x1 + x2) / 2, (y1 + y2) / 2)`.
    fn center(&self) -> Point {
        Point {
            x: (self.left() + self.right()) / 2.0,
            y: (self.top() + self.bottom()) / 2.0,
        }
    }
}

impl BoundingBoxGeometry for BoundingBox {
    fn left(&self) -> f64 {
        self.left
    }

    fn top(&self) -> f64 {
        self.top
    }

    fn right(&self) -> f64 {
        self.right
    }

    fn bottom(&self) -> f64 {
        self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_box_test() {
        let bbox = BoundingBox::new(10.0, 20.0, 30.0, 40.0).unwrap();
        assert_eq!(bbox.center(), Point { x: 20.0, y: 30.0 });
        assert_eq!((bbox.left(), bbox.top(), bbox.right(), bbox.bottom()), (10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn degenerate_box_still_has_center() {
        let bbox = BoundingBox::new(5.0, 7.0, 5.0, 7.0).unwrap();
        assert_eq!(bbox.center(), Point { x: 5.0, y: 7.0 });
    }

    #[test]
    fn inverted_box_is_rejected() {
        assert!(BoundingBox::new(3.0, 0.0, 1.0, 1.0).is_err());
        assert!(BoundingBox::new(0.0, 3.0, 1.0, 1.0).is_err());
    }
}
