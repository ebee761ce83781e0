use crate::annotations::point::Point;
use ndarray::Array2;

/// The ordered center points selected from a recording's frames.
///
/// Frames without a detection contribute no point, so a trajectory can be shorter than the
/// number of frames it was extracted from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<Point>,
}

impl Trajectory {
    pub fn new(points: Vec<Point>) -> Self {
        Trajectory { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The trajectory as an `(n, 2)` array of `[x, y]` rows.
    pub fn to_array(&self) -> Array2<f64> {
        let mut array = Array2::zeros((self.points.len(), 2));
        for (mut row, point) in array.rows_mut().into_iter().zip(&self.points) {
            row[0] = point.x;
            row[1] = point.y;
        }
        array
    }
}

impl From<Vec<Point>> for Trajectory {
    fn from(points: Vec<Point>) -> Self {
        Trajectory::new(points)
    }
}

/// Indices, relative to the trimmed frame range, of frames with no detection. Ascending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmptyFrameSet {
    frames: Vec<usize>,
}

impl EmptyFrameSet {
    pub(crate) fn push(&mut self, frame: usize) {
        debug_assert!(self.frames.last().is_none_or(|&last| last < frame));
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_array_test() {
        let trajectory = Trajectory::new(vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }]);
        let array = trajectory.to_array();
        assert_eq!(array.shape(), &[2, 2]);
        assert_eq!(array[[0, 0]], 1.0);
        assert_eq!(array[[0, 1]], 2.0);
        assert_eq!(array[[1, 0]], 3.0);
        assert_eq!(array[[1, 1]], 4.0);
        assert_eq!(Trajectory::default().to_array().shape(), &[0, 2]);
    }

    #[test]
    fn empty_frame_set_test() {
        let mut empties = EmptyFrameSet::default();
        empties.push(2);
        empties.push(5);
        empties.push(7);
        assert_eq!(empties.len(), 3);
        assert!(!empties.is_empty());
        assert_eq!(empties.iter().collect::<Vec<_>>(), vec![2, 5, 7]);
    }
}
