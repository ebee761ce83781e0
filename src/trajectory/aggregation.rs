use crate::trajectory::centers::Trajectory;

/// Concatenates trajectories in the order given, keeping each one's internal order.
///
/// No deduplication or resampling happens: the result has exactly the sum of the input lengths.
pub fn aggregate(trajectories: &[Trajectory]) -> Trajectory {
    let total = trajectories.iter().map(Trajectory::len).sum();
    let mut points = Vec::with_capacity(total);
    for trajectory in trajectories {
        points.extend_from_slice(trajectory.points());
    }
    Trajectory::new(points)
}

/// A group of recordings sharing a label, plotted together.
#[derive(Clone, Debug, Default)]
pub struct Cohort {
    pub label: String,
    trajectories: Vec<Trajectory>,
}

impl Cohort {
    pub fn new(label: impl Into<String>) -> Self {
        Cohort {
            label: label.into(),
            trajectories: Vec::new(),
        }
    }

    pub fn add(&mut self, trajectory: Trajectory) {
        self.trajectories.push(trajectory);
    }

    pub fn recording_count(&self) -> usize {
        self.trajectories.len()
    }

    pub fn combined(&self) -> Trajectory {
        aggregate(&self.trajectories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::point::Point;

    fn line(from: i32, to: i32) -> Trajectory {
        (from..to)
            .map(|i| Point { x: i as f64, y: -(i as f64) })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn aggregate_preserves_order_test() {
        let first = line(0, 3);
        let second = line(10, 12);
        let combined = aggregate(&[first.clone(), second.clone()]);
        assert_eq!(combined.len(), first.len() + second.len());
        assert_eq!(&combined.points()[..3], first.points());
        assert_eq!(&combined.points()[3..], second.points());
    }

    #[test]
    fn aggregate_keeps_duplicates_and_empties() {
        let same = line(0, 2);
        let combined = aggregate(&[same.clone(), Trajectory::default(), same.clone()]);
        assert_eq!(combined.len(), 4);
        assert_eq!(combined.points()[0], combined.points()[2]);
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn cohort_combines_recordings() {
        let mut cohort = Cohort::new("low_anxiety");
        cohort.add(line(0, 5));
        assert_eq!(cohort.combined(), line(0, 5));
        cohort.add(line(5, 8));
        assert_eq!(cohort.recording_count(), 2);
        assert_eq!(cohort.combined(), line(0, 8));
    }
}
