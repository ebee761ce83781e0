use crate::annotations::bounding_box::BoundingBoxGeometry;
use crate::annotations::detection::DetectionRecord;
use crate::trajectory::centers::{EmptyFrameSet, Trajectory};
use itertools::Itertools;
use std::ops::Range;
use tracing::{debug, info, warn};

/// Fraction of frames dropped from each end of a recording (calibration and teardown).
pub const TRIM_FRACTION: f64 = 0.05;

/// The range of frames kept after trimming a recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrimWindow {
    pub start: usize,
    pub end: usize,
}

impl TrimWindow {
    /// `[trunc(n * 0.05), trunc(n * 0.95))`, computed in f64 so boundaries match the recorded
    /// figures exactly.
    pub fn for_frame_count(frame_count: usize) -> Self {
        let n = frame_count as f64;
        let start = (n * TRIM_FRACTION) as usize;
        let end = (n * (1.0 - TRIM_FRACTION)) as usize;
        TrimWindow { start, end: end.max(start) }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Output of running the extractor over one recording.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryExtraction {
    pub trajectory: Trajectory,
    pub empty_frames: EmptyFrameSet,
    pub window: TrimWindow,
}

impl TrajectoryExtraction {
    /// Percentage of trimmed frames with no detection. `None` when trimming left no frames.
    pub fn empty_percentage(&self) -> Option<f64> {
        if self.window.is_empty() {
            None
        } else {
            Some(self.empty_frames.len() as f64 / self.window.len() as f64 * 100.0)
        }
    }
}

/// Reduces per-frame detections to a trajectory of box centers.
///
/// The first and last 5% of frames are dropped. In every remaining frame the first box is
/// selected and its center emitted; frames without boxes are recorded in the empty frame set
/// (indexed within the trimmed range) and contribute no point.
pub fn extract<T: BoundingBoxGeometry>(records: &[DetectionRecord<T>]) -> TrajectoryExtraction {
    let window = TrimWindow::for_frame_count(records.len());
    debug!(
        "Trimming {} frames to [{}, {})",
        records.len(),
        window.start,
        window.end
    );

    let mut points = Vec::with_capacity(window.len());
    let mut empty_frames = EmptyFrameSet::default();
    let mut crowded_frames = 0;
    for (frame, record) in records[window.range()].iter().enumerate() {
        if !record.has_detection() {
            empty_frames.push(frame);
            continue;
        }
        if record.len() > 1 {
            crowded_frames += 1;
        }
        if let Some(detection) = record.primary() {
            points.push(detection.annotation.center());
        }
    }
    if crowded_frames > 0 {
        debug!("{} frames had more than one box, the first was used", crowded_frames);
    }
    if !empty_frames.is_empty() {
        debug!("Frames without detection: {}", empty_frames.iter().join(", "));
    }

    let extraction = TrajectoryExtraction {
        trajectory: Trajectory::new(points),
        empty_frames,
        window,
    };
    // An empty frame means the subject was near a wall, where the detector loses it.
    match extraction.empty_percentage() {
        Some(percentage) => info!(
            empty_frames = extraction.empty_frames.len(),
            "Subject was close to the wall for {:.2}% of the time",
            percentage
        ),
        None => info!(empty_frames = 0, "No frames left after trimming, wall time n/a"),
    }
    if extraction.trajectory.is_empty() {
        warn!("Extracted trajectory is empty");
    }
    extraction
}
