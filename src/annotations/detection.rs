use crate::annotations::bounding_box::BoundingBoxGeometry;

/// A detection is what is produced as output from an object detection model.
///
/// A detection is any annotation combined with a confidence score: a probability value that
/// encodes the model's belief that the detection is true.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection<T: BoundingBoxGeometry> {
    pub annotation: T,
    pub confidence: f64,
}

/// Every detection the model produced for a single video frame, in model output order.
///
/// An empty record is a normal frame in which the subject was not found.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionRecord<T: BoundingBoxGeometry> {
    detections: Vec<Detection<T>>,
}

impl<T: BoundingBoxGeometry> DetectionRecord<T> {
    pub fn new(detections: Vec<Detection<T>>) -> Self {
        DetectionRecord { detections }
    }

    pub fn empty() -> Self {
        DetectionRecord { detections: Vec::new() }
    }

    pub fn has_detection(&self) -> bool {
        !self.detections.is_empty()
    }

    /// The model emits its primary detection first, so selection is positional.
    pub fn primary(&self) -> Option<&Detection<T>> {
        self.detections.first()
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }
}
