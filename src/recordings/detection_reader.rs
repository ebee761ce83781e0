use crate::annotations::bounding_box::BoundingBox;
use crate::annotations::detection::{Detection, DetectionRecord};
use crate::error::{Result, TrajectoryError};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Extension of the per-recording detection dumps.
pub const DETECTION_FILE_EXTENSION: &str = "json";

/// Reads one recording's per-frame detections from a json file.
///
/// The document is an array of frames (optionally wrapped as `{"frames": [...]}`). Each frame is
/// an array of boxes, each box either `[x1, y1, x2, y2, score]` or an object with those keys.
pub fn read_detection_records(filepath: &Path) -> Result<Vec<DetectionRecord<BoundingBox>>> {
    let file = File::open(filepath).map_err(|e| TrajectoryError::io(filepath, e))?;
    let reader = BufReader::new(file);
    let document: Value = serde_json::from_reader(reader).map_err(|source| TrajectoryError::Json {
        path: filepath.to_path_buf(),
        source,
    })?;
    let records = parse_detection_records(&document)?;
    debug!("Read {} frames from {}", records.len(), filepath.display());
    Ok(records)
}

/// Converts a parsed json document into detection records.
pub fn parse_detection_records(document: &Value) -> Result<Vec<DetectionRecord<BoundingBox>>> {
    let frames = match document {
        Value::Array(frames) => frames,
        Value::Object(map) => match map.get("frames") {
            Some(Value::Array(frames)) => frames,
            _ => {
                return Err(TrajectoryError::MalformedFrame {
                    frame: 0,
                    reason: "expected a top-level array of frames or a \"frames\" array".to_string(),
                });
            }
        },
        other => {
            return Err(TrajectoryError::MalformedFrame {
                frame: 0,
                reason: format!("expected a top-level array of frames, found {}", kind_of(other)),
            });
        }
    };
    frames
        .iter()
        .enumerate()
        .map(|(frame, value)| parse_frame(frame, value))
        .collect()
}

fn parse_frame(frame: usize, value: &Value) -> Result<DetectionRecord<BoundingBox>> {
    let boxes = match value {
        Value::Array(boxes) => boxes,
        // Some exporters write a frame without detections as null.
        Value::Null => return Ok(DetectionRecord::empty()),
        other => {
            return Err(TrajectoryError::MalformedFrame {
                frame,
                reason: format!("expected an array of boxes, found {}", kind_of(other)),
            });
        }
    };
    let detections = boxes
        .iter()
        .enumerate()
        .map(|(index, value)| {
            parse_box(value).map_err(|reason| TrajectoryError::MalformedBox { frame, index, reason })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DetectionRecord::new(detections))
}

fn parse_box(value: &Value) -> std::result::Result<Detection<BoundingBox>, String> {
    let [x1, y1, x2, y2, score] = match value {
        Value::Array(fields) => {
            if fields.len() != 5 {
                return Err(format!(
                    "expected [x1, y1, x2, y2, score], found {} values",
                    fields.len()
                ));
            }
            [
                number(&fields[0], "x1")?,
                number(&fields[1], "y1")?,
                number(&fields[2], "x2")?,
                number(&fields[3], "y2")?,
                number(&fields[4], "score")?,
            ]
        }
        Value::Object(map) => {
            let field = |key: &str| match map.get(key) {
                Some(v) => number(v, key),
                None => Err(format!("missing field {key:?}")),
            };
            [field("x1")?, field("y1")?, field("x2")?, field("y2")?, field("score")?]
        }
        other => return Err(format!("expected an array or object, found {}", kind_of(other))),
    };
    let annotation = BoundingBox::new(x1, y1, x2, y2)?;
    Ok(Detection { annotation, confidence: score })
}

fn number(value: &Value, name: &str) -> std::result::Result<f64, String> {
    match value.as_f64() {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(format!("{name} is not finite ({v})")),
        None => Err(format!("{name} is not a number, found {}", kind_of(value))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
