use crate::annotations::point::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point with a name, used for physical landmarks such as the room center.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NamedPoint {
    pub name: String,
    point: Point,
}

impl NamedPoint {
    pub fn new(name: String, x: f64, y: f64) -> Self {
        NamedPoint { name, point: Point { x, y } }
    }

    pub fn point(&self) -> Point {
        self.point
    }
}

impl fmt::Display for NamedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamedPoint {{ name: {}, x: {}, y: {} }}", self.name, self.point.x, self.point.y)
    }
}
