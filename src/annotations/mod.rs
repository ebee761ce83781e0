pub mod bounding_box;
pub mod detection;
pub mod named_point;
pub mod point;
