pub mod detection_reader;
pub mod recording;
