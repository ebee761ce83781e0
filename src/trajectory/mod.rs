pub mod aggregation;
pub mod centers;
pub mod extraction;
