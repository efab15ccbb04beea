pub mod datasets;
pub mod generator;
