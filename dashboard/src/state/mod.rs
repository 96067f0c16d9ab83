pub mod dashboard;
pub mod slider;
