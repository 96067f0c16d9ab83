pub mod circuit;
pub mod configs;
pub mod dataset;
pub mod decision;
pub mod error;
pub mod loss;
pub mod optimization;
pub mod sim;
pub mod training;

pub use error::{QnnErr, Result};
