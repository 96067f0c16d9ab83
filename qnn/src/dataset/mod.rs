mod dataset;
mod signals;

pub use dataset::Dataset;
pub use signals::SignalGen;
