mod model;
mod single;
mod two_qubit;

pub use model::QuantumModel;
pub use single::SingleQubit;
pub use two_qubit::TwoQubit;
