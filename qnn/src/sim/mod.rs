mod complex;
mod gate;
mod state;

pub use complex::Complex;
pub use gate::Gate;
pub use state::{MAX_WIRES, StateVector};
