use super::QuantumModel;
use crate::sim::Gate;

/// The one-qubit connection classifier: `RY(x)` encodes the signal and a single
/// `RX(w)` acts as the learned rule.
///
/// Its output is `cos(x) * cos(w)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleQubit;

impl SingleQubit {
    pub fn new() -> Self {
        Self
    }
}

impl QuantumModel for SingleQubit {
    fn num_params(&self) -> usize {
        1
    }

    fn num_wires(&self) -> usize {
        1
    }

    fn gates(&self, x: f32, weights: &[f32]) -> Vec<Gate> {
        vec![
            Gate::Ry { wire: 0, theta: x },
            Gate::Rx {
                wire: 0,
                theta: weights[0],
            },
        ]
    }
}
