use super::QuantumModel;
use crate::sim::Gate;

/// The two-qubit signal classifier.
///
/// The signal is encoded on both wires with `RY(x)`, each wire gets its own `RX(w_i)`, and
/// a `CNOT(0, 1)` entangles them before reading out wire 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct TwoQubit;

impl TwoQubit {
    pub fn new() -> Self {
        Self
    }
}

impl QuantumModel for TwoQubit {
    fn num_params(&self) -> usize {
        2
    }

    fn num_wires(&self) -> usize {
        2
    }

    fn gates(&self, x: f32, weights: &[f32]) -> Vec<Gate> {
        vec![
            Gate::Ry { wire: 0, theta: x },
            Gate::Ry { wire: 1, theta: x },
            Gate::Rx {
                wire: 0,
                theta: weights[0],
            },
            Gate::Rx {
                wire: 1,
                theta: weights[1],
            },
            Gate::Cnot {
                control: 0,
                target: 1,
            },
        ]
    }
}
