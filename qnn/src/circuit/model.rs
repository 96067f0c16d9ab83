use std::f32::consts::FRAC_PI_2;

use crate::{
    QnnErr, Result,
    sim::{Gate, StateVector},
};

/// A parameterized quantum circuit that maps a scalar input to a scalar score.
pub trait QuantumModel: Sync {
    /// Returns the amount of trainable weights in the circuit.
    fn num_params(&self) -> usize;

    /// Returns the amount of qubits the circuit acts on.
    fn num_wires(&self) -> usize;

    /// Returns the ordered gate sequence for the given input and weights.
    ///
    /// Implementors can assume `weights.len() == self.num_params()`.
    fn gates(&self, x: f32, weights: &[f32]) -> Vec<Gate>;

    /// Returns the wire whose Pauli-Z expectation is the circuit's output.
    fn readout(&self) -> usize {
        0
    }

    /// Evaluates the circuit on a fresh register.
    ///
    /// # Arguments
    /// * `x` - The encoded input signal.
    /// * `weights` - The trainable weights.
    ///
    /// # Returns
    /// The expectation value of the readout wire, in `[-1, 1]`.
    fn forward(&self, x: f32, weights: &[f32]) -> Result<f32> {
        check_size(weights.len(), self.num_params())?;

        let mut state = StateVector::new(self.num_wires())?;
        for gate in self.gates(x, weights) {
            state.apply(&gate)?;
        }

        state.expval_z(self.readout())
    }

    /// Computes the derivative of `forward` with respect to each weight using the
    /// parameter-shift rule, which is exact for Pauli rotations.
    ///
    /// # Arguments
    /// * `x` - The encoded input signal.
    /// * `weights` - The trainable weights.
    /// * `grad` - A buffer of `num_params` values where the derivatives are written.
    fn gradient(&self, x: f32, weights: &[f32], grad: &mut [f32]) -> Result<()> {
        check_size(weights.len(), self.num_params())?;
        check_size(grad.len(), self.num_params())?;

        let mut shifted = weights.to_vec();
        for (i, g) in grad.iter_mut().enumerate() {
            shifted[i] = weights[i] + FRAC_PI_2;
            let plus = self.forward(x, &shifted)?;

            shifted[i] = weights[i] - FRAC_PI_2;
            let minus = self.forward(x, &shifted)?;

            shifted[i] = weights[i];
            *g = (plus - minus) / 2.;
        }

        Ok(())
    }
}

fn check_size(got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(QnnErr::SizeMismatch {
            a: "weights",
            b: "circuit parameters",
            got,
            expected,
        });
    }

    Ok(())
}
