use super::{Complex, Gate};
use crate::{QnnErr, Result};

/// The largest register a `StateVector` can hold.
pub const MAX_WIRES: usize = 8;

/// The full state of an `n`-qubit register as `2^n` amplitudes.
///
/// Wire 0 is the most significant bit of the basis index, so `|10⟩` means wire 0 is set.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    wires: usize,
    amps: Vec<Complex>,
}

impl StateVector {
    /// Creates a new register in the `|0…0⟩` state.
    ///
    /// # Arguments
    /// * `wires` - The amount of qubits in the register.
    ///
    /// # Returns
    /// An error if `wires` is zero or larger than `MAX_WIRES`.
    pub fn new(wires: usize) -> Result<Self> {
        if wires == 0 || wires > MAX_WIRES {
            return Err(QnnErr::InvalidWireCount {
                got: wires,
                max: MAX_WIRES,
            });
        }

        let mut amps = vec![Complex::ZERO; 1 << wires];
        amps[0] = Complex::ONE;

        Ok(Self { wires, amps })
    }

    pub fn wires(&self) -> usize {
        self.wires
    }

    pub fn amplitudes(&self) -> &[Complex] {
        &self.amps
    }

    /// Applies a gate to the register.
    ///
    /// # Returns
    /// An error if the gate references a wire outside the register, or if a controlled
    /// gate uses the same wire as control and target.
    pub fn apply(&mut self, gate: &Gate) -> Result<()> {
        let wire = gate.max_wire();
        if wire >= self.wires {
            return Err(QnnErr::WireOutOfRange {
                wire,
                wires: self.wires,
            });
        }

        match *gate {
            Gate::Ry { wire, .. } | Gate::Rx { wire, .. } => {
                // SAFETY: rotations always have a 2x2 matrix.
                let m = gate.matrix().unwrap();
                self.apply_single(wire, m);
            }
            Gate::Cnot { control, target } => {
                if control == target {
                    return Err(QnnErr::SameControlAndTarget { wire: control });
                }

                self.apply_cnot(control, target);
            }
        }

        Ok(())
    }

    /// Returns the expectation value of Pauli-Z measured on `wire`.
    pub fn expval_z(&self, wire: usize) -> Result<f32> {
        if wire >= self.wires {
            return Err(QnnErr::WireOutOfRange {
                wire,
                wires: self.wires,
            });
        }

        let mask = self.mask(wire);
        let expval = self
            .amps
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let p = a.norm_sqr();
                if i & mask == 0 { p } else { -p }
            })
            .sum();

        Ok(expval)
    }

    /// The total probability of the register, `1` for any valid state.
    pub fn norm(&self) -> f32 {
        self.amps.iter().map(|a| a.norm_sqr()).sum()
    }

    fn mask(&self, wire: usize) -> usize {
        1 << (self.wires - 1 - wire)
    }

    fn apply_single(&mut self, wire: usize, [a, b, c, d]: [Complex; 4]) {
        let mask = self.mask(wire);

        for i in (0..self.amps.len()).filter(|i| i & mask == 0) {
            let j = i | mask;
            let (x, y) = (self.amps[i], self.amps[j]);

            self.amps[i] = a * x + b * y;
            self.amps[j] = c * x + d * y;
        }
    }

    fn apply_cnot(&mut self, control: usize, target: usize) {
        let cmask = self.mask(control);
        let tmask = self.mask(target);

        for i in 0..self.amps.len() {
            if i & cmask != 0 && i & tmask == 0 {
                self.amps.swap(i, i | tmask);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn starts_in_ground_state() {
        let state = StateVector::new(2).unwrap();

        assert_eq!(state.amplitudes().len(), 4);
        assert_eq!(state.amplitudes()[0], Complex::ONE);
        assert_eq!(state.expval_z(0).unwrap(), 1.);
        assert_eq!(state.expval_z(1).unwrap(), 1.);
    }

    #[test]
    fn rejects_invalid_wire_counts() {
        assert!(StateVector::new(0).is_err());
        assert!(StateVector::new(MAX_WIRES + 1).is_err());
    }

    #[test]
    fn rx_pi_flips_the_qubit() {
        let mut state = StateVector::new(1).unwrap();
        state.apply(&Gate::Rx { wire: 0, theta: PI }).unwrap();

        assert!((state.expval_z(0).unwrap() + 1.).abs() < EPS);
    }

    #[test]
    fn ry_gives_cosine_expectation() {
        for x in [-2., -0.5, 0., 0.8, 1.9] {
            let mut state = StateVector::new(1).unwrap();
            state.apply(&Gate::Ry { wire: 0, theta: x }).unwrap();

            assert!((state.expval_z(0).unwrap() - x.cos()).abs() < EPS);
            assert!((state.norm() - 1.).abs() < EPS);
        }
    }

    #[test]
    fn wire_zero_is_most_significant() {
        let mut state = StateVector::new(2).unwrap();
        state.apply(&Gate::Rx { wire: 0, theta: PI }).unwrap();

        // |10⟩ lives at index 2
        assert!((state.amplitudes()[2].norm_sqr() - 1.).abs() < EPS);
        assert!((state.expval_z(0).unwrap() + 1.).abs() < EPS);
        assert!((state.expval_z(1).unwrap() - 1.).abs() < EPS);
    }

    #[test]
    fn cnot_flips_target_when_control_is_set() {
        let mut state = StateVector::new(2).unwrap();
        state.apply(&Gate::Rx { wire: 0, theta: PI }).unwrap();
        state
            .apply(&Gate::Cnot {
                control: 0,
                target: 1,
            })
            .unwrap();

        assert!((state.expval_z(1).unwrap() + 1.).abs() < EPS);
    }

    #[test]
    fn cnot_leaves_control_expectation_untouched() {
        let mut state = StateVector::new(2).unwrap();
        state.apply(&Gate::Ry { wire: 0, theta: 0.7 }).unwrap();
        state.apply(&Gate::Ry { wire: 1, theta: 1.3 }).unwrap();
        let before = state.expval_z(0).unwrap();

        state
            .apply(&Gate::Cnot {
                control: 0,
                target: 1,
            })
            .unwrap();

        assert!((state.expval_z(0).unwrap() - before).abs() < EPS);
    }

    #[test]
    fn invalid_gates_are_errors() {
        let mut state = StateVector::new(2).unwrap();

        assert!(matches!(
            state.apply(&Gate::Ry { wire: 2, theta: 0. }),
            Err(QnnErr::WireOutOfRange { wire: 2, wires: 2 })
        ));
        assert!(matches!(
            state.apply(&Gate::Cnot {
                control: 1,
                target: 1
            }),
            Err(QnnErr::SameControlAndTarget { wire: 1 })
        ));
        assert!(state.expval_z(5).is_err());
    }
}
