use super::Complex;

/// The gates the classifiers are built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Rotation around the Y axis.
    Ry { wire: usize, theta: f32 },
    /// Rotation around the X axis.
    Rx { wire: usize, theta: f32 },
    /// Controlled-X.
    Cnot { control: usize, target: usize },
}

impl Gate {
    /// Returns the row-major 2x2 unitary of a single-qubit gate, or `None` for
    /// multi-qubit gates.
    pub fn matrix(&self) -> Option<[Complex; 4]> {
        match *self {
            Gate::Ry { theta, .. } => {
                let (s, c) = (theta / 2.).sin_cos();
                Some([
                    Complex::new(c, 0.),
                    Complex::new(-s, 0.),
                    Complex::new(s, 0.),
                    Complex::new(c, 0.),
                ])
            }
            Gate::Rx { theta, .. } => {
                let (s, c) = (theta / 2.).sin_cos();
                Some([
                    Complex::new(c, 0.),
                    Complex::new(0., -s),
                    Complex::new(0., -s),
                    Complex::new(c, 0.),
                ])
            }
            Gate::Cnot { .. } => None,
        }
    }

    /// The largest wire index this gate touches.
    pub fn max_wire(&self) -> usize {
        match *self {
            Gate::Ry { wire, .. } | Gate::Rx { wire, .. } => wire,
            Gate::Cnot { control, target } => control.max(target),
        }
    }
}
