use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use rand_distr::NormalError;

/// The result type used in the entire qnn module.
pub type Result<T> = std::result::Result<T, QnnErr>;

/// The qnn module's error type.
#[derive(Debug)]
pub enum QnnErr {
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidWireCount {
        got: usize,
        max: usize,
    },
    WireOutOfRange {
        wire: usize,
        wires: usize,
    },
    SameControlAndTarget {
        wire: usize,
    },
    InvalidNoise(String),
    InvalidConfig(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for QnnErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QnnErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            QnnErr::InvalidWireCount { got, max } => write!(
                f,
                "A state vector needs between 1 and {max} wires, got {got}"
            ),
            QnnErr::WireOutOfRange { wire, wires } => {
                write!(f, "Wire {wire} is out of range for a {wires}-wire register")
            }
            QnnErr::SameControlAndTarget { wire } => {
                write!(f, "Control and target must differ, both are wire {wire}")
            }
            QnnErr::InvalidNoise(msg) => write!(f, "invalid noise distribution: {msg}"),
            QnnErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            QnnErr::Io(e) => write!(f, "io error: {e}"),
            QnnErr::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl Error for QnnErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QnnErr::Io(e) => Some(e),
            QnnErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NormalError> for QnnErr {
    fn from(value: NormalError) -> Self {
        Self::InvalidNoise(value.to_string())
    }
}

impl From<io::Error> for QnnErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for QnnErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
