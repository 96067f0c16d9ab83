use std::fmt::{self, Display};

use log::debug;

use crate::{
    Result,
    circuit::{QuantumModel, SingleQubit},
};

/// The weight the connection manager ships with before any training happens.
pub const DEFAULT_WEIGHT: f32 = 1.57;

/// Whether a client gets a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

impl Verdict {
    /// Maps a circuit score to a verdict: only strictly positive scores are accepted, so
    /// zero and NaN are rejected.
    pub fn from_score(score: f32) -> Self {
        if score > 0. {
            Self::Accept
        } else {
            Self::Reject
        }
    }

    /// The class label this verdict stands for.
    pub fn as_label(self) -> f32 {
        match self {
            Self::Accept => 1.,
            Self::Reject => -1.,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Accept => "ACCEPT",
            Self::Reject => "REJECT",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Self::Accept => "CONNECTION GRANTED",
            Self::Reject => "CONNECTION REJECTED",
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::Accept => "Signal quality is above the quantum threshold.",
            Self::Reject => "High interference detected. Connection unsafe.",
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The outcome of evaluating one connection request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub score: f32,
    pub verdict: Verdict,
}

impl Decision {
    /// The score rounded to four decimals, as shown to operators.
    pub fn rounded_score(&self) -> f32 {
        (self.score * 1e4).round() / 1e4
    }
}

/// Accepts or rejects clients by running their signal through the one-qubit circuit.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionManager {
    model: SingleQubit,
    weight: f32,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT)
    }
}

impl ConnectionManager {
    pub fn new(weight: f32) -> Self {
        Self {
            model: SingleQubit,
            weight,
        }
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    /// Evaluates the circuit once for the given signal.
    pub fn decide(&self, signal: f32) -> Result<Decision> {
        let score = self.model.forward(signal, &[self.weight])?;
        let verdict = Verdict::from_score(score);
        debug!(
            signal = signal, score = score, weight = self.weight;
            "connection request evaluated"
        );

        Ok(Decision { score, verdict })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(Verdict::from_score(0.), Verdict::Reject);
        assert_eq!(Verdict::from_score(-0.), Verdict::Reject);
        assert_eq!(Verdict::from_score(f32::NAN), Verdict::Reject);
    }

    #[test]
    fn verdict_is_the_sign() {
        assert_eq!(Verdict::from_score(1e-6), Verdict::Accept);
        assert_eq!(Verdict::from_score(0.9), Verdict::Accept);
        assert_eq!(Verdict::from_score(-1e-6), Verdict::Reject);
        assert_eq!(Verdict::Accept.as_label(), 1.);
        assert_eq!(Verdict::Reject.as_label(), -1.);
    }

    #[test]
    fn default_weight_accepts_moderate_signals() {
        let manager = ConnectionManager::default();
        let decision = manager.decide(0.5).unwrap();

        // cos(0.5) * cos(1.57) is tiny but positive
        assert!(decision.score > 0.);
        assert!(decision.score < 1e-3);
        assert_eq!(decision.verdict, Verdict::Accept);
    }

    #[test]
    fn strong_negative_signals_are_rejected() {
        let manager = ConnectionManager::new(0.2);
        let decision = manager.decide(-2.).unwrap();

        assert_eq!(decision.verdict, Verdict::Reject);
        assert_eq!(decision.verdict.to_string(), "REJECT");
    }

    #[test]
    fn decisions_are_reproducible() {
        let manager = ConnectionManager::new(0.4);
        let a = manager.decide(1.1).unwrap();
        let b = manager.decide(1.1).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn score_rounds_to_four_decimals() {
        let decision = Decision {
            score: 0.123456,
            verdict: Verdict::Accept,
        };

        assert!((decision.rounded_score() - 0.1235).abs() < 1e-6);
    }
}
