use std::{fs, num::NonZeroUsize, path::Path};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    QnnErr, Result,
    circuit::{QuantumModel, SingleQubit, TwoQubit},
    optimization::Adam,
};

/// The circuit a training run optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    SingleQubit,
    TwoQubit,
}

impl ModelKind {
    pub fn num_params(self) -> usize {
        match self {
            ModelKind::SingleQubit => SingleQubit.num_params(),
            ModelKind::TwoQubit => TwoQubit.num_params(),
        }
    }
}

/// Which `Optimizer` to build, with its hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerConfig {
    Adam {
        learning_rate: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    },
    GradientDescent {
        learning_rate: f32,
    },
}

impl OptimizerConfig {
    /// Adam with the default decays and the given step size.
    pub fn adam(learning_rate: f32) -> Self {
        Self::Adam {
            learning_rate,
            beta1: Adam::DEFAULT_BETA1,
            beta2: Adam::DEFAULT_BETA2,
            epsilon: Adam::DEFAULT_EPSILON,
        }
    }

    pub fn learning_rate(&self) -> f32 {
        match *self {
            Self::Adam { learning_rate, .. } | Self::GradientDescent { learning_rate } => {
                learning_rate
            }
        }
    }
}

/// How the synthetic signals are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub train_samples: usize,
    pub test_samples: usize,
    pub noise_std: f32,
}

/// Everything a training run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub model: ModelKind,
    pub optimizer: OptimizerConfig,
    pub data: DataConfig,
    pub initial_weights: Vec<f32>,
    pub epochs: usize,
    pub log_every: NonZeroUsize,
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::classifier()
    }
}

impl TrainingConfig {
    /// The two-qubit signal classifier run.
    pub fn classifier() -> Self {
        Self {
            model: ModelKind::TwoQubit,
            optimizer: OptimizerConfig::adam(0.1),
            data: DataConfig {
                train_samples: 40,
                test_samples: 10,
                noise_std: 0.5,
            },
            initial_weights: vec![0.1, 0.1],
            epochs: 20,
            // SAFETY: 5 is non-zero.
            log_every: NonZeroUsize::new(5).unwrap(),
            seed: None,
        }
    }

    /// The one-qubit connection manager run over a simulated wireless network.
    pub fn network() -> Self {
        Self {
            model: ModelKind::SingleQubit,
            optimizer: OptimizerConfig::adam(0.1),
            data: DataConfig {
                train_samples: 50,
                test_samples: 0,
                noise_std: 0.4,
            },
            initial_weights: vec![0.1],
            epochs: 30,
            // SAFETY: 10 is non-zero.
            log_every: NonZeroUsize::new(10).unwrap(),
            seed: None,
        }
    }

    /// Parses a config from JSON, filling missing fields with the classifier defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_json_str_with(s, Self::default())
    }

    /// Parses a JSON object whose top-level fields override the ones of `base`.
    ///
    /// # Errors
    /// Returns an error if `s` is not a JSON object or the merged config is invalid.
    pub fn from_json_str_with(s: &str, base: Self) -> Result<Self> {
        let Value::Object(overrides) = serde_json::from_str::<Value>(s)? else {
            return Err(QnnErr::InvalidConfig(
                "a config must be a JSON object".into(),
            ));
        };

        let mut merged = serde_json::to_value(base)?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON or describes an
    /// invalid run.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_file_with(path, Self::default())
    }

    /// Loads a JSON file overriding the fields of `base`.
    pub fn from_json_file_with<P: AsRef<Path>>(path: P, base: Self) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str_with(&content, base)
    }

    /// Checks the config describes a run that can be built.
    pub fn validate(&self) -> Result<()> {
        let expected = self.model.num_params();
        if self.initial_weights.len() != expected {
            return Err(QnnErr::SizeMismatch {
                a: "initial_weights",
                b: "model parameters",
                got: self.initial_weights.len(),
                expected,
            });
        }

        if self.data.train_samples == 0 {
            return Err(QnnErr::InvalidConfig(
                "train_samples must be greater than zero".into(),
            ));
        }

        let lr = self.optimizer.learning_rate();
        if !lr.is_finite() || lr <= 0. {
            return Err(QnnErr::InvalidConfig(format!(
                "learning_rate must be positive, got {lr}"
            )));
        }

        if let OptimizerConfig::Adam {
            beta1,
            beta2,
            epsilon,
            ..
        } = self.optimizer
        {
            for (name, beta) in [("beta1", beta1), ("beta2", beta2)] {
                if !(0. ..1.).contains(&beta) {
                    return Err(QnnErr::InvalidConfig(format!(
                        "{name} must be in [0, 1), got {beta}"
                    )));
                }
            }

            if !epsilon.is_finite() || epsilon <= 0. {
                return Err(QnnErr::InvalidConfig(format!(
                    "epsilon must be positive, got {epsilon}"
                )));
            }
        }

        Ok(())
    }

    /// Builds the random number generator for this run.
    pub fn rng(&self) -> StdRng {
        generate_rng(self.seed)
    }
}

/// Seeds a `StdRng` from `seed`, or from the OS when there is none.
pub fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        TrainingConfig::classifier().validate().unwrap();
        TrainingConfig::network().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = TrainingConfig::from_json_str(r#"{ "epochs": 3, "seed": 11 }"#).unwrap();

        assert_eq!(config.epochs, 3);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.model, ModelKind::TwoQubit);
        assert_eq!(config.initial_weights, vec![0.1, 0.1]);
    }

    #[test]
    fn optimizer_is_tagged_in_snake_case() {
        let json = r#"{
            "model": "single_qubit",
            "initial_weights": [0.3],
            "optimizer": { "gradient_descent": { "learning_rate": 0.5 } }
        }"#;
        let config = TrainingConfig::from_json_str(json).unwrap();

        assert_eq!(config.model, ModelKind::SingleQubit);
        assert_eq!(
            config.optimizer,
            OptimizerConfig::GradientDescent { learning_rate: 0.5 }
        );
    }

    #[test]
    fn weight_count_must_match_model() {
        let err = TrainingConfig::from_json_str(r#"{ "model": "single_qubit" }"#).unwrap_err();
        assert!(matches!(err, QnnErr::SizeMismatch { got: 2, expected: 1, .. }));
    }

    #[test]
    fn overrides_apply_over_the_given_base() {
        let config =
            TrainingConfig::from_json_str_with(r#"{ "seed": 3 }"#, TrainingConfig::network())
                .unwrap();

        assert_eq!(config.seed, Some(3));
        assert_eq!(config.model, ModelKind::SingleQubit);
        assert_eq!(config.initial_weights, vec![0.1]);
        assert_eq!(config.epochs, 30);
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(matches!(
            TrainingConfig::from_json_str("[1, 2]"),
            Err(QnnErr::InvalidConfig(_))
        ));
    }

    #[test]
    fn adam_decays_must_stay_below_one() {
        for json in [
            r#"{ "optimizer": { "adam": { "learning_rate": 0.1, "beta1": 1.0, "beta2": 0.99, "epsilon": 1e-8 } } }"#,
            r#"{ "optimizer": { "adam": { "learning_rate": 0.1, "beta1": 0.9, "beta2": 1.5, "epsilon": 1e-8 } } }"#,
            r#"{ "optimizer": { "adam": { "learning_rate": 0.1, "beta1": -0.1, "beta2": 0.99, "epsilon": 1e-8 } } }"#,
        ] {
            assert!(matches!(
                TrainingConfig::from_json_str(json),
                Err(QnnErr::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn adam_epsilon_must_be_positive() {
        let mut config = TrainingConfig::network();
        config.optimizer = OptimizerConfig::Adam {
            learning_rate: 0.1,
            beta1: 0.9,
            beta2: 0.99,
            epsilon: 0.,
        };

        assert!(matches!(config.validate(), Err(QnnErr::InvalidConfig(_))));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(
            TrainingConfig::from_json_str("{ nope"),
            Err(QnnErr::Json(_))
        ));
    }
}
