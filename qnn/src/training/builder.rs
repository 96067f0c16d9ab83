use log::info;

use super::{ModelTrainer, Trainer};
use crate::{
    Result,
    circuit::{QuantumModel, SingleQubit, TwoQubit},
    configs::{ModelKind, OptimizerConfig, TrainingConfig},
    loss::{LossFn, Mse},
    optimization::{Adam, GradientDescent, Optimizer},
};

/// Builds `Trainer`s given a config.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Trainer` following a config.
    ///
    /// # Arguments
    /// * `config` - The config for the training run.
    ///
    /// # Returns
    /// An error if the config is invalid.
    pub fn build(&self, config: &TrainingConfig) -> Result<Box<dyn Trainer>> {
        config.validate()?;
        info!(
            "building {:?} trainer with {:?}",
            config.model, config.optimizer
        );
        self.resolve_model(config)
    }

    fn resolve_model(&self, config: &TrainingConfig) -> Result<Box<dyn Trainer>> {
        match config.model {
            ModelKind::SingleQubit => self.resolve_optimizer(config, SingleQubit::new()),
            ModelKind::TwoQubit => self.resolve_optimizer(config, TwoQubit::new()),
        }
    }

    fn resolve_optimizer<M>(&self, config: &TrainingConfig, model: M) -> Result<Box<dyn Trainer>>
    where
        M: QuantumModel + 'static,
    {
        match config.optimizer {
            OptimizerConfig::Adam {
                learning_rate,
                beta1,
                beta2,
                epsilon,
            } => {
                let optimizer = Adam::new(
                    model.num_params(),
                    learning_rate,
                    beta1,
                    beta2,
                    epsilon,
                );
                self.terminate_build(config, model, optimizer, Mse::new())
            }
            OptimizerConfig::GradientDescent { learning_rate } => {
                let optimizer = GradientDescent::new(learning_rate);
                self.terminate_build(config, model, optimizer, Mse::new())
            }
        }
    }

    fn terminate_build<M, O, L>(
        &self,
        config: &TrainingConfig,
        model: M,
        optimizer: O,
        loss: L,
    ) -> Result<Box<dyn Trainer>>
    where
        M: QuantumModel + 'static,
        O: Optimizer + 'static,
        L: LossFn + 'static,
    {
        let weights = config.initial_weights.clone();
        let trainer = ModelTrainer::new(model, optimizer, loss, weights)?;
        Ok(Box::new(trainer))
    }
}
