use crate::{Result, dataset::Dataset};

/// A circuit together with the machinery to fit its weights.
pub trait Trainer {
    /// Returns the current weights.
    fn weights(&self) -> &[f32];

    /// Evaluates the cost at the current weights, then takes one optimizer step.
    ///
    /// # Returns
    /// The cost measured *before* the step.
    fn step_and_cost(&mut self, dataset: &Dataset) -> Result<f32>;

    /// Runs `epochs` optimizer steps over the whole dataset.
    ///
    /// # Arguments
    /// * `dataset` - The labelled training signals.
    /// * `epochs` - The amount of steps to take.
    /// * `on_epoch` - Called after every step with the epoch index and its cost.
    ///
    /// # Returns
    /// The cost of every epoch.
    fn fit(
        &mut self,
        dataset: &Dataset,
        epochs: usize,
        on_epoch: &mut dyn FnMut(usize, f32),
    ) -> Result<Vec<f32>> {
        let mut costs = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let cost = self.step_and_cost(dataset)?;
            on_epoch(epoch, cost);
            costs.push(cost);
        }

        Ok(costs)
    }

    /// Evaluates the circuit for `x` with the current weights.
    fn predict(&self, x: f32) -> Result<f32>;

    /// Returns the fraction of samples whose predicted class matches the label.
    fn accuracy(&self, dataset: &Dataset) -> Result<f32>;
}
