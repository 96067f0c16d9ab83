use log::debug;
use ndarray::Array1;
use rayon::prelude::*;

use super::Trainer;
use crate::{
    QnnErr, Result,
    circuit::QuantumModel,
    dataset::Dataset,
    decision::Verdict,
    loss::LossFn,
    optimization::Optimizer,
};

/// A circuit `Trainer`. Contains the relevant components needed for training a circuit,
/// including its current weights.
pub struct ModelTrainer<M, O, L>
where
    M: QuantumModel,
    O: Optimizer,
    L: LossFn,
{
    model: M,
    optimizer: O,
    loss_fn: L,
    weights: Vec<f32>,
}

impl<M, O, L> ModelTrainer<M, O, L>
where
    M: QuantumModel,
    O: Optimizer,
    L: LossFn,
{
    /// Returns a new `ModelTrainer`.
    ///
    /// # Arguments
    /// * `model` - The circuit that will be trained.
    /// * `optimizer` - The optimizer that dictates how to update the weights.
    /// * `loss_fn` - The loss function used to measure the difference between the circuit's output and the label.
    /// * `weights` - The starting weights.
    ///
    /// # Returns
    /// An error if the amount of weights doesn't match the circuit.
    pub fn new(model: M, optimizer: O, loss_fn: L, weights: Vec<f32>) -> Result<Self> {
        if weights.len() != model.num_params() {
            return Err(QnnErr::SizeMismatch {
                a: "weights",
                b: "circuit parameters",
                got: weights.len(),
                expected: model.num_params(),
            });
        }

        Ok(Self {
            model,
            optimizer,
            loss_fn,
            weights,
        })
    }

    /// Evaluates the circuit on every signal of the dataset.
    pub fn predictions(&self, weights: &[f32], dataset: &Dataset) -> Result<Array1<f32>> {
        let model = &self.model;
        let xs = dataset.xs().to_vec();
        let preds = xs
            .into_par_iter()
            .map(|x| model.forward(x, weights))
            .collect::<Result<Vec<_>>>()?;

        Ok(Array1::from_vec(preds))
    }

    /// Computes the cost of the given weights over the dataset.
    pub fn cost(&self, weights: &[f32], dataset: &Dataset) -> Result<f32> {
        let preds = self.predictions(weights, dataset)?;
        Ok(self.loss_fn.loss(preds.view(), dataset.ys()))
    }

    /// Computes the cost and its gradient at the current weights.
    pub fn cost_and_grad(&self, dataset: &Dataset) -> Result<(f32, Vec<f32>)> {
        let weights = &self.weights;
        let preds = self.predictions(weights, dataset)?;
        let cost = self.loss_fn.loss(preds.view(), dataset.ys());
        let dloss = self.loss_fn.loss_prime(preds.view(), dataset.ys());

        let model = &self.model;
        let xs = dataset.xs().to_vec();
        let sample_grads = xs
            .into_par_iter()
            .map(|x| -> Result<Vec<f32>> {
                let mut grad = vec![0.; weights.len()];
                model.gradient(x, weights, &mut grad)?;
                Ok(grad)
            })
            .collect::<Result<Vec<_>>>()?;

        // reduce sequentially so the sum doesn't depend on the thread schedule
        let mut grad = vec![0.; weights.len()];
        for (d, sample_grad) in dloss.iter().zip(sample_grads) {
            for (g, sg) in grad.iter_mut().zip(sample_grad) {
                *g += d * sg;
            }
        }

        Ok((cost, grad))
    }

    /// Returns the predicted class of `x`, `1` or `-1`.
    pub fn classify(&self, x: f32) -> Result<f32> {
        let score = self.model.forward(x, &self.weights)?;
        Ok(Verdict::from_score(score).as_label())
    }
}

impl<M, O, L> Trainer for ModelTrainer<M, O, L>
where
    M: QuantumModel,
    O: Optimizer,
    L: LossFn,
{
    fn weights(&self) -> &[f32] {
        &self.weights
    }

    fn step_and_cost(&mut self, dataset: &Dataset) -> Result<f32> {
        let (cost, grad) = self.cost_and_grad(dataset)?;
        self.optimizer.update_params(&mut self.weights, &grad);
        debug!("step: cost={cost} grad={grad:?} weights={:?}", self.weights);

        Ok(cost)
    }

    fn predict(&self, x: f32) -> Result<f32> {
        self.model.forward(x, &self.weights)
    }

    fn accuracy(&self, dataset: &Dataset) -> Result<f32> {
        if dataset.is_empty() {
            return Ok(0.);
        }

        let mut hits = 0;
        for (x, y) in dataset.iter() {
            if self.classify(x)? == y {
                hits += 1;
            }
        }

        Ok(hits as f32 / dataset.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        circuit::{SingleQubit, TwoQubit},
        dataset::SignalGen,
        loss::Mse,
        optimization::{Adam, GradientDescent},
    };

    fn noisy_dataset(n: usize, seed: u64) -> Dataset {
        SignalGen::new(0.5)
            .unwrap()
            .sample(&mut StdRng::seed_from_u64(seed), n)
    }

    #[test]
    fn rejects_wrong_weight_count() {
        let result = ModelTrainer::new(TwoQubit, GradientDescent::new(0.1), Mse, vec![0.1]);
        assert!(result.is_err());
    }

    #[test]
    fn gradient_matches_closed_form() {
        // f(x, w) = cos(x) cos(w), cost = mean((f - y)^2)
        let dataset = Dataset::new(vec![0.3, -1.1], vec![1., -1.]).unwrap();
        let w = 0.4f32;
        let trainer = ModelTrainer::new(SingleQubit, GradientDescent::new(0.1), Mse, vec![w])
            .unwrap();

        let (cost, grad) = trainer.cost_and_grad(&dataset).unwrap();

        let mut expected_cost = 0.;
        let mut expected_grad = 0.;
        for (x, y) in dataset.iter() {
            let f = x.cos() * w.cos();
            expected_cost += (f - y).powi(2) / 2.;
            expected_grad += (f - y) * -x.cos() * w.sin();
        }

        assert!((cost - expected_cost).abs() < 1e-5);
        assert!((grad[0] - expected_grad).abs() < 1e-5);
    }

    #[test]
    fn step_and_cost_reports_cost_before_the_step() {
        let dataset = noisy_dataset(20, 5);
        let mut trainer =
            ModelTrainer::new(TwoQubit, Adam::with_stepsize(2, 0.1), Mse, vec![0.1, 0.1])
                .unwrap();

        let before = trainer.cost(&[0.1, 0.1], &dataset).unwrap();
        let reported = trainer.step_and_cost(&dataset).unwrap();

        assert_eq!(reported, before);
        assert_ne!(trainer.weights(), &[0.1, 0.1]);
    }

    #[test]
    fn fit_lowers_the_cost() {
        let dataset = noisy_dataset(40, 11);
        let mut trainer =
            ModelTrainer::new(TwoQubit, Adam::with_stepsize(2, 0.1), Mse, vec![0.1, 0.1])
                .unwrap();
        let mut seen = Vec::new();

        let costs = trainer
            .fit(&dataset, 20, &mut |epoch, cost| seen.push((epoch, cost)))
            .unwrap();

        assert_eq!(costs.len(), 20);
        assert_eq!(seen.len(), 20);
        assert_eq!(seen[19].0, 19);

        let last = trainer.cost(trainer.weights(), &dataset).unwrap();
        assert!(last <= costs[0]);
    }

    /// Counts its steps through a `Cell`, so it is `Send` but not `Sync`.
    struct CountingSgd {
        steps: Cell<usize>,
    }

    impl Optimizer for CountingSgd {
        fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
            self.steps.set(self.steps.get() + 1);
            for (p, g) in params.iter_mut().zip(grad) {
                *p -= 0.1 * g;
            }
        }
    }

    #[test]
    fn trains_with_an_optimizer_that_is_not_sync() {
        let dataset = noisy_dataset(8, 4);
        let optimizer = CountingSgd {
            steps: Cell::new(0),
        };
        let mut trainer = ModelTrainer::new(SingleQubit, optimizer, Mse, vec![0.1]).unwrap();

        let costs = trainer.fit(&dataset, 3, &mut |_, _| {}).unwrap();

        assert_eq!(costs.len(), 3);
        assert_eq!(trainer.optimizer.steps.get(), 3);
        assert!(trainer.predictions(&[0.1], &dataset).is_ok());
    }

    #[test]
    fn predictions_are_reproducible() {
        let dataset = noisy_dataset(16, 2);
        let trainer =
            ModelTrainer::new(TwoQubit, GradientDescent::new(0.1), Mse, vec![0.3, -0.2]).unwrap();

        let a = trainer.predictions(&[0.3, -0.2], &dataset).unwrap();
        let b = trainer.predictions(&[0.3, -0.2], &dataset).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn accuracy_counts_matching_classes() {
        // with a zero weight the score is cos(x)
        let dataset = Dataset::new(vec![0.2, 2.5, -0.4, -2.8], vec![1., -1., 1., -1.]).unwrap();
        let trainer = ModelTrainer::new(SingleQubit, GradientDescent::new(0.1), Mse, vec![0.])
            .unwrap();

        assert_eq!(trainer.accuracy(&dataset).unwrap(), 1.);

        let flipped = Dataset::new(vec![0.2, 2.5], vec![1., 1.]).unwrap();
        assert_eq!(trainer.accuracy(&flipped).unwrap(), 0.5);
    }

    #[test]
    fn empty_dataset_has_zero_accuracy() {
        let dataset = Dataset::new(vec![], vec![]).unwrap();
        let trainer = ModelTrainer::new(SingleQubit, GradientDescent::new(0.1), Mse, vec![0.])
            .unwrap();

        assert_eq!(trainer.accuracy(&dataset).unwrap(), 0.);
        assert_eq!(trainer.cost(&[0.], &dataset).unwrap(), 0.);
    }
}
