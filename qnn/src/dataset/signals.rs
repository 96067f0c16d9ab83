use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::Dataset;
use crate::{QnnErr, Result};

/// Generates noisy binary signals, the kind a wireless channel would deliver.
///
/// Each sample picks a bit `b` in `{-1, 1}` uniformly, adds gaussian noise to it and keeps `b`
/// as the label, so labels always match the sign of the clean signal.
#[derive(Debug, Clone, Copy)]
pub struct SignalGen {
    noise_std: f32,
    noise: Normal<f32>,
}

impl SignalGen {
    /// Creates a new `SignalGen`.
    ///
    /// # Arguments
    /// * `noise_std` - The standard deviation of the channel noise.
    ///
    /// # Returns
    /// An error if `noise_std` is negative or not finite.
    pub fn new(noise_std: f32) -> Result<Self> {
        if !noise_std.is_finite() || noise_std < 0. {
            return Err(QnnErr::InvalidNoise(format!(
                "standard deviation must be finite and non-negative, got {noise_std}"
            )));
        }

        Ok(Self {
            noise_std,
            noise: Normal::new(0., noise_std)?,
        })
    }

    pub fn noise_std(&self) -> f32 {
        self.noise_std
    }

    /// Samples the clean bits alongside their noisy signals.
    ///
    /// # Returns
    /// `(bits, signals)`, both of length `n`.
    pub fn sample_raw<R: Rng>(&self, rng: &mut R, n: usize) -> (Vec<f32>, Vec<f32>) {
        (0..n)
            .map(|_| {
                let bit = if rng.random_bool(0.5) { 1. } else { -1. };
                (bit, bit + self.noise.sample(rng))
            })
            .unzip()
    }

    /// Samples a labelled dataset of `n` noisy signals.
    pub fn sample<R: Rng>(&self, rng: &mut R, n: usize) -> Dataset {
        let (ys, xs) = self.sample_raw(rng, n);

        // SAFETY: both vectors come from the same iterator.
        Dataset::new(xs, ys).unwrap()
    }
}
