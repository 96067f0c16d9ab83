use ndarray::{Array1, ArrayView1};

use crate::{QnnErr, Result};

/// A set of scalar signals paired with their `±1` labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    xs: Array1<f32>,
    ys: Array1<f32>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Returns
    /// An error if `xs` and `ys` differ in length.
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(QnnErr::SizeMismatch {
                a: "signals",
                b: "labels",
                got: ys.len(),
                expected: xs.len(),
            });
        }

        Ok(Self {
            xs: Array1::from_vec(xs),
            ys: Array1::from_vec(ys),
        })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> ArrayView1<'_, f32> {
        self.xs.view()
    }

    pub fn ys(&self) -> ArrayView1<'_, f32> {
        self.ys.view()
    }

    /// Iterates over `(signal, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_are_rejected() {
        assert!(Dataset::new(vec![0.1, 0.2], vec![1.0]).is_err());
    }

    #[test]
    fn iter_pairs_signals_with_labels() {
        let dataset = Dataset::new(vec![0.3, -1.2], vec![1., -1.]).unwrap();
        let pairs: Vec<_> = dataset.iter().collect();

        assert_eq!(pairs, vec![(0.3, 1.), (-1.2, -1.)]);
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
    }
}
