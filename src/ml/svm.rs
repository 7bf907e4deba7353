//! Linear Support Vector Machine
//!
//! Trains a single weight vector and bias by per-sample sub-gradient descent
//! on hinge loss with L2 regularization. The stored 0/1 labels are remapped
//! to -1/+1 internally.

use ndarray::Array1;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::types::DataPoint;
use crate::model::EpochStats;

/// Linear SVM for binary classification.
///
/// The weight vector is lazily sized to the first input seen by either
/// [`Svm::predict`] or [`Svm::train_epoch`]; its length is fixed from then on.
pub struct Svm {
    learning_rate: f64,
    c: f64,
    weights: Option<Array1<f64>>,
    bias: f64,
    rng: StdRng,
}

impl Svm {
    /// Create an untrained SVM with regularization strength `c`.
    pub fn new(learning_rate: f64, c: f64) -> Self {
        Self::with_rng(learning_rate, c, StdRng::from_entropy())
    }

    /// Same as [`Svm::new`] but with a fixed seed for reproducible weight
    /// initialization and epoch shuffling.
    pub fn with_seed(learning_rate: f64, c: f64, seed: u64) -> Self {
        Self::with_rng(learning_rate, c, StdRng::seed_from_u64(seed))
    }

    fn with_rng(learning_rate: f64, c: f64, rng: StdRng) -> Self {
        Self {
            learning_rate,
            c,
            weights: None,
            bias: 0.0,
            rng,
        }
    }

    /// Initialize the weight vector once, to small values in [0, 0.01).
    fn weights_mut(&mut self, input_size: usize) -> &mut Array1<f64> {
        let Self { weights, rng, .. } = self;
        weights.get_or_insert_with(|| Array1::random_using(input_size, Uniform::new(0.0, 0.01), rng))
    }

    /// Raw decision value `w · x + b`.
    fn decision(&mut self, inputs: &[f64]) -> f64 {
        let bias = self.bias;
        let weights = self.weights_mut(inputs.len());
        weights.iter().zip(inputs).map(|(w, x)| w * x).sum::<f64>() + bias
    }

    /// Predict the label: 1 if the decision value is non-negative, else 0.
    pub fn predict(&mut self, inputs: &[f64]) -> u8 {
        u8::from(self.decision(inputs) >= 0.0)
    }

    /// One epoch of per-sample sub-gradient descent on hinge loss.
    ///
    /// Samples inside the margin (or misclassified) pull the weights toward
    /// them scaled by `c`; every update also applies the `w / n` shrinkage
    /// term. An empty dataset is a no-op returning zeroed stats.
    pub fn train_epoch(&mut self, data: &[DataPoint]) -> EpochStats {
        if data.is_empty() {
            return EpochStats {
                average_loss: 0.0,
                accuracy: 0.0,
            };
        }

        self.weights_mut(data[0].inputs.len());

        let n = data.len() as f64;
        let lr = self.learning_rate;
        let c = self.c;
        let mut total_loss = 0.0;

        let mut indices: Vec<usize> = (0..data.len()).collect();
        indices.shuffle(&mut self.rng);

        for &idx in &indices {
            let point = &data[idx];
            let true_label = if point.label == 1 { 1.0 } else { -1.0 };
            let decision = self.decision(&point.inputs);

            let hinge_loss = (1.0 - true_label * decision).max(0.0);
            total_loss += hinge_loss;

            let weights = self
                .weights
                .as_mut()
                .expect("weights are initialized at the start of the epoch");

            if hinge_loss > 0.0 {
                for (w, &x) in weights.iter_mut().zip(point.inputs.iter()) {
                    *w += lr * (c * true_label * x - *w / n);
                }
                self.bias += lr * c * true_label;
            } else {
                weights.mapv_inplace(|w| w + lr * (-w / n));
            }
        }

        // Accuracy is recomputed over the post-epoch weights; a running count
        // would mix predictions made with different weights mid-epoch.
        EpochStats {
            average_loss: total_loss / n,
            accuracy: self.accuracy(data),
        }
    }

    /// Fraction of `data` predicted correctly; 0.0 for an empty slice.
    pub fn accuracy(&mut self, data: &[DataPoint]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }

        let mut correct = 0usize;
        for point in data {
            if self.predict(&point.inputs) == point.label {
                correct += 1;
            }
        }
        correct as f64 / data.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    /// Two clearly separated clusters around (2, 2) and (-2, -2).
    fn separable_clusters(seed: u64) -> Vec<DataPoint> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut data = Vec::new();
        for _ in 0..50 {
            data.push(DataPoint::new(
                2.0 + rng.gen::<f64>() - 0.5,
                2.0 + rng.gen::<f64>() - 0.5,
                1,
            ));
            data.push(DataPoint::new(
                -2.0 + rng.gen::<f64>() - 0.5,
                -2.0 + rng.gen::<f64>() - 0.5,
                0,
            ));
        }
        data
    }

    #[test]
    fn test_predict_is_binary() {
        let mut svm = Svm::with_seed(0.001, 1.0, 1);
        for inputs in [[0.0, 0.0], [1.0, -1.0], [-3.0, 2.0]] {
            let label = svm.predict(&inputs);
            assert!(label == 0 || label == 1);
        }
    }

    #[test]
    fn test_converges_on_separable_clusters() {
        let data = separable_clusters(7);
        let mut svm = Svm::with_seed(0.001, 1.0, 42);

        let mut stats = EpochStats {
            average_loss: 0.0,
            accuracy: 0.0,
        };
        for _ in 0..200 {
            stats = svm.train_epoch(&data);
        }

        assert!(stats.accuracy >= 0.95, "accuracy was {}", stats.accuracy);
        assert!(stats.average_loss < 1.0);
    }

    #[test]
    fn test_loss_shrinks_while_training() {
        let data = separable_clusters(11);
        let mut svm = Svm::with_seed(0.001, 1.0, 3);

        let first = svm.train_epoch(&data);
        let mut last = first;
        for _ in 0..99 {
            last = svm.train_epoch(&data);
        }
        assert!(last.average_loss < first.average_loss);
    }

    #[test]
    fn test_empty_dataset_is_a_no_op() {
        let mut svm = Svm::with_seed(0.001, 1.0, 5);
        let stats = svm.train_epoch(&[]);
        assert_eq!(stats.average_loss, 0.0);
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(svm.accuracy(&[]), 0.0);
    }

    #[test]
    fn test_weights_are_lazily_sized_once() {
        let mut svm = Svm::with_seed(0.001, 1.0, 9);
        svm.predict(&[1.0, 2.0]);
        let len = svm.weights.as_ref().map(|w| w.len());
        assert_eq!(len, Some(2));

        // Initialization happens only once.
        svm.train_epoch(&separable_clusters(1));
        assert_eq!(svm.weights.as_ref().map(|w| w.len()), Some(2));
        assert!(svm
            .weights
            .as_ref()
            .unwrap()
            .iter()
            .all(|w| w.is_finite()));
    }
}
