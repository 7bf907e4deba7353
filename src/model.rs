//! Algorithm selection and dispatch.
//!
//! The host picks one of three algorithms; the [`Model`] enum gives them a
//! common surface for prediction, per-epoch training, and visualization.

use serde::{Deserialize, Serialize};

use crate::data::types::DataPoint;
use crate::ml::{Knn, Svm};
use crate::nn::{NetworkState, NeuralNetwork};

/// The algorithms a session can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Algorithm {
    NeuralNetwork,
    Knn,
    Svm,
}

/// Metrics produced by one completed training epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochStats {
    pub average_loss: f64,
    pub accuracy: f64,
}

/// A live model instance of whichever algorithm is selected.
///
/// Instances are created fresh whenever the algorithm, dataset, or structural
/// hyperparameters change, and discarded on reset.
pub enum Model {
    NeuralNetwork(NeuralNetwork),
    Knn(Knn),
    Svm(Svm),
}

impl Model {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Model::NeuralNetwork(_) => Algorithm::NeuralNetwork,
            Model::Knn(_) => Algorithm::Knn,
            Model::Svm(_) => Algorithm::Svm,
        }
    }

    /// Score a query point in [0, 1]: the network's sigmoid output, or the
    /// predicted label for KNN and SVM. The classification threshold is 0.5
    /// for every variant.
    pub fn predict_score(&mut self, inputs: &[f64]) -> f64 {
        match self {
            Model::NeuralNetwork(nn) => nn.predict(inputs),
            Model::Knn(knn) => knn.predict(inputs) as f64,
            Model::Svm(svm) => svm.predict(inputs) as f64,
        }
    }

    /// Run one training epoch. KNN has no training step and returns `None`.
    pub fn train_epoch(&mut self, data: &[DataPoint]) -> Option<EpochStats> {
        match self {
            Model::NeuralNetwork(nn) => Some(nn.train_epoch(data)),
            Model::Knn(_) => None,
            Model::Svm(svm) => Some(svm.train_epoch(data)),
        }
    }

    /// Fraction of `data` classified correctly by the current parameters.
    pub fn accuracy(&mut self, data: &[DataPoint]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }

        match self {
            Model::Knn(knn) => knn.accuracy(data),
            Model::Svm(svm) => svm.accuracy(data),
            Model::NeuralNetwork(nn) => {
                let correct = data
                    .iter()
                    .filter(|point| nn.predict(&point.inputs).round() as u8 == point.label)
                    .count();
                correct as f64 / data.len() as f64
            }
        }
    }

    /// Score at which a query point flips class. The network emits a sigmoid
    /// score and KNN/SVM emit 0/1 labels, so the boundary sits at 0.5 for
    /// every variant.
    pub fn decision_threshold(&self) -> f64 {
        0.5
    }

    /// Visualization snapshot; only the network variant has one.
    pub fn network_state(&self) -> Option<NetworkState> {
        match self {
            Model::NeuralNetwork(nn) => Some(nn.state()),
            _ => None,
        }
    }
}
