//! Training session: one model, one dataset, one history.
//!
//! The host's scheduling loop owns a `TrainingSession` and calls [`step`]
//! once per tick; each call is one atomic epoch. Changing the algorithm,
//! dataset, or structural hyperparameters rebuilds the model from scratch;
//! a model never outlives its configuration.
//!
//! [`step`]: TrainingSession::step

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analyst::{self, AnalystContext, AnalystResult, Hyperparameters};
use crate::config::{
    clamp_learning_rate, LayerDefinition, DEFAULT_K, DEFAULT_LEARNING_RATE, DEFAULT_SVM_C,
    DEFAULT_SVM_LEARNING_RATE, MAX_HIDDEN_LAYERS,
};
use crate::data::generator;
use crate::data::types::{DataPoint, TrainingHistory};
use crate::ml::{Knn, Svm};
use crate::model::{Algorithm, EpochStats, Model};
use crate::nn::{ActivationKind, NetworkState, NeuralNetwork};

/// Everything needed to build a session. Values are clamped on entry, so the
/// models themselves can trust their inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub algorithm: Algorithm,
    pub hidden_layers: Vec<LayerDefinition>,
    pub learning_rate: f64,
    pub k: usize,
    pub svm_c: f64,
    pub svm_learning_rate: f64,
    pub dataset: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::NeuralNetwork,
            hidden_layers: vec![
                LayerDefinition::new(4, ActivationKind::Relu),
                LayerDefinition::new(2, ActivationKind::Relu),
            ],
            learning_rate: DEFAULT_LEARNING_RATE,
            k: DEFAULT_K,
            svm_c: DEFAULT_SVM_C,
            svm_learning_rate: DEFAULT_SVM_LEARNING_RATE,
            dataset: "spiral".to_string(),
        }
    }
}

impl SessionConfig {
    /// Clamp every hyperparameter into its supported range.
    pub fn clamped(mut self) -> Self {
        self.hidden_layers.truncate(MAX_HIDDEN_LAYERS);
        for def in &mut self.hidden_layers {
            *def = def.clamped();
        }
        self.learning_rate = clamp_learning_rate(self.learning_rate);
        self.k = self.k.max(1);
        self
    }
}

/// A running training setup: the live model plus the state around it.
pub struct TrainingSession {
    config: SessionConfig,
    dataset_name: String,
    data: Vec<DataPoint>,
    model: Model,
    epoch: usize,
    history: TrainingHistory,
}

impl TrainingSession {
    /// Generate the configured dataset and build a fresh model for it.
    pub fn new(config: SessionConfig) -> Self {
        let config = config.clamped();
        let data = generator::generate(&config.dataset);
        let model = Self::build_model(&config, &data);

        info!(
            algorithm = ?config.algorithm,
            dataset = %config.dataset,
            samples = data.len(),
            "session started"
        );

        Self {
            dataset_name: config.dataset.clone(),
            data,
            model,
            epoch: 0,
            history: TrainingHistory::new(),
            config,
        }
    }

    fn build_model(config: &SessionConfig, data: &[DataPoint]) -> Model {
        match config.algorithm {
            Algorithm::NeuralNetwork => {
                let input_size = data.first().map(|p| p.inputs.len()).unwrap_or(2);
                // The output layer is always a single sigmoid neuron.
                let mut defs = config.hidden_layers.clone();
                defs.push(LayerDefinition::new(1, ActivationKind::Sigmoid));
                Model::NeuralNetwork(NeuralNetwork::new(
                    input_size,
                    &defs,
                    config.learning_rate,
                ))
            }
            Algorithm::Knn => {
                let mut knn = Knn::new(config.k);
                knn.fit(data);
                Model::Knn(knn)
            }
            Algorithm::Svm => Model::Svm(Svm::new(config.svm_learning_rate, config.svm_c)),
        }
    }

    /// One scheduled tick: train a single epoch, record it, and return the
    /// metrics. Runs to completion before returning; `None` for KNN, which
    /// has no training step.
    pub fn step(&mut self) -> Option<EpochStats> {
        let stats = self.model.train_epoch(&self.data)?;
        self.epoch += 1;
        self.history.record(self.epoch, &stats);

        debug!(
            epoch = self.epoch,
            average_loss = stats.average_loss,
            accuracy = stats.accuracy,
            "epoch complete"
        );
        Some(stats)
    }

    /// Discard the model and start over on the current dataset.
    pub fn reset(&mut self) {
        self.epoch = 0;
        self.history.clear();
        self.model = Self::build_model(&self.config, &self.data);
        info!(algorithm = ?self.config.algorithm, dataset = %self.dataset_name, "model reinitialized");
    }

    /// Switch to a named generator dataset and reinitialize.
    pub fn load_dataset(&mut self, name: &str) {
        self.config.dataset = name.to_string();
        self.dataset_name = name.to_string();
        self.data = generator::generate(name);
        self.reset();
    }

    /// Atomically replace the dataset with analyst-synthesized points.
    ///
    /// The points are validated first; on any error the current dataset,
    /// model, and history are left untouched. On success the dataset is
    /// swapped wholesale and the model reinitialized.
    pub fn replace_dataset(&mut self, label: &str, points: Vec<DataPoint>) -> AnalystResult<()> {
        analyst::validate_dataset(&points)?;

        self.data = points;
        self.dataset_name = label.chars().take(20).collect();
        self.reset();
        Ok(())
    }

    /// Score a query point with the live model (e.g. for decision-boundary
    /// sampling).
    pub fn predict(&mut self, inputs: &[f64]) -> f64 {
        self.model.predict_score(inputs)
    }

    /// Visualization snapshot of the network, when one is running.
    pub fn network_state(&self) -> Option<NetworkState> {
        self.model.network_state()
    }

    /// Read-only context snapshot for the analyst collaborator.
    pub fn analyst_context(&self) -> AnalystContext {
        // KNN never steps, so its accuracy comes from the fitted dataset
        // rather than the (empty) history.
        let current_accuracy = self.history.latest_accuracy().unwrap_or_else(|| {
            match &self.model {
                Model::Knn(knn) => knn.accuracy(&self.data),
                _ => 0.0,
            }
        });

        let hyperparameters = match self.config.algorithm {
            Algorithm::NeuralNetwork => Hyperparameters::NeuralNetwork {
                layers: self.config.hidden_layers.clone(),
                learning_rate: self.config.learning_rate,
            },
            Algorithm::Knn => Hyperparameters::Knn { k: self.config.k },
            Algorithm::Svm => Hyperparameters::Svm {
                svm_c: self.config.svm_c,
                svm_learning_rate: self.config.svm_learning_rate,
            },
        };

        AnalystContext {
            algorithm: self.config.algorithm,
            dataset_name: self.dataset_name.clone(),
            epoch: self.epoch,
            current_accuracy,
            history: self.history.clone(),
            hyperparameters,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }
}
