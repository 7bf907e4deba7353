//! Neural Network Implementation
//!
//! Feedforward network trained with fully online (per-sample) stochastic
//! gradient descent, as displayed by the visualizer.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use super::layer::Layer;
use crate::config::LayerDefinition;
use crate::data::types::DataPoint;
use crate::model::EpochStats;

/// Activation of a single neuron, as of the most recent forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeuronState {
    pub activation: f64,
}

/// Snapshot of one layer's neurons, weights, and biases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerState {
    pub neurons: Vec<NeuronState>,
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

/// Deep-copied snapshot of the whole network, for visualization. Never
/// aliases the live layer state that training continues to mutate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkState {
    pub layers: Vec<LayerState>,
}

/// Feedforward neural network for binary classification.
///
/// The final layer definition is expected to be a single sigmoid neuron, so
/// `predict` returns a decision score in (0, 1).
pub struct NeuralNetwork {
    pub layers: Vec<Layer>,
    learning_rate: f64,
    rng: StdRng,
}

impl NeuralNetwork {
    /// Build one layer per definition; layer `i`'s input size is layer
    /// `i - 1`'s neuron count (or `input_size` for the first layer).
    pub fn new(input_size: usize, layer_defs: &[LayerDefinition], learning_rate: f64) -> Self {
        Self::with_rng(input_size, layer_defs, learning_rate, StdRng::from_entropy())
    }

    /// Same as [`NeuralNetwork::new`] but with a fixed seed, so weight
    /// initialization and epoch shuffling are reproducible.
    pub fn with_seed(
        input_size: usize,
        layer_defs: &[LayerDefinition],
        learning_rate: f64,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            input_size,
            layer_defs,
            learning_rate,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        input_size: usize,
        layer_defs: &[LayerDefinition],
        learning_rate: f64,
        mut rng: StdRng,
    ) -> Self {
        let mut layers = Vec::with_capacity(layer_defs.len());
        let mut current_input = input_size;

        for def in layer_defs {
            layers.push(Layer::new(current_input, def.neurons, def.activation, &mut rng));
            current_input = def.neurons;
        }

        Self {
            layers,
            learning_rate,
            rng,
        }
    }

    /// Run a forward pass through every layer and return the single output of
    /// the last layer. Only the per-layer forward caches are mutated.
    pub fn predict(&mut self, inputs: &[f64]) -> f64 {
        let mut current = Array1::from(inputs.to_vec());
        for layer in &mut self.layers {
            current = layer.forward(&current);
        }
        current[0]
    }

    /// One epoch of per-sample stochastic gradient descent over `data`.
    ///
    /// The dataset is visited in a freshly shuffled order (the caller's slice
    /// is left untouched); every sample triggers a full forward pass, and the
    /// weight updates are applied immediately during the backward pass. Loss
    /// is the squared signed error `label - output`, accuracy counts samples
    /// where the rounded output matches the label.
    ///
    /// An empty dataset yields NaN for both metrics; callers must not pass
    /// one.
    pub fn train_epoch(&mut self, data: &[DataPoint]) -> EpochStats {
        let mut total_loss = 0.0;
        let mut correct = 0usize;

        let mut indices: Vec<usize> = (0..data.len()).collect();
        indices.shuffle(&mut self.rng);

        for &idx in &indices {
            let point = &data[idx];
            let output = self.predict(&point.inputs);
            let label = point.label as f64;

            let error = label - output;
            total_loss += error * error;
            if output.round() == label {
                correct += 1;
            }

            self.backward(error);
        }

        let n = data.len() as f64;
        EpochStats {
            average_loss: total_loss / n,
            accuracy: correct as f64 / n,
        }
    }

    /// Backward pass, strictly layer-by-layer from output to input, consuming
    /// the forward caches left by the preceding `predict` call.
    fn backward(&mut self, output_error: f64) {
        let lr = self.learning_rate;
        let mut errors = Array1::from_elem(1, output_error);

        for layer in self.layers.iter_mut().rev() {
            let outputs = layer
                .last_outputs
                .as_ref()
                .expect("backward pass requires a preceding forward pass")
                .clone();
            let inputs = layer
                .last_inputs
                .as_ref()
                .expect("backward pass requires a preceding forward pass")
                .clone();

            let activation = layer.activation;
            let gradients = &errors * &outputs.mapv(|y| activation.derivative_from_output(y));

            // Propagate the error signal with the pre-update weights before
            // touching them.
            let prev_errors = layer.weights.t().dot(&gradients);

            for (j, &gradient) in gradients.iter().enumerate() {
                layer.weights.row_mut(j).scaled_add(lr * gradient, &inputs);
                layer.biases[j] += lr * gradient;
            }

            errors = prev_errors;
        }
    }

    /// Deep-copied snapshot of every layer's activations, weights, and
    /// biases. Mutating the network afterwards does not alter the snapshot.
    pub fn state(&self) -> NetworkState {
        NetworkState {
            layers: self
                .layers
                .iter()
                .map(|layer| LayerState {
                    neurons: layer
                        .activations()
                        .into_iter()
                        .map(|activation| NeuronState { activation })
                        .collect(),
                    weights: layer.weights.outer_iter().map(|row| row.to_vec()).collect(),
                    biases: layer.biases.to_vec(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::activation::ActivationKind;

    fn layer(neurons: usize, activation: ActivationKind) -> LayerDefinition {
        LayerDefinition {
            neurons,
            activation,
        }
    }

    fn xor_data() -> Vec<DataPoint> {
        vec![
            DataPoint::new(1.0, 1.0, 1),
            DataPoint::new(1.0, -1.0, 0),
            DataPoint::new(-1.0, 1.0, 0),
            DataPoint::new(-1.0, -1.0, 1),
        ]
    }

    fn separable_data() -> Vec<DataPoint> {
        vec![
            DataPoint::new(1.0, 1.0, 1),
            DataPoint::new(1.2, 0.8, 1),
            DataPoint::new(0.8, 1.3, 1),
            DataPoint::new(-1.0, -1.0, 0),
            DataPoint::new(-1.2, -0.7, 0),
            DataPoint::new(-0.9, -1.3, 0),
        ]
    }

    #[test]
    fn test_construction_chains_layer_sizes() {
        let defs = [
            layer(4, ActivationKind::Relu),
            layer(2, ActivationKind::Tanh),
            layer(1, ActivationKind::Sigmoid),
        ];
        let nn = NeuralNetwork::with_seed(2, &defs, 0.03, 1);
        assert_eq!(nn.layers.len(), 3);
        assert_eq!(nn.layers[0].input_size(), 2);
        assert_eq!(nn.layers[0].output_size(), 4);
        assert_eq!(nn.layers[1].input_size(), 4);
        assert_eq!(nn.layers[2].input_size(), 2);
        assert_eq!(nn.layers[2].output_size(), 1);
    }

    #[test]
    fn test_predict_is_a_sigmoid_score() {
        let defs = [layer(3, ActivationKind::Relu), layer(1, ActivationKind::Sigmoid)];
        let mut nn = NeuralNetwork::with_seed(2, &defs, 0.03, 2);
        let score = nn.predict(&[0.5, -0.5]);
        assert!((0.0..1.0).contains(&score));
    }

    #[test]
    fn test_training_converges_on_separable_data() {
        let defs = [layer(1, ActivationKind::Sigmoid)];
        let mut nn = NeuralNetwork::with_seed(2, &defs, 0.5, 42);
        let data = separable_data();

        let first = nn.train_epoch(&data);
        let mut last = first;
        for _ in 0..499 {
            last = nn.train_epoch(&data);
        }

        assert!(last.accuracy >= 0.9, "accuracy was {}", last.accuracy);
        assert!(last.average_loss < first.average_loss);
    }

    #[test]
    fn test_xor_needs_a_hidden_layer() {
        let data = xor_data();

        // With a relu hidden layer the network can carve out the XOR regions.
        let mut best = 0.0f64;
        for seed in 0..5 {
            let defs = [layer(4, ActivationKind::Relu), layer(1, ActivationKind::Sigmoid)];
            let mut nn = NeuralNetwork::with_seed(2, &defs, 0.1, seed);
            let mut accuracy = 0.0;
            for _ in 0..2000 {
                accuracy = nn.train_epoch(&data).accuracy;
            }
            best = best.max(accuracy);
            if best == 1.0 {
                break;
            }
        }
        assert_eq!(best, 1.0);

        // A direct linear mapping cannot get all four points right.
        let defs = [layer(1, ActivationKind::Sigmoid)];
        let mut linear = NeuralNetwork::with_seed(2, &defs, 0.1, 42);
        let mut accuracy = 0.0;
        for _ in 0..2000 {
            accuracy = linear.train_epoch(&data).accuracy;
        }
        assert!(accuracy <= 0.75, "linear model reached {}", accuracy);
    }

    #[test]
    fn test_empty_dataset_yields_nan_metrics() {
        let defs = [layer(1, ActivationKind::Sigmoid)];
        let mut nn = NeuralNetwork::with_seed(2, &defs, 0.03, 5);
        let stats = nn.train_epoch(&[]);
        assert!(stats.average_loss.is_nan());
        assert!(stats.accuracy.is_nan());
    }

    #[test]
    fn test_state_is_a_deep_copy() {
        let defs = [layer(2, ActivationKind::Relu), layer(1, ActivationKind::Sigmoid)];
        let mut nn = NeuralNetwork::with_seed(2, &defs, 0.5, 9);
        nn.predict(&[0.3, 0.9]);

        let snapshot = nn.state();
        let frozen = snapshot.clone();

        for _ in 0..10 {
            nn.train_epoch(&separable_data());
        }

        // The earlier snapshot is untouched by further training...
        assert_eq!(snapshot, frozen);
        // ...while the live network has moved on.
        assert_ne!(nn.state().layers[0].weights, snapshot.layers[0].weights);
    }

    #[test]
    fn test_state_before_any_forward_has_no_activations() {
        let defs = [layer(3, ActivationKind::Tanh), layer(1, ActivationKind::Sigmoid)];
        let nn = NeuralNetwork::with_seed(2, &defs, 0.03, 4);
        let state = nn.state();
        assert!(state.layers.iter().all(|l| l.neurons.is_empty()));
        assert_eq!(state.layers[0].weights.len(), 3);
    }
}
