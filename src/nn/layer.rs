//! Dense (Fully Connected) Layer Implementation
//!
//! A layer performs: output = activation(weights · input + bias), one row of
//! the weight matrix per neuron.

use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

use super::activation::ActivationKind;

/// Dense layer with weights, biases, and an activation function.
///
/// The weight matrix has shape `(output_size, input_size)`: row `j` holds the
/// incoming weights of neuron `j`. Weights and biases are mutated only by the
/// owning network's training step, never by `forward`.
pub struct Layer {
    /// Weight matrix (output_size x input_size)
    pub weights: Array2<f64>,
    /// Bias vector (output_size)
    pub biases: Array1<f64>,
    /// Activation function applied to each neuron
    pub activation: ActivationKind,

    // Cached values from the most recent forward pass, consumed by the
    // immediately following backward pass.
    pub(crate) last_inputs: Option<Array1<f64>>,
    pub(crate) last_outputs: Option<Array1<f64>>,
}

impl Layer {
    /// Create a new layer with weights and biases drawn uniformly from [-1, 1).
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: ActivationKind,
        rng: &mut R,
    ) -> Self {
        let weights =
            Array2::random_using((output_size, input_size), Uniform::new(-1.0, 1.0), rng);
        let biases = Array1::random_using(output_size, Uniform::new(-1.0, 1.0), rng);

        Self {
            weights,
            biases,
            activation,
            last_inputs: None,
            last_outputs: None,
        }
    }

    /// Number of neurons in this layer
    pub fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    /// Size of the input vector this layer expects
    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Forward pass: weighted sum plus bias per neuron, then activation.
    ///
    /// Caches the input and output vectors for the backward pass, overwriting
    /// whatever the previous call cached. Not reentrant.
    pub fn forward(&mut self, inputs: &Array1<f64>) -> Array1<f64> {
        let z = self.weights.dot(inputs) + &self.biases;
        let activation = self.activation;
        let outputs = z.mapv(|v| activation.apply(v));

        self.last_inputs = Some(inputs.clone());
        self.last_outputs = Some(outputs.clone());
        outputs
    }

    /// Activations from the most recent forward pass, empty if the layer has
    /// not been evaluated yet.
    pub fn activations(&self) -> Vec<f64> {
        self.last_outputs
            .as_ref()
            .map(|o| o.to_vec())
            .unwrap_or_default()
    }
}
