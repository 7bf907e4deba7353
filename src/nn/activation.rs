//! Activation Functions for Neural Networks
//!
//! Implements the activation functions available in the visualizer and their
//! derivatives for use in backpropagation.

use serde::{Deserialize, Serialize};

/// Types of activation functions available
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    /// Rectified Linear Unit: max(0, x)
    Relu,
    /// Sigmoid: 1 / (1 + exp(-x))
    Sigmoid,
    /// Hyperbolic tangent
    Tanh,
}

impl ActivationKind {
    /// Apply the activation function to a pre-activation value
    pub fn apply(self, x: f64) -> f64 {
        match self {
            ActivationKind::Relu => x.max(0.0),
            ActivationKind::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationKind::Tanh => x.tanh(),
        }
    }

    /// Derivative expressed in terms of the activation OUTPUT, not the
    /// pre-activation. The backward pass only has the cached layer outputs
    /// available, so the derivative must be computable from those.
    pub fn derivative_from_output(self, y: f64) -> f64 {
        match self {
            ActivationKind::Relu => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationKind::Sigmoid => y * (1.0 - y),
            ActivationKind::Tanh => 1.0 - y * y,
        }
    }
}
