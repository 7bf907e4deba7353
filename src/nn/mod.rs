//! Neural Network Module
//!
//! Provides the building blocks for the visualizer's feedforward network:
//! - Activation functions (ReLU, Sigmoid, Tanh) and their derivatives
//! - Dense layers with cached forward state for backpropagation
//! - The full network with per-sample training and state snapshots

mod activation;
mod layer;
mod network;

pub use activation::ActivationKind;
pub use layer::Layer;
pub use network::{LayerState, NetworkState, NeuralNetwork, NeuronState};
