//! # ML Visualizer Core
//!
//! Trainable model layer for an educational 2D classification visualizer:
//! watch decision boundaries and training curves evolve as hyperparameters
//! change.
//!
//! ## Modules
//!
//! - `nn` - Feedforward neural network (layers, activations, per-sample SGD)
//! - `ml` - Classical algorithms (KNN, linear SVM)
//! - `data` - Sample types, training history, synthetic dataset generators
//! - `model` - Algorithm selection and common model dispatch
//! - `session` - Epoch-driving training session for the host loop
//! - `analyst` - Context and validation surface for the AI chat collaborator
//! - `config` - Hyperparameter bounds and defaults

pub mod analyst;
pub mod config;
pub mod data;
pub mod ml;
pub mod model;
pub mod nn;
pub mod session;

pub use analyst::{AnalystBackend, AnalystContext, AnalystError, AnalystReply, ChatMessage};
pub use config::LayerDefinition;
pub use data::types::{DataPoint, TrainingHistory};
pub use ml::{Knn, Svm};
pub use model::{Algorithm, EpochStats, Model};
pub use nn::{ActivationKind, NetworkState, NeuralNetwork};
pub use session::{SessionConfig, TrainingSession};
