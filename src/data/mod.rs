//! Datasets: shared sample types and the synthetic 2D generators.

pub mod generator;
pub mod types;

pub use generator::{generate, generate_with, DATASETS};
pub use types::{DataPoint, HistoryPoint, TrainingHistory};
