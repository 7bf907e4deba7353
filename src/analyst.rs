//! AI analyst collaborator surface.
//!
//! The LLM call itself lives outside this crate; what lives here is the data
//! contract: the read-only context snapshot the analyst receives, the chat
//! message types, the reply shape, and the validation gate for datasets the
//! analyst synthesizes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LayerDefinition;
use crate::data::types::{DataPoint, TrainingHistory};
use crate::model::Algorithm;

/// Errors from the analyst collaborator. None of these are fatal: every
/// failure path leaves the session's dataset and model unchanged.
#[derive(Error, Debug)]
pub enum AnalystError {
    #[error("analyst backend failed: {0}")]
    Backend(String),

    #[error("generated dataset is empty")]
    EmptyDataset,

    #[error("malformed dataset: {0}")]
    MalformedDataset(String),
}

/// Result type alias for analyst operations
pub type AnalystResult<T> = Result<T, AnalystError>;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the analyst conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

/// The active algorithm's hyperparameters, flattened into the context JSON
/// under the same keys the control panel uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Hyperparameters {
    #[serde(rename_all = "camelCase")]
    NeuralNetwork {
        layers: Vec<LayerDefinition>,
        learning_rate: f64,
    },
    Knn { k: usize },
    #[serde(rename_all = "camelCase")]
    Svm { svm_c: f64, svm_learning_rate: f64 },
}

/// Read-only snapshot of the tool state, serialized into the analyst's
/// prompt. Built by `TrainingSession::analyst_context`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystContext {
    pub algorithm: Algorithm,
    pub dataset_name: String,
    pub epoch: usize,
    pub current_accuracy: f64,
    pub history: TrainingHistory,
    #[serde(flatten)]
    pub hyperparameters: Hyperparameters,
}

/// What the analyst backend returns for a prompt: free text to display
/// verbatim, or a request to synthesize a new dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalystReply {
    Text(String),
    GenerateDataset { description: String },
}

/// The external LLM integration implements this; the core only consumes it.
pub trait AnalystBackend {
    /// Answer a prompt given the tool context and prior conversation.
    fn respond(
        &mut self,
        prompt: &str,
        context: &AnalystContext,
        history: &[ChatMessage],
    ) -> AnalystResult<AnalystReply>;

    /// Synthesize a dataset from a natural-language description.
    fn synthesize_dataset(&mut self, description: &str) -> AnalystResult<Vec<DataPoint>>;
}

/// Well-formedness gate for analyst-synthesized datasets: non-empty, 2D
/// finite coordinates, labels in {0, 1}. A dataset is applied to a session
/// only after passing this check.
pub fn validate_dataset(points: &[DataPoint]) -> AnalystResult<()> {
    if points.is_empty() {
        return Err(AnalystError::EmptyDataset);
    }

    for (i, point) in points.iter().enumerate() {
        if point.inputs.len() != 2 {
            return Err(AnalystError::MalformedDataset(format!(
                "point {} has {} coordinates, expected 2",
                i,
                point.inputs.len()
            )));
        }
        if point.inputs.iter().any(|v| !v.is_finite()) {
            return Err(AnalystError::MalformedDataset(format!(
                "point {} has a non-finite coordinate",
                i
            )));
        }
        if point.label > 1 {
            return Err(AnalystError::MalformedDataset(format!(
                "point {} has label {}, expected 0 or 1",
                i, point.label
            )));
        }
    }

    Ok(())
}
