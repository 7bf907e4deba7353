//! Core data types shared by the models and their collaborators.

use serde::{Deserialize, Serialize};

use crate::model::EpochStats;

/// A single labeled training sample: 2D coordinates plus a binary label.
///
/// Immutable once generated; owned by the caller and passed by reference into
/// training and prediction calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub inputs: Vec<f64>,
    pub label: u8,
}

impl DataPoint {
    pub fn new(x: f64, y: f64, label: u8) -> Self {
        Self {
            inputs: vec![x, y],
            label,
        }
    }
}

/// One recorded metric value, tagged with the epoch that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub epoch: usize,
    pub value: f64,
}

/// Append-only loss and accuracy curves, one entry per completed epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub loss: Vec<HistoryPoint>,
    pub accuracy: Vec<HistoryPoint>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the metrics of one completed epoch.
    pub fn record(&mut self, epoch: usize, stats: &EpochStats) {
        self.loss.push(HistoryPoint {
            epoch,
            value: stats.average_loss,
        });
        self.accuracy.push(HistoryPoint {
            epoch,
            value: stats.accuracy,
        });
    }

    /// Accuracy of the most recently recorded epoch, if any.
    pub fn latest_accuracy(&self) -> Option<f64> {
        self.accuracy.last().map(|p| p.value)
    }

    /// Number of epochs recorded so far.
    pub fn len(&self) -> usize {
        self.loss.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
    }

    pub fn clear(&mut self) {
        self.loss.clear();
        self.accuracy.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_both_curves() {
        let mut history = TrainingHistory::new();
        history.record(
            1,
            &EpochStats {
                average_loss: 0.5,
                accuracy: 0.6,
            },
        );
        history.record(
            2,
            &EpochStats {
                average_loss: 0.4,
                accuracy: 0.7,
            },
        );

        assert_eq!(history.len(), 2);
        assert_eq!(history.loss[1].epoch, 2);
        assert_eq!(history.latest_accuracy(), Some(0.7));

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.latest_accuracy(), None);
    }

    #[test]
    fn test_data_point_roundtrips_through_json() {
        let point = DataPoint::new(0.25, -1.5, 1);
        let json = serde_json::to_string(&point).unwrap();
        let back: DataPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
