//! K-Nearest Neighbors classifier
//!
//! Classifies a query point by majority vote among the k closest stored
//! samples, using Euclidean distance. There are no trainable parameters;
//! fitting just stores the dataset.

use std::collections::HashMap;

use crate::data::types::DataPoint;

/// Euclidean distance between two points.
fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// KNN classifier over binary-labeled 2D samples.
#[derive(Debug, Clone)]
pub struct Knn {
    k: usize,
    data: Vec<DataPoint>,
}

impl Knn {
    /// Create a classifier considering `k` neighbors; `k` is clamped to at
    /// least 1.
    pub fn new(k: usize) -> Self {
        Self {
            k: k.max(1),
            data: Vec::new(),
        }
    }

    /// "Train" by storing the dataset. No computation happens here.
    pub fn fit(&mut self, data: &[DataPoint]) {
        self.data = data.to_vec();
    }

    /// Predict the label for a query point by majority vote among its k
    /// nearest stored neighbors. Returns 0 when nothing has been fitted.
    ///
    /// When two labels tie on votes the winner is unspecified.
    pub fn predict(&self, inputs: &[f64]) -> u8 {
        if self.data.is_empty() {
            return 0;
        }

        let mut distances: Vec<(f64, u8)> = self
            .data
            .iter()
            .map(|point| (euclidean_distance(inputs, &point.inputs), point.label))
            .collect();
        distances.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut votes: HashMap<u8, usize> = HashMap::new();
        for (_, label) in distances.iter().take(self.k) {
            *votes.entry(*label).or_insert(0) += 1;
        }

        votes
            .into_iter()
            .max_by_key(|&(_, count)| count)
            .map(|(label, _)| label)
            .unwrap_or(0)
    }

    /// Fraction of `data` for which `predict` returns the correct label;
    /// 0.0 for an empty slice.
    pub fn accuracy(&self, data: &[DataPoint]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }

        let correct = data
            .iter()
            .filter(|point| self.predict(&point.inputs) == point.label)
            .count();
        correct as f64 / data.len() as f64
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusters() -> Vec<DataPoint> {
        vec![
            DataPoint::new(1.0, 1.0, 0),
            DataPoint::new(1.0, 2.0, 0),
            DataPoint::new(2.0, 1.0, 0),
            DataPoint::new(5.0, 5.0, 1),
            DataPoint::new(5.0, 6.0, 1),
            DataPoint::new(6.0, 5.0, 1),
        ]
    }

    #[test]
    fn test_k_is_clamped_to_one() {
        assert_eq!(Knn::new(0).k(), 1);
        assert_eq!(Knn::new(7).k(), 7);
    }

    #[test]
    fn test_majority_vote_between_clusters() {
        let mut knn = Knn::new(3);
        knn.fit(&clusters());

        assert_eq!(knn.predict(&[1.5, 1.5]), 0);
        assert_eq!(knn.predict(&[5.5, 5.5]), 1);
    }

    #[test]
    fn test_exact_match_wins_with_k_one() {
        let mut knn = Knn::new(1);
        knn.fit(&clusters());

        // Distance zero always wins the vote.
        for point in clusters() {
            assert_eq!(knn.predict(&point.inputs), point.label);
        }
    }

    #[test]
    fn test_self_accuracy_is_perfect_with_k_one() {
        let data = clusters();
        let mut knn = Knn::new(1);
        knn.fit(&data);
        assert_eq!(knn.accuracy(&data), 1.0);
    }

    #[test]
    fn test_empty_dataset_defaults() {
        let knn = Knn::new(3);
        assert_eq!(knn.predict(&[0.0, 0.0]), 0);
        assert_eq!(knn.accuracy(&[]), 0.0);
    }
}
