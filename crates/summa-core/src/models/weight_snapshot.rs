use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_WEIGHT, MIN_WEIGHT};
use crate::errors::FeedbackError;

/// A validated concept → weight listing produced by a feedback store.
///
/// Every weight is finite and lies in `[0, 1]`; construction fails otherwise.
/// Entries are sorted by concept so iteration order is stable across calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightSnapshot {
    weights: Vec<(String, f64)>,
}

impl WeightSnapshot {
    /// Validate and wrap the weights reported by `store`.
    pub fn validated(store: &str, mut weights: Vec<(String, f64)>) -> Result<Self, FeedbackError> {
        if let Some((concept, weight)) = weights
            .iter()
            .find(|(_, w)| !w.is_finite() || *w < MIN_WEIGHT || *w > MAX_WEIGHT)
        {
            return Err(FeedbackError::WeightOutOfRange {
                store: store.to_string(),
                concept: concept.clone(),
                weight: *weight,
            });
        }
        weights.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Self { weights })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of a single concept.
    pub fn get(&self, concept: &str) -> Option<f64> {
        self.weights
            .binary_search_by(|(c, _)| c.as_str().cmp(concept))
            .ok()
            .map(|i| self.weights[i].1)
    }

    pub fn contains(&self, concept: &str) -> bool {
        self.get(concept).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(c, w)| (c.as_str(), *w))
    }

    /// Concepts ordered by descending weight, ties broken by concept.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        self.weights.iter().cloned().collect()
    }
}

impl IntoIterator for WeightSnapshot {
    type Item = (String, f64);
    type IntoIter = std::vec::IntoIter<(String, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.weights.into_iter()
    }
}
