use serde::{Deserialize, Serialize};

use super::defaults;

/// How the next batch of concepts to label is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommenderKind {
    /// Every unlabelled concept of the current summary.
    #[default]
    Default,
    /// The unlabelled summary concepts with the highest store weight.
    HighestWeight,
}

/// Iteration driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Hard cap on feedback rounds.
    pub max_iteration_count: usize,
    /// Optimizer budget (words).
    pub summary_length: usize,
    /// Largest raw concept weight (e.g. the number of documents for DF weights).
    /// `None` derives it from the supplied weights.
    pub max_weight: Option<f64>,
    pub recommender: RecommenderKind,
    /// Concepts requested per round by the highest-weight recommender.
    pub recommendation_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_iteration_count: defaults::DEFAULT_MAX_ITERATION_COUNT,
            summary_length: defaults::DEFAULT_SUMMARY_LENGTH,
            max_weight: None,
            recommender: RecommenderKind::default(),
            recommendation_limit: defaults::DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}
