/// Feedback store errors.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("{store} produced weight {weight} for '{concept}', outside [0, 1]")]
    WeightOutOfRange {
        store: String,
        concept: String,
        weight: f64,
    },

    #[error("{store} has no nodes or edges to normalize against")]
    EmptyGraph { store: String },

    #[error("{store} cannot normalize weights: {reason}")]
    DegenerateNormalization { store: String, reason: String },

    #[error("max weight must be positive, got {value}")]
    InvalidMaxWeight { value: f64 },

    #[error("pagerank did not converge within {iterations} iterations")]
    PageRankNotConverged { iterations: usize },

    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },
}
