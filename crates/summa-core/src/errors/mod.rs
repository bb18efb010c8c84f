mod embedding_error;
mod feedback_error;

pub use embedding_error::EmbeddingError;
pub use feedback_error::FeedbackError;

/// Workspace-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum SummaError {
    #[error("feedback error: {0}")]
    FeedbackError(#[from] FeedbackError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("configuration error: {reason}")]
    Config { reason: String },

    #[error("optimizer failed: {reason}")]
    Optimizer { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type SummaResult<T> = Result<T, SummaError>;
