/// Word-embedding errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("malformed embedding line {line}: {reason}")]
    ParseFailed { line: usize, reason: String },

    #[error("cannot read embeddings from {path}: {reason}")]
    Io { path: String, reason: String },
}
