use serde::{Deserialize, Serialize};

use super::defaults;

/// Word-embedding table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Path to a word2vec/GloVe text file.
    pub path: Option<String>,
    /// Expected vector dimensionality.
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            path: None,
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}
