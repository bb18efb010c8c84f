//! Concept embedding: the sum of the known word vectors of a concept.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use summa_core::errors::EmbeddingError;
use summa_core::traits::IWordEmbeddings;

use crate::cache::ConceptCache;

/// Embeds multi-word concepts against a word-vector table.
///
/// Results are cached by the space-joined word sequence for the embedder's
/// lifetime. Words missing from the table contribute nothing and are counted
/// in [`ConceptEmbedder::error_count`]; a cache hit never touches the counter.
pub struct ConceptEmbedder {
    embeddings: Arc<dyn IWordEmbeddings>,
    cache: ConceptCache,
    error_count: AtomicU64,
}

impl ConceptEmbedder {
    pub fn new(embeddings: Arc<dyn IWordEmbeddings>) -> Self {
        Self {
            embeddings,
            cache: ConceptCache::new(),
            error_count: AtomicU64::new(0),
        }
    }

    /// Vector of the concept formed by `words`, of length `embedding_size()`.
    /// A concept with no known word embeds to the zero vector.
    pub fn embed<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<f32>, EmbeddingError> {
        let key = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        if let Some(vector) = self.cache.get(&key) {
            return Ok(vector);
        }

        let size = self.embeddings.embedding_size();
        let mut sum = vec![0.0f32; size];
        for word in words.iter().map(AsRef::as_ref) {
            let vector = if self.embeddings.is_known(word) {
                self.embeddings.word_vector(&word.to_lowercase())
            } else {
                None
            };
            let Some(vector) = vector else {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(word = %word, "word missing from embedding table");
                continue;
            };
            if vector.len() != size {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: size,
                    actual: vector.len(),
                });
            }
            for (acc, v) in sum.iter_mut().zip(vector) {
                *acc += v;
            }
        }

        self.cache.insert(key, sum.clone());
        Ok(sum)
    }

    /// Number of word lookups that missed the table.
    pub fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Number of distinct concepts embedded so far.
    pub fn cache_len(&self) -> u64 {
        self.cache.len()
    }

    pub fn embedding_size(&self) -> usize {
        self.embeddings.embedding_size()
    }
}

impl std::fmt::Debug for ConceptEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptEmbedder")
            .field("embedding_size", &self.embedding_size())
            .field("error_count", &self.error_count())
            .finish()
    }
}
