//! Concept vector cache using moka.
//!
//! Unbounded and never expires: a concept's vector is a pure function of its
//! words and the table, so entries stay valid for the embedder's lifetime.

use moka::sync::Cache;

/// Concept vectors keyed by the space-joined word sequence.
pub struct ConceptCache {
    cache: Cache<String, Vec<f32>>,
}

impl ConceptCache {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, vector: Vec<f32>) {
        self.cache.insert(key, vector);
    }

    /// Number of cached concepts.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConceptCache {
    fn default() -> Self {
        Self::new()
    }
}
