/// Word-embedding lookup table.
pub trait IWordEmbeddings: Send + Sync {
    /// Whether the table has a vector for `word`.
    fn is_known(&self, word: &str) -> bool;

    /// The vector of `word`, if known.
    fn word_vector(&self, word: &str) -> Option<&[f32]>;

    /// The dimensionality of every vector in the table.
    fn embedding_size(&self) -> usize;
}
