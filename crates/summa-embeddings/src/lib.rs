//! # summa-embeddings
//!
//! Concept vectors for the similarity-graph feedback stores.
//!
//! - [`ConceptEmbedder`]: sums the word vectors of a concept's surface words,
//!   caching results by word sequence and counting unknown words.
//! - [`InMemoryWordEmbeddings`]: a word-vector table loaded from word2vec/GloVe text.
//! - [`similarity::cosine_similarity`]: edge weights of the similarity graph.

pub mod cache;
pub mod embedder;
pub mod similarity;
pub mod table;

pub use embedder::ConceptEmbedder;
pub use similarity::cosine_similarity;
pub use table::InMemoryWordEmbeddings;
