//! # summa-feedback
//!
//! Concept-weighting models that absorb accept/reject feedback.
//!
//! - [`graph`]: indexed `StableGraph` wrapper plus PageRank, BFS, ego networks
//!   and shape statistics.
//! - [`stores`]: the six [`IFeedbackStore`](summa_core::traits::IFeedbackStore)
//!   variants and the [`build_store`] factory.
//! - [`snapshot`]: lossless export/import of similarity-graph state.

pub mod graph;
pub mod snapshot;
pub mod stores;

pub use snapshot::SimilarityGraphSnapshot;
pub use stores::{
    build_store, BaselineFeedbackStore, DiffusionTrace, PageRankFeedbackGraph,
    SimpleNgramFeedbackGraph, WordEmbeddingEgoPrFeedbackGraph, WordEmbeddingGaussianFeedbackGraph,
    WordEmbeddingRandomWalkDiffusionFeedbackGraph,
};
