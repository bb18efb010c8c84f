//! Feedback store variants and the factory that selects one by tag.

pub mod baseline;
pub mod ego_pr;
pub mod gaussian;
pub mod ngram;
pub mod pagerank;
pub mod random_walk;
pub mod similarity_graph;

use std::sync::Arc;

pub use baseline::BaselineFeedbackStore;
pub use ego_pr::WordEmbeddingEgoPrFeedbackGraph;
pub use gaussian::WordEmbeddingGaussianFeedbackGraph;
pub use ngram::SimpleNgramFeedbackGraph;
pub use pagerank::PageRankFeedbackGraph;
pub use random_walk::{DiffusionTrace, WordEmbeddingRandomWalkDiffusionFeedbackGraph};
pub use similarity_graph::{ConceptNode, SimilarityEdge};

use summa_core::config::{FeedbackConfig, StoreKind};
use summa_core::errors::{SummaError, SummaResult};
use summa_core::traits::IFeedbackStore;
use summa_embeddings::ConceptEmbedder;

/// Build the store selected by `config.store` from its config section.
/// The word-embedding stores need an embedder.
pub fn build_store(
    config: &FeedbackConfig,
    embedder: Option<Arc<ConceptEmbedder>>,
) -> SummaResult<Box<dyn IFeedbackStore>> {
    config.validate()?;
    let needs_embedder = || SummaError::Config {
        reason: format!("{} requires word embeddings", config.store),
    };
    let store: Box<dyn IFeedbackStore> = match config.store {
        StoreKind::Baseline => Box::new(BaselineFeedbackStore::new(config.baseline.clone())),
        StoreKind::PageRank => Box::new(PageRankFeedbackGraph::new(config.pagerank.clone())),
        StoreKind::SimpleNgram => Box::new(SimpleNgramFeedbackGraph::new(config.ngram.clone())),
        StoreKind::WordEmbeddingGaussian => Box::new(WordEmbeddingGaussianFeedbackGraph::new(
            embedder.ok_or_else(needs_embedder)?,
            config.gaussian.clone(),
        )),
        StoreKind::WordEmbeddingRandomWalk => {
            Box::new(WordEmbeddingRandomWalkDiffusionFeedbackGraph::new(
                embedder.ok_or_else(needs_embedder)?,
                config.random_walk.clone(),
            ))
        }
        StoreKind::WordEmbeddingEgoPr => Box::new(WordEmbeddingEgoPrFeedbackGraph::new(
            embedder.ok_or_else(needs_embedder)?,
            config.ego_pr.clone(),
        )),
    };
    tracing::debug!(store = %config.store, "feedback store built");
    Ok(store)
}
