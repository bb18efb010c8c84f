use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{SummaError, SummaResult};

/// Which feedback store a session runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    #[default]
    Baseline,
    PageRank,
    SimpleNgram,
    WordEmbeddingGaussian,
    WordEmbeddingRandomWalk,
    WordEmbeddingEgoPr,
}

impl StoreKind {
    /// All kinds, in declaration order.
    pub const ALL: [StoreKind; 6] = [
        StoreKind::Baseline,
        StoreKind::PageRank,
        StoreKind::SimpleNgram,
        StoreKind::WordEmbeddingGaussian,
        StoreKind::WordEmbeddingRandomWalk,
        StoreKind::WordEmbeddingEgoPr,
    ];

    /// Type name reported by `get_config()`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "BaselineFeedbackStore",
            Self::PageRank => "PageRankFeedbackGraph",
            Self::SimpleNgram => "SimpleNgramFeedbackGraph",
            Self::WordEmbeddingGaussian => "WordEmbeddingGaussianFeedbackGraph",
            Self::WordEmbeddingRandomWalk => "WordEmbeddingRandomWalkDiffusionFeedbackGraph",
            Self::WordEmbeddingEgoPr => "WordEmbeddingEgoPrFeedbackGraph",
        }
    }

    /// Whether the store is built on the word-embedding similarity graph.
    pub fn needs_embeddings(&self) -> bool {
        matches!(
            self,
            Self::WordEmbeddingGaussian | Self::WordEmbeddingRandomWalk | Self::WordEmbeddingEgoPr
        )
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the baseline store interprets recorded feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleType {
    #[default]
    AcceptAll,
    RejectAll,
    AcceptReject,
    IlpFeedback,
    ActiveLearning,
    ActiveLearning2,
    #[serde(alias = "keeptrack")]
    KeepTrack,
    TopN,
}

impl OracleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptAll => "accept_all",
            Self::RejectAll => "reject_all",
            Self::AcceptReject => "accept_reject",
            Self::IlpFeedback => "ilp_feedback",
            Self::ActiveLearning => "active_learning",
            Self::ActiveLearning2 => "active_learning2",
            Self::KeepTrack => "keep_track",
            Self::TopN => "top_n",
        }
    }

    /// Presets that read only the most recent record.
    pub fn reads_latest(&self) -> bool {
        matches!(
            self,
            Self::AcceptReject | Self::IlpFeedback | Self::ActiveLearning | Self::ActiveLearning2
        )
    }
}

/// Shape of the concepts the oracle labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseType {
    /// Concepts are n-grams; labels apply directly.
    #[default]
    Ngrams,
    /// Concepts are parsed phrases; labels are projected onto n-gram concepts.
    Parse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    pub oracle_type: OracleType,
    pub parse_type: ParseType,
    /// Rank cut-off for [`OracleType::TopN`].
    pub top_n: usize,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            oracle_type: OracleType::default(),
            parse_type: ParseType::default(),
            top_n: defaults::DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Sliding window size over a sentence's concepts.
    pub n: usize,
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            n: defaults::DEFAULT_NGRAM_SIZE,
            damping: defaults::DEFAULT_DAMPING,
            max_iterations: defaults::DEFAULT_PAGERANK_MAX_ITERATIONS,
            tolerance: defaults::DEFAULT_PAGERANK_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NgramConfig {
    /// Window size over a sentence's tokens.
    pub n: usize,
    pub factor_accept: f64,
    pub factor_reject: f64,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            n: defaults::DEFAULT_NGRAM_SIZE,
            factor_accept: defaults::DEFAULT_FACTOR_ACCEPT,
            factor_reject: defaults::DEFAULT_FACTOR_REJECT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianConfig {
    /// Minimum cosine similarity (exclusive) for an edge.
    pub cut_off_threshold: f64,
    pub mass_accept: f64,
    pub mass_reject: f64,
    pub iterations_accept: usize,
    pub iterations_reject: usize,
}

impl Default for GaussianConfig {
    fn default() -> Self {
        Self {
            cut_off_threshold: defaults::DEFAULT_CUT_OFF_THRESHOLD,
            mass_accept: defaults::DEFAULT_MASS_ACCEPT,
            mass_reject: defaults::DEFAULT_MASS_REJECT,
            iterations_accept: defaults::DEFAULT_ITERATIONS_ACCEPT,
            iterations_reject: defaults::DEFAULT_ITERATIONS_REJECT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWalkConfig {
    pub cut_off_threshold: f64,
    pub mass_accept: f64,
    pub mass_reject: f64,
    /// Walks per accepted concept.
    pub iterations_accept: usize,
    /// Walks per rejected concept.
    pub iterations_reject: usize,
    /// A walk stops once its remaining mass drops to this (split across walks).
    pub propagation_abort_threshold: f64,
    /// Seed of the successor-sampling generator.
    pub seed: u64,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self {
            cut_off_threshold: defaults::DEFAULT_CUT_OFF_THRESHOLD,
            mass_accept: defaults::DEFAULT_MASS_ACCEPT,
            mass_reject: defaults::DEFAULT_MASS_REJECT,
            iterations_accept: defaults::DEFAULT_ITERATIONS_ACCEPT,
            iterations_reject: defaults::DEFAULT_ITERATIONS_REJECT,
            propagation_abort_threshold: defaults::DEFAULT_PROPAGATION_ABORT_THRESHOLD,
            seed: defaults::DEFAULT_RANDOM_SEED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EgoPrConfig {
    pub cut_off_threshold: f64,
    pub mass_accept: f64,
    pub mass_reject: f64,
    pub iterations_accept: usize,
    pub iterations_reject: usize,
    /// Ego-network radius around an accepted concept.
    pub ego_pr_depth_accept: usize,
    /// Ego-network radius around a rejected concept.
    pub ego_pr_depth_reject: usize,
    /// Fraction of the mass that is redistributed.
    pub tax: f64,
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for EgoPrConfig {
    fn default() -> Self {
        Self {
            cut_off_threshold: defaults::DEFAULT_CUT_OFF_THRESHOLD,
            mass_accept: defaults::DEFAULT_MASS_ACCEPT,
            mass_reject: defaults::DEFAULT_MASS_REJECT,
            iterations_accept: defaults::DEFAULT_ITERATIONS_ACCEPT,
            iterations_reject: defaults::DEFAULT_ITERATIONS_REJECT,
            ego_pr_depth_accept: defaults::DEFAULT_EGO_DEPTH,
            ego_pr_depth_reject: defaults::DEFAULT_EGO_DEPTH,
            tax: defaults::DEFAULT_TAX,
            damping: defaults::DEFAULT_DAMPING,
            max_iterations: defaults::DEFAULT_PAGERANK_MAX_ITERATIONS,
            tolerance: defaults::DEFAULT_PAGERANK_TOLERANCE,
        }
    }
}

/// Feedback store selection plus the parameters of every store.
/// Only the section matching `store` is read when building a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub store: StoreKind,
    pub baseline: BaselineConfig,
    pub pagerank: PageRankConfig,
    pub ngram: NgramConfig,
    pub gaussian: GaussianConfig,
    pub random_walk: RandomWalkConfig,
    pub ego_pr: EgoPrConfig,
}

impl FeedbackConfig {
    /// Defaults for every section, with the given store selected.
    pub fn for_store(store: StoreKind) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SummaResult<()> {
        let fail = |reason: &str| {
            Err(SummaError::Config {
                reason: reason.to_string(),
            })
        };
        if self.pagerank.n < 2 || self.ngram.n < 2 {
            return fail("n-gram window size must be at least 2");
        }
        if !(0.0..1.0).contains(&self.pagerank.damping) || !(0.0..1.0).contains(&self.ego_pr.damping)
        {
            return fail("pagerank damping must lie in [0, 1)");
        }
        if self.random_walk.iterations_accept == 0 || self.random_walk.iterations_reject == 0 {
            return fail("random walk iterations must be positive");
        }
        if self.random_walk.propagation_abort_threshold <= 0.0 {
            return fail("random walk abort threshold must be positive");
        }
        if !(0.0..=1.0).contains(&self.ego_pr.tax) {
            return fail("ego pagerank tax must lie in [0, 1]");
        }
        Ok(())
    }
}
