//! Recommenders pick which summary concepts the oracle sees next.

use summa_core::config::{RecommenderKind, SessionConfig};
use summa_core::traits::IRecommender;
use summa_core::{FlightRecorder, WeightSnapshot};

/// Passes every sample through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRecommender;

impl IRecommender for DefaultRecommender {
    fn recommend(
        &self,
        samples: &[String],
        _weights: &WeightSnapshot,
        _recorder: &FlightRecorder,
    ) -> Vec<String> {
        samples.to_vec()
    }
}

/// Asks about the `limit` unlabelled samples the store currently weighs
/// highest. Samples the store does not track are never recommended.
#[derive(Debug, Clone, Copy)]
pub struct HighestWeightRecommender {
    limit: usize,
}

impl HighestWeightRecommender {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl IRecommender for HighestWeightRecommender {
    fn recommend(
        &self,
        samples: &[String],
        weights: &WeightSnapshot,
        recorder: &FlightRecorder,
    ) -> Vec<String> {
        let union = recorder.union();
        weights
            .ranked()
            .into_iter()
            .map(|(concept, _)| concept)
            .filter(|c| !union.contains(c))
            .filter(|c| samples.iter().any(|s| s.as_str() == *c))
            .take(self.limit)
            .map(str::to_string)
            .collect()
    }
}

/// The recommender selected by `config.recommender`.
pub fn build_recommender(config: &SessionConfig) -> Box<dyn IRecommender> {
    match config.recommender {
        RecommenderKind::Default => Box::new(DefaultRecommender),
        RecommenderKind::HighestWeight => {
            Box::new(HighestWeightRecommender::new(config.recommendation_limit))
        }
    }
}
