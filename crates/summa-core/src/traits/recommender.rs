use crate::models::WeightSnapshot;
use crate::recorder::FlightRecorder;

/// Chooses which summary concepts to ask the oracle about next.
pub trait IRecommender: Send + Sync {
    fn recommend(
        &self,
        samples: &[String],
        weights: &WeightSnapshot,
        recorder: &FlightRecorder,
    ) -> Vec<String>;
}
