use std::collections::HashMap;

use crate::config::StoreKind;
use crate::errors::{FeedbackError, SummaResult};
use crate::models::{Sentence, WeightSnapshot};
use crate::recorder::FlightRecorder;

/// A concept-weighting model that absorbs accept/reject feedback.
///
/// Calls are strictly sequential: `add_sentences` completes before any
/// feedback is incorporated, and each `incorporate_feedback` completes before
/// the next `get_weights`.
pub trait IFeedbackStore: Send {
    /// The variant tag of this store.
    fn kind(&self) -> StoreKind;

    /// Build or extend the internal model from a batch of sentences, optionally
    /// seeded with raw concept weights normalized by `max_weight`.
    fn add_sentences(
        &mut self,
        sentences: &[Sentence],
        weights: Option<&HashMap<String, f64>>,
        max_weight: Option<f64>,
    ) -> SummaResult<()>;

    /// Fold the recorded feedback into the model. Which part of the history is
    /// read (latest round or union) depends on the store.
    fn incorporate_feedback(&mut self, recorder: &FlightRecorder) -> SummaResult<()>;

    /// Current weight of every tracked concept, each in `[0, 1]`.
    fn get_weights(&self) -> SummaResult<WeightSnapshot>;

    /// Parameters of this store as a JSON object, including its `"type"`.
    fn get_config(&self) -> serde_json::Value;
}

/// The normalizer for raw weights: the explicit `max_weight`, else the largest
/// supplied weight, else 1.0.
pub fn resolve_max_weight(
    weights: Option<&HashMap<String, f64>>,
    max_weight: Option<f64>,
) -> Result<f64, FeedbackError> {
    let resolved = match max_weight {
        Some(value) => value,
        None => weights
            .and_then(|w| w.values().copied().reduce(f64::max))
            .unwrap_or(1.0),
    };
    if !resolved.is_finite() || resolved <= 0.0 {
        return Err(FeedbackError::InvalidMaxWeight { value: resolved });
    }
    Ok(resolved)
}
