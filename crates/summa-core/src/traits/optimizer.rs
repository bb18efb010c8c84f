use std::collections::HashMap;

use crate::errors::SummaResult;
use crate::models::Sentence;

/// Budgeted sentence selection (the concept ILP in production).
pub trait ISummaryOptimizer: Send + Sync {
    /// Select sentence indices maximizing the covered concept weight within
    /// `budget` words. Returned indices are ascending.
    fn solve(
        &self,
        weights: &HashMap<String, f64>,
        budget: usize,
        sentences: &[Sentence],
    ) -> SummaResult<Vec<usize>>;
}
