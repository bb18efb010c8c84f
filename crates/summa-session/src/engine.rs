//! FeedbackSession: the iteration driver.
//!
//! Each round asks the oracle about the pending samples, records the labels,
//! lets the store absorb them, rescales the store weights into the optimizer's
//! weight map, solves for a new summary and picks the next samples from it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use summa_core::config::{SessionConfig, StoreKind, SummaConfig};
use summa_core::errors::{SummaError, SummaResult};
use summa_core::traits::{
    resolve_max_weight, IFeedbackStore, IOracle, IRecommender, ISummaryOptimizer,
};
use summa_core::{FlightRecorder, Sentence, WeightSnapshot};
use summa_embeddings::ConceptEmbedder;
use summa_feedback::build_store;

use crate::recommender::build_recommender;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The latest round produced no accepts or rejects.
    NoNewFeedback,
    /// The summary equals the known upper-bound selection.
    UpperBoundReached,
    /// `max_iteration_count` rounds have run.
    MaxIterations,
}

/// Outcome of one feedback round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    pub iteration: usize,
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
    /// Selected sentence indices, ascending.
    pub summary: Vec<usize>,
    pub summary_text: Vec<String>,
    /// Distinct concepts of the summary.
    pub concept_count: usize,
    /// Summary concepts without any label yet.
    pub unlabelled_count: usize,
    /// Samples for the next round.
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Full record of a finished session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub store: StoreKind,
    pub store_config: serde_json::Value,
    pub max_weight: f64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub stop_reason: StopReason,
    pub final_summary: Vec<usize>,
    pub iterations: Vec<IterationReport>,
    pub recorder: FlightRecorder,
}

/// Drives one store through feedback rounds until a stop condition holds.
pub struct FeedbackSession {
    id: Uuid,
    config: SessionConfig,
    store: Box<dyn IFeedbackStore>,
    recorder: FlightRecorder,
    oracle: Box<dyn IOracle>,
    optimizer: Box<dyn ISummaryOptimizer>,
    recommender: Box<dyn IRecommender>,
    sentences: Vec<Sentence>,
    /// Raw-scale weights handed to the optimizer.
    weights: HashMap<String, f64>,
    max_weight: f64,
    upper_bound: Option<Vec<usize>>,
    samples: Vec<String>,
    summary: Vec<usize>,
    iterations: Vec<IterationReport>,
    started_at: DateTime<Utc>,
}

impl FeedbackSession {
    /// Load `sentences` and their raw `weights` into `store` and prepare the
    /// first round. The first round has no samples, so it only produces the
    /// initial summary.
    pub fn new(
        config: SessionConfig,
        mut store: Box<dyn IFeedbackStore>,
        oracle: Box<dyn IOracle>,
        optimizer: Box<dyn ISummaryOptimizer>,
        sentences: Vec<Sentence>,
        weights: HashMap<String, f64>,
    ) -> SummaResult<Self> {
        let max_weight = resolve_max_weight(Some(&weights), config.max_weight)?;
        store.add_sentences(&sentences, Some(&weights), Some(max_weight))?;
        info!(
            store = %store.kind(),
            sentences = sentences.len(),
            concepts = weights.len(),
            max_weight,
            "feedback session prepared"
        );

        Ok(Self {
            id: Uuid::new_v4(),
            recommender: build_recommender(&config),
            config,
            store,
            recorder: FlightRecorder::new(),
            oracle,
            optimizer,
            sentences,
            weights,
            max_weight,
            upper_bound: None,
            samples: Vec::new(),
            summary: Vec::new(),
            iterations: Vec::new(),
            started_at: Utc::now(),
        })
    }

    /// Build the store and recommender from a full configuration.
    pub fn from_config(
        config: &SummaConfig,
        embedder: Option<Arc<ConceptEmbedder>>,
        oracle: Box<dyn IOracle>,
        optimizer: Box<dyn ISummaryOptimizer>,
        sentences: Vec<Sentence>,
        weights: HashMap<String, f64>,
    ) -> SummaResult<Self> {
        config.validate()?;
        let store = build_store(&config.feedback, embedder)?;
        Self::new(config.session.clone(), store, oracle, optimizer, sentences, weights)
    }

    pub fn with_recommender(mut self, recommender: Box<dyn IRecommender>) -> Self {
        self.recommender = recommender;
        self
    }

    /// Stop as soon as the summary equals `selection`.
    pub fn with_upper_bound(mut self, mut selection: Vec<usize>) -> Self {
        selection.sort_unstable();
        self.upper_bound = Some(selection);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn recorder(&self) -> &FlightRecorder {
        &self.recorder
    }

    pub fn weights(&self) -> &HashMap<String, f64> {
        &self.weights
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn summary(&self) -> &[usize] {
        &self.summary
    }

    /// Samples the oracle will see in the next round.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn iterations(&self) -> &[IterationReport] {
        &self.iterations
    }

    pub fn store(&self) -> &dyn IFeedbackStore {
        self.store.as_ref()
    }

    /// Run one feedback round.
    pub fn single_iteration(&mut self) -> SummaResult<&IterationReport> {
        let iteration = self.iterations.len();
        let _span = crate::iteration_span!(iteration).entered();

        let record = self.oracle.get_labels(&self.samples, &self.recorder)?;
        let accepted: Vec<String> = record.accept().iter().cloned().collect();
        let rejected: Vec<String> = record.reject().iter().cloned().collect();
        self.recorder.add_record(record);

        {
            let _span =
                crate::feedback_span!(self.store.kind(), accepted.len(), rejected.len()).entered();
            self.store.incorporate_feedback(&self.recorder)?;
        }
        let snapshot = self.store.get_weights()?;
        self.apply_weights(&snapshot);

        let summary = self.solve()?;
        let concepts = self.summary_concepts(&summary);
        let union = self.recorder.union();
        let unlabelled: Vec<String> = concepts
            .iter()
            .filter(|c| !union.contains(c))
            .cloned()
            .collect();
        let recommendations = self
            .recommender
            .recommend(&unlabelled, &snapshot, &self.recorder);

        info!(
            iteration,
            accepted = accepted.len(),
            rejected = rejected.len(),
            summary = ?summary,
            concepts = concepts.len(),
            unlabelled = unlabelled.len(),
            recommendations = recommendations.len(),
            "feedback iteration complete"
        );

        let report = IterationReport {
            iteration,
            accepted,
            rejected,
            summary_text: summary
                .iter()
                .map(|&i| self.sentences[i].untokenized_form.clone())
                .collect(),
            summary: summary.clone(),
            concept_count: concepts.len(),
            unlabelled_count: unlabelled.len(),
            recommendations: recommendations.clone(),
            timestamp: Utc::now(),
        };
        self.summary = summary;
        self.samples = recommendations;
        self.iterations.push(report);
        Ok(&self.iterations[iteration])
    }

    /// The stop condition that holds after the latest round, if any.
    pub fn stop_reason(&self) -> Option<StopReason> {
        let completed = self.iterations.len();
        if completed == 0 {
            return None;
        }
        if !self.recorder.latest().has_explicit_labels() && self.recorder.len() > 1 {
            return Some(StopReason::NoNewFeedback);
        }
        if self.upper_bound.as_deref() == Some(self.summary.as_slice()) {
            return Some(StopReason::UpperBoundReached);
        }
        if completed >= self.config.max_iteration_count {
            return Some(StopReason::MaxIterations);
        }
        None
    }

    /// Run rounds until a stop condition holds.
    pub fn run(&mut self) -> SummaResult<SessionReport> {
        let _span = crate::session_span!(self.id, self.store.kind()).entered();
        let stop_reason = loop {
            self.single_iteration()?;
            if let Some(reason) = self.stop_reason() {
                break reason;
            }
        };
        info!(
            session_id = %self.id,
            iterations = self.iterations.len(),
            ?stop_reason,
            accepted = self.recorder.union().accept().len(),
            rejected = self.recorder.union().reject().len(),
            "feedback session finished"
        );
        Ok(self.report(stop_reason))
    }

    pub fn report(&self, stop_reason: StopReason) -> SessionReport {
        SessionReport {
            session_id: self.id,
            store: self.store.kind(),
            store_config: self.store.get_config(),
            max_weight: self.max_weight,
            started_at: self.started_at,
            finished_at: Utc::now(),
            stop_reason,
            final_summary: self.summary.clone(),
            iterations: self.iterations.clone(),
            recorder: self.recorder.clone(),
        }
    }

    /// Rescale store weights to the raw scale. Concepts the optimizer does not
    /// know are ignored.
    fn apply_weights(&mut self, snapshot: &WeightSnapshot) {
        let mut ignored = 0usize;
        for (concept, weight) in snapshot.iter() {
            match self.weights.get_mut(concept) {
                Some(slot) => *slot = weight * self.max_weight,
                None => ignored += 1,
            }
        }
        if ignored > 0 {
            debug!(ignored, "store weights for unknown concepts ignored");
        }
    }

    fn solve(&self) -> SummaResult<Vec<usize>> {
        let _span = crate::solve_span!(self.config.summary_length, self.sentences.len()).entered();
        let mut summary =
            self.optimizer
                .solve(&self.weights, self.config.summary_length, &self.sentences)?;
        if let Some(&bad) = summary.iter().find(|&&i| i >= self.sentences.len()) {
            return Err(SummaError::Optimizer {
                reason: format!(
                    "selected sentence {bad} of {} sentences",
                    self.sentences.len()
                ),
            });
        }
        summary.sort_unstable();
        summary.dedup();
        Ok(summary)
    }

    /// Distinct concepts of the selected sentences, in order of occurrence.
    fn summary_concepts(&self, summary: &[usize]) -> Vec<String> {
        let mut seen = HashSet::new();
        summary
            .iter()
            .flat_map(|&i| self.sentences[i].concepts.iter())
            .filter(|c| seen.insert(c.as_str()))
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for FeedbackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackSession")
            .field("id", &self.id)
            .field("store", &self.store.kind())
            .field("sentences", &self.sentences.len())
            .field("max_weight", &self.max_weight)
            .field("iterations", &self.iterations.len())
            .finish()
    }
}
