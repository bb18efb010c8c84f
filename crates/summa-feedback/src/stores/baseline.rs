//! Baseline store: concept weights are overwritten by labels.

use std::collections::{BTreeSet, HashMap};

use regex::{RegexSet, RegexSetBuilder};
use serde_json::json;

use summa_core::config::{BaselineConfig, OracleType, ParseType};
use summa_core::constants::{ACCEPT_VALUE, REJECT_VALUE};
use summa_core::errors::{FeedbackError, SummaResult};
use summa_core::models::{Sentence, WeightSnapshot};
use summa_core::traits::{resolve_max_weight, IFeedbackStore};
use summa_core::{FlightRecorder, StoreKind};

/// Raised compile limit for the phrase projection set, which holds one
/// pattern per tracked concept.
const PROJECTION_SIZE_LIMIT: usize = 256 * (1 << 20);

/// Normalized weights that labels set to 1.0 or 0.0 according to the
/// configured [`OracleType`] preset.
pub struct BaselineFeedbackStore {
    config: BaselineConfig,
    initial: HashMap<String, f64>,
    weights: HashMap<String, f64>,
    max_weight: Option<f64>,
    /// Concept keys in the order of `projection` patterns.
    concepts: Vec<String>,
    /// Word-boundary patterns of every tracked concept, built for `ParseType::Parse`.
    projection: Option<RegexSet>,
}

impl BaselineFeedbackStore {
    pub fn new(config: BaselineConfig) -> Self {
        Self {
            config,
            initial: HashMap::new(),
            weights: HashMap::new(),
            max_weight: None,
            concepts: Vec::new(),
            projection: None,
        }
    }

    fn set_all<'a>(&mut self, concepts: impl IntoIterator<Item = &'a String>, value: f64) {
        for concept in concepts {
            match self.weights.get_mut(concept) {
                Some(weight) => *weight = value,
                None => tracing::debug!(concept = %concept, "label for untracked concept skipped"),
            }
        }
    }

    fn build_projection(&mut self) -> SummaResult<()> {
        let mut concepts: Vec<String> = self.weights.keys().cloned().collect();
        concepts.sort();
        let patterns = concepts
            .iter()
            .map(|c| format!(r"\b{}\b", regex::escape(c)));
        let set = RegexSetBuilder::new(patterns)
            .size_limit(PROJECTION_SIZE_LIMIT)
            .build()
            .map_err(|e| FeedbackError::DegenerateNormalization {
                store: StoreKind::Baseline.to_string(),
                reason: format!("cannot compile phrase projection: {e}"),
            })?;
        self.concepts = concepts;
        self.projection = Some(set);
        Ok(())
    }

    /// Tracked concepts that occur in a labelled phrase as whole words, or that
    /// contain the phrase as whole words.
    fn project(&self, phrases: &BTreeSet<String>) -> BTreeSet<String> {
        let Some(set) = &self.projection else {
            return phrases.clone();
        };
        let mut projected = BTreeSet::new();
        for phrase in phrases {
            projected.extend(set.matches(phrase).iter().map(|i| self.concepts[i].clone()));
            if let Ok(phrase_re) = regex::Regex::new(&format!(r"\b{}\b", regex::escape(phrase))) {
                projected.extend(
                    self.concepts
                        .iter()
                        .filter(|c| phrase_re.is_match(c))
                        .cloned(),
                );
            }
        }
        projected
    }

    /// Labelled concepts, projected onto tracked concepts under `ParseType::Parse`.
    fn labelled(&self, concepts: &BTreeSet<String>) -> BTreeSet<String> {
        match self.config.parse_type {
            ParseType::Parse => self.project(concepts),
            ParseType::Ngrams => concepts.clone(),
        }
    }

    /// Top `top_n` concepts by weight, ties broken by concept.
    fn top_concepts(&self) -> BTreeSet<String> {
        let mut ranked: Vec<(&String, f64)> = self.weights.iter().map(|(k, &v)| (k, v)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(self.config.top_n)
            .map(|(k, _)| k.clone())
            .collect()
    }
}

impl IFeedbackStore for BaselineFeedbackStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Baseline
    }

    /// Tracks every weighted concept and every sentence concept. Concepts
    /// without a supplied weight start at `1 / max_weight`.
    fn add_sentences(
        &mut self,
        sentences: &[Sentence],
        weights: Option<&HashMap<String, f64>>,
        max_weight: Option<f64>,
    ) -> SummaResult<()> {
        let max_weight = resolve_max_weight(weights, max_weight)?;
        let mut normalized: HashMap<String, f64> = weights
            .map(|w| w.iter().map(|(k, v)| (k.clone(), v / max_weight)).collect())
            .unwrap_or_default();
        for concept in sentences.iter().flat_map(|s| s.concepts.iter()) {
            normalized
                .entry(concept.clone())
                .or_insert(1.0 / max_weight);
        }

        // Validate before touching state.
        let checked = WeightSnapshot::validated(
            StoreKind::Baseline.as_str(),
            normalized.iter().map(|(k, &v)| (k.clone(), v)).collect(),
        )?;

        self.weights.extend(checked);
        self.initial = self.weights.clone();
        self.max_weight = Some(max_weight);
        if self.config.parse_type == ParseType::Parse {
            self.build_projection()?;
        }
        tracing::debug!(concepts = self.weights.len(), max_weight, "baseline weights loaded");
        Ok(())
    }

    fn incorporate_feedback(&mut self, recorder: &FlightRecorder) -> SummaResult<()> {
        let union = recorder.union();
        let latest = recorder.latest();
        let parse = self.config.parse_type == ParseType::Parse;

        match self.config.oracle_type {
            OracleType::RejectAll => {
                self.set_all(union.reject(), REJECT_VALUE);
                if parse {
                    self.set_all(union.implicit_reject(), REJECT_VALUE);
                }
            }
            OracleType::AcceptAll => {
                self.set_all(union.accept(), ACCEPT_VALUE);
            }
            OracleType::AcceptReject
            | OracleType::IlpFeedback
            | OracleType::ActiveLearning
            | OracleType::ActiveLearning2 => {
                let reject = self.labelled(latest.reject());
                let accept = self.labelled(latest.accept());
                self.set_all(&reject, REJECT_VALUE);
                self.set_all(&accept, ACCEPT_VALUE);
                if parse {
                    self.set_all(latest.implicit_reject(), REJECT_VALUE);
                }
            }
            OracleType::KeepTrack => {
                // A rejection anywhere in the history outranks any acceptance.
                let accept = self.labelled(union.accept());
                let reject = self.labelled(union.reject());
                self.set_all(&accept, ACCEPT_VALUE);
                self.set_all(&reject, REJECT_VALUE);
                if parse {
                    self.set_all(latest.implicit_reject(), REJECT_VALUE);
                }
            }
            OracleType::TopN => {
                self.weights = self.initial.clone();
                self.set_all(union.reject(), REJECT_VALUE);
                self.set_all(union.accept(), ACCEPT_VALUE);
                let keep = self.top_concepts();
                for (concept, weight) in self.weights.iter_mut() {
                    if !keep.contains(concept) {
                        *weight = REJECT_VALUE;
                    }
                }
            }
        }
        tracing::debug!(
            oracle = self.config.oracle_type.as_str(),
            accepted = union.accept().len(),
            rejected = union.reject().len(),
            "baseline feedback incorporated"
        );
        Ok(())
    }

    fn get_weights(&self) -> SummaResult<WeightSnapshot> {
        let weights = self.weights.iter().map(|(k, &v)| (k.clone(), v)).collect();
        Ok(WeightSnapshot::validated(StoreKind::Baseline.as_str(), weights)?)
    }

    fn get_config(&self) -> serde_json::Value {
        json!({
            "type": self.kind().as_str(),
            "oracle": self.config.oracle_type.as_str(),
            "parse_type": self.config.parse_type,
            "top_n": self.config.top_n,
            "max_weight": self.max_weight,
            "had_initial_weights": !self.initial.is_empty(),
        })
    }
}
