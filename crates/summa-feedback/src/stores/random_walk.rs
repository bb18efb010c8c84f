//! Random-walk mass diffusion over the similarity graph.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::stable_graph::NodeIndex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use serde_json::json;

use summa_core::config::RandomWalkConfig;
use summa_core::errors::SummaResult;
use summa_core::models::{GraphStats, Sentence, WeightSnapshot};
use summa_core::traits::IFeedbackStore;
use summa_core::{FlightRecorder, StoreKind};
use summa_embeddings::ConceptEmbedder;

use super::similarity_graph::{ConceptNode, SimilarityGraph};
use crate::snapshot::SimilarityGraphSnapshot;

/// Where one walk's budget ended up. The five sinks always add up to `budget`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DiffusionTrace {
    pub budget: f64,
    /// Added to unfrozen nodes.
    pub deposited: f64,
    /// Offered to frozen nodes, which keep their value.
    pub frozen_absorbed: f64,
    /// Cut off by the [0, 1] bound.
    pub saturated: f64,
    /// Lost to edge dissimilarity while moving.
    pub tolled: f64,
    /// Still undistributed when the walk dropped below the threshold.
    pub residual: f64,
    pub steps: usize,
}

impl DiffusionTrace {
    pub fn accounted(&self) -> f64 {
        self.deposited + self.frozen_absorbed + self.saturated + self.tolled + self.residual
    }
}

/// Labels freeze a node, then a number of random walks carry the label's mass
/// outwards. Each visited node keeps half of what arrives; each hop costs the
/// edge's dissimilarity.
pub struct WordEmbeddingRandomWalkDiffusionFeedbackGraph {
    graph: SimilarityGraph,
    config: RandomWalkConfig,
    rng: ChaCha20Rng,
    traces: Vec<DiffusionTrace>,
}

impl WordEmbeddingRandomWalkDiffusionFeedbackGraph {
    pub fn new(embedder: Arc<ConceptEmbedder>, config: RandomWalkConfig) -> Self {
        Self {
            graph: SimilarityGraph::new(
                StoreKind::WordEmbeddingRandomWalk,
                embedder,
                config.cut_off_threshold,
            ),
            rng: ChaCha20Rng::seed_from_u64(config.seed),
            config,
            traces: Vec::new(),
        }
    }

    /// Traces of the walks run by the last `incorporate_feedback`.
    pub fn traces(&self) -> &[DiffusionTrace] {
        &self.traces
    }

    fn diffuse(&mut self, focus: NodeIndex, mass: f64, walks: usize) {
        let walks = walks.max(1);
        let budget = mass / walks as f64;
        let threshold = self.config.propagation_abort_threshold / walks as f64;

        for _ in 0..walks {
            let mut trace = DiffusionTrace {
                budget,
                ..DiffusionTrace::default()
            };
            let mut source = focus;
            let mut remaining = budget;

            loop {
                if remaining.abs() <= threshold.abs() {
                    trace.residual = remaining;
                    break;
                }
                let Some((target, similarity)) = self.choose_successor(source) else {
                    self.deposit(source, remaining, &mut trace);
                    break;
                };
                let kept = remaining / 2.0;
                self.deposit(source, kept, &mut trace);
                let moving = remaining - kept;
                let carried = similarity * moving;
                trace.tolled += moving - carried;
                trace.steps += 1;
                remaining = carried;
                source = target;
            }

            tracing::trace!(?trace, "walk finished");
            self.traces.push(trace);
        }
    }

    fn deposit(&mut self, idx: NodeIndex, amount: f64, trace: &mut DiffusionTrace) {
        if self.graph.is_frozen(idx) {
            trace.frozen_absorbed += amount;
            return;
        }
        let before = self.graph.latest(idx);
        let written = self.graph.append(idx, before + amount);
        let applied = written - before;
        trace.deposited += applied;
        trace.saturated += amount - applied;
    }

    /// Sample a neighbour with probability proportional to edge similarity.
    fn choose_successor(&mut self, idx: NodeIndex) -> Option<(NodeIndex, f64)> {
        let neighbors = self.graph.neighbors(idx);
        let total: f64 = neighbors.iter().map(|&(_, s)| s).sum();
        if neighbors.is_empty() || total <= 0.0 {
            return None;
        }
        let r = self.rng.gen_range(0.0..=total);
        let mut cumulative = 0.0;
        for &(n, similarity) in &neighbors {
            cumulative += similarity;
            if r <= cumulative {
                return Some((n, similarity));
            }
        }
        neighbors.last().copied()
    }

    pub fn node(&self, concept: &str) -> Option<&ConceptNode> {
        self.graph.node(concept)
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }

    pub fn snapshot(&self) -> SimilarityGraphSnapshot {
        self.graph.snapshot()
    }

    pub fn restore(&mut self, snapshot: &SimilarityGraphSnapshot) {
        self.graph.restore(snapshot);
    }
}

impl IFeedbackStore for WordEmbeddingRandomWalkDiffusionFeedbackGraph {
    fn kind(&self) -> StoreKind {
        StoreKind::WordEmbeddingRandomWalk
    }

    fn add_sentences(
        &mut self,
        sentences: &[Sentence],
        weights: Option<&HashMap<String, f64>>,
        max_weight: Option<f64>,
    ) -> SummaResult<()> {
        self.graph.add_sentences(sentences, weights, max_weight)
    }

    fn incorporate_feedback(&mut self, recorder: &FlightRecorder) -> SummaResult<()> {
        self.traces.clear();
        let latest = recorder.latest();
        for concept in latest.accept() {
            if let Some(idx) = self.graph.freeze(concept, 1.0) {
                self.diffuse(idx, self.config.mass_accept, self.config.iterations_accept);
            }
        }
        for concept in latest.reject() {
            if let Some(idx) = self.graph.freeze(concept, 0.0) {
                self.diffuse(idx, self.config.mass_reject, self.config.iterations_reject);
            }
        }
        tracing::debug!(walks = self.traces.len(), "random walk feedback incorporated");
        Ok(())
    }

    fn get_weights(&self) -> SummaResult<WeightSnapshot> {
        self.graph.weights()
    }

    fn get_config(&self) -> serde_json::Value {
        json!({
            "type": self.kind().as_str(),
            "mass_accept": self.config.mass_accept,
            "iterations_accept": self.config.iterations_accept,
            "mass_reject": self.config.mass_reject,
            "iterations_reject": self.config.iterations_reject,
            "propagation_abort_threshold": self.config.propagation_abort_threshold,
            "cut_off_threshold": self.graph.cut_off_threshold(),
            "seed": self.config.seed,
        })
    }
}
