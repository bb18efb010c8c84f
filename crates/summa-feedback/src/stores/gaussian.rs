//! Gaussian-blur propagation over the similarity graph.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::stable_graph::NodeIndex;
use serde_json::json;

use summa_core::config::GaussianConfig;
use summa_core::errors::SummaResult;
use summa_core::models::{GraphStats, Sentence, WeightSnapshot};
use summa_core::traits::IFeedbackStore;
use summa_core::{FlightRecorder, StoreKind};
use summa_embeddings::ConceptEmbedder;

use super::similarity_graph::{ConceptNode, SimilarityGraph};
use crate::graph::traversal::bfs_order;
use crate::snapshot::SimilarityGraphSnapshot;

/// Labels freeze a node, then each round pushes the label's mass onto it and
/// smooths every reachable unsettled node towards its neighbourhood.
pub struct WordEmbeddingGaussianFeedbackGraph {
    graph: SimilarityGraph,
    config: GaussianConfig,
}

impl WordEmbeddingGaussianFeedbackGraph {
    pub fn new(embedder: Arc<ConceptEmbedder>, config: GaussianConfig) -> Self {
        Self {
            graph: SimilarityGraph::new(StoreKind::WordEmbeddingGaussian, embedder, config.cut_off_threshold),
            config,
        }
    }

    fn blur(&mut self, focus: NodeIndex, mass: f64, rounds: usize) {
        for _ in 0..rounds {
            self.graph.append(focus, mass);

            for v in bfs_order(&self.graph.graph.graph, focus) {
                let current = self.graph.latest(v);
                if !(current > 0.0 && current < 1.0) || self.graph.is_frozen(v) {
                    continue;
                }
                let neighbors = self.graph.neighbors(v);
                let mut blurred = 0.0;
                if !neighbors.is_empty() {
                    blurred = neighbors
                        .iter()
                        .map(|&(n, similarity)| similarity * self.graph.latest(n))
                        .sum::<f64>()
                        / (neighbors.len() + 1) as f64;
                }
                self.graph.append(v, blurred);
            }
        }
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

impl IFeedbackStore for WordEmbeddingGaussianFeedbackGraph {
    fn kind(&self) -> StoreKind {
        StoreKind::WordEmbeddingGaussian
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
        let latest = recorder.latest();
        for concept in latest.accept() {
            if let Some(idx) = self.graph.freeze(concept, 1.0) {
                self.blur(idx, self.config.mass_accept, self.config.iterations_accept);
            }
        }
        for concept in latest.reject() {
            if let Some(idx) = self.graph.freeze(concept, 0.0) {
                self.blur(idx, self.config.mass_reject, self.config.iterations_reject);
            }
        }
        tracing::debug!(
            accepted = latest.accept().len(),
            rejected = latest.reject().len(),
            "gaussian feedback incorporated"
        );
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
            "cut_off_threshold": self.graph.cut_off_threshold(),
        })
    }
}
