//! Ego-network PageRank redistribution over the similarity graph.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::stable_graph::NodeIndex;
use serde_json::json;

use summa_core::config::EgoPrConfig;
use summa_core::errors::SummaResult;
use summa_core::models::{GraphStats, Sentence, WeightSnapshot};
use summa_core::traits::IFeedbackStore;
use summa_core::{FlightRecorder, StoreKind};
use summa_embeddings::ConceptEmbedder;

use super::similarity_graph::{ConceptNode, SimilarityGraph};
use crate::graph::pagerank::{pagerank_subgraph, PageRankParams};
use crate::graph::traversal::ego_nodes;
use crate::snapshot::SimilarityGraphSnapshot;

/// Labels freeze a node, then the taxed label mass is shared among its ego
/// network in proportion to similarity-weighted PageRank.
///
/// Reads the whole feedback history on every call, so repeated labels keep
/// adding mass.
pub struct WordEmbeddingEgoPrFeedbackGraph {
    graph: SimilarityGraph,
    config: EgoPrConfig,
}

impl WordEmbeddingEgoPrFeedbackGraph {
    pub fn new(embedder: Arc<ConceptEmbedder>, config: EgoPrConfig) -> Self {
        Self {
            graph: SimilarityGraph::new(StoreKind::WordEmbeddingEgoPr, embedder, config.cut_off_threshold),
            config,
        }
    }

    fn distribute(&mut self, focus: NodeIndex, mass: f64, depth: usize, rounds: usize) -> SummaResult<()> {
        let params = PageRankParams::from(&self.config);
        for _ in 0..rounds {
            let ego = ego_nodes(&self.graph.graph.graph, focus, depth);
            let ranks = pagerank_subgraph(&self.graph.graph.graph, &ego, |e| e.similarity, &params)?;

            for node in ego {
                if self.graph.is_frozen(node) {
                    continue;
                }
                let share = if node == focus {
                    mass * self.config.tax
                } else {
                    mass * self.config.tax * ranks.get(&node).copied().unwrap_or(0.0)
                };
                let current = self.graph.latest(node);
                self.graph.append(node, current + share);
            }
        }
        Ok(())
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

impl IFeedbackStore for WordEmbeddingEgoPrFeedbackGraph {
    fn kind(&self) -> StoreKind {
        StoreKind::WordEmbeddingEgoPr
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
        let union = recorder.union();
        for concept in union.accept() {
            if let Some(idx) = self.graph.freeze(concept, 1.0) {
                self.distribute(
                    idx,
                    self.config.mass_accept,
                    self.config.ego_pr_depth_accept,
                    self.config.iterations_accept,
                )?;
            }
        }
        for concept in union.reject() {
            if let Some(idx) = self.graph.freeze(concept, 0.0) {
                self.distribute(
                    idx,
                    self.config.mass_reject,
                    self.config.ego_pr_depth_reject,
                    self.config.iterations_reject,
                )?;
            }
        }
        tracing::debug!(
            accepted = union.accept().len(),
            rejected = union.reject().len(),
            "ego pagerank feedback incorporated"
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
            "ego_pr_depth_accept": self.config.ego_pr_depth_accept,
            "ego_pr_depth_reject": self.config.ego_pr_depth_reject,
            "tax": self.config.tax,
            "cut_off_threshold": self.graph.cut_off_threshold(),
        })
    }
}
