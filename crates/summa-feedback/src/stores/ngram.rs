//! Token bigram graph whose edge counts are reweighted by labels.

use std::collections::HashMap;

use petgraph::stable_graph::EdgeIndex;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use serde_json::json;

use summa_core::config::NgramConfig;
use summa_core::constants::NGRAM_SEPARATOR;
use summa_core::errors::{FeedbackError, SummaError, SummaResult};
use summa_core::models::{GraphStats, Sentence, WeightSnapshot};
use summa_core::traits::IFeedbackStore;
use summa_core::{FlightRecorder, StoreKind};

use crate::graph::stats::graph_stats;
use crate::graph::CountGraph;

/// Each n-token window adds one to the edge between its first two tokens.
/// Concept keys are the edge endpoints joined by a space.
pub struct SimpleNgramFeedbackGraph {
    graph: CountGraph,
    config: NgramConfig,
    counts: HashMap<(String, String), u64>,
}

impl SimpleNgramFeedbackGraph {
    pub fn new(config: NgramConfig) -> Self {
        Self {
            graph: CountGraph::new(),
            config,
            counts: HashMap::new(),
        }
    }

    /// Largest current edge weight; the clamp bound and normalizer. Zero for
    /// a graph without edges.
    pub fn max_weight(&self) -> f64 {
        self.graph
            .graph
            .edge_references()
            .map(|e| *e.weight())
            .fold(0.0, f64::max)
    }

    /// Raw weight of the edge for concept `u v`.
    pub fn edge_weight(&self, u: &str, v: &str) -> Option<f64> {
        self.graph.find_edge(u, v).map(|e| self.graph.graph[e])
    }

    pub fn stats(&self) -> GraphStats {
        graph_stats(self.kind().as_str(), &self.graph.graph, std::iter::empty())
    }

    /// Set the labelled edge to `value` and scale the other outgoing edges of
    /// both endpoints by `factor`, clamped to `[0, max]`.
    fn reweight(&mut self, key: &str, value: f64, factor: f64, max: f64) {
        let parts: Vec<&str> = key.split(NGRAM_SEPARATOR).collect();
        if parts.len() < 2 {
            tracing::debug!(concept = %key, "malformed n-gram label skipped");
            return;
        }
        let (u, v) = (parts[0], parts[1]);
        let (Some(ui), Some(vi)) = (self.graph.get_node(u), self.graph.get_node(v)) else {
            tracing::debug!(concept = %key, "label for unknown n-gram skipped");
            return;
        };
        let Some(edge) = self.graph.graph.find_edge(ui, vi) else {
            tracing::debug!(concept = %key, "label for unknown n-gram skipped");
            return;
        };
        self.graph.graph[edge] = value;

        let mut neighbours: Vec<EdgeIndex> = Vec::new();
        for (from, skip) in [(ui, vi), (vi, ui)] {
            neighbours.extend(
                self.graph
                    .graph
                    .edges_directed(from, Direction::Outgoing)
                    .filter(|e| e.target() != skip)
                    .map(|e| e.id()),
            );
        }
        for e in neighbours {
            let w = self.graph.graph[e];
            self.graph.graph[e] = (w * factor).clamp(0.0, max);
        }
    }
}

impl IFeedbackStore for SimpleNgramFeedbackGraph {
    fn kind(&self) -> StoreKind {
        StoreKind::SimpleNgram
    }

    /// Counts accumulate across calls; every counted edge is reset to its count.
    fn add_sentences(
        &mut self,
        sentences: &[Sentence],
        _weights: Option<&HashMap<String, f64>>,
        _max_weight: Option<f64>,
    ) -> SummaResult<()> {
        let n = self.config.n;
        if n < 2 {
            return Err(SummaError::Config {
                reason: format!("n-gram window size must be at least 2, got {n}"),
            });
        }
        for sentence in sentences {
            for token in &sentence.tokens {
                self.graph.ensure_node(token, || token.clone());
            }
            for window in sentence.tokens.windows(n) {
                *self
                    .counts
                    .entry((window[0].clone(), window[1].clone()))
                    .or_insert(0) += 1;
            }
        }

        for ((u, v), &count) in &self.counts {
            let (Some(a), Some(b)) = (self.graph.get_node(u), self.graph.get_node(v)) else {
                continue;
            };
            self.graph.graph.update_edge(a, b, count as f64);
        }
        tracing::debug!(
            tokens = self.graph.node_count(),
            edges = self.graph.edge_count(),
            max_weight = self.max_weight(),
            "n-gram graph built"
        );
        Ok(())
    }

    /// Reads only the most recent round.
    fn incorporate_feedback(&mut self, recorder: &FlightRecorder) -> SummaResult<()> {
        let latest = recorder.latest();
        for key in latest.accept() {
            let max = self.max_weight();
            self.reweight(key, max, self.config.factor_accept, max);
        }
        for key in latest.reject() {
            let max = self.max_weight();
            self.reweight(key, 0.0, self.config.factor_reject, max);
        }
        Ok(())
    }

    fn get_weights(&self) -> SummaResult<WeightSnapshot> {
        let store = self.kind().as_str();
        if self.graph.edge_count() == 0 {
            return Err(FeedbackError::EmptyGraph {
                store: store.to_string(),
            }
            .into());
        }
        let max = self.max_weight();
        if max <= 0.0 {
            return Err(FeedbackError::DegenerateNormalization {
                store: store.to_string(),
                reason: "every edge weight is zero".to_string(),
            }
            .into());
        }
        let weights = self
            .graph
            .graph
            .edge_references()
            .filter_map(|e| {
                let u = self.graph.key(e.source())?;
                let v = self.graph.key(e.target())?;
                Some((format!("{u}{NGRAM_SEPARATOR}{v}"), e.weight() / max))
            })
            .collect();
        Ok(WeightSnapshot::validated(store, weights)?)
    }

    fn get_config(&self) -> serde_json::Value {
        json!({
            "type": self.kind().as_str(),
            "N": self.config.n,
            "multiplier_accept": self.config.factor_accept,
            "multiplier_reject": self.config.factor_reject,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_are_scaled_and_clamped() {
        let mut store = SimpleNgramFeedbackGraph::new(NgramConfig::default());
        let sentences = [
            Sentence::from_text("a b"),
            Sentence::from_text("a b"),
            Sentence::from_text("a b"),
            Sentence::from_text("a c"),
            Sentence::from_text("a c"),
            Sentence::from_text("b d"),
        ];
        store.add_sentences(&sentences, None, None).unwrap();
        assert_eq!(store.max_weight(), 3.0);

        let mut recorder = FlightRecorder::new();
        recorder
            .record(vec!["a b"], Vec::<&str>::new(), Vec::<&str>::new())
            .unwrap();
        store.incorporate_feedback(&recorder).unwrap();

        assert_eq!(store.edge_weight("a", "b"), Some(3.0));
        // 2 * 2.0 clamped to the max count
        assert_eq!(store.edge_weight("a", "c"), Some(3.0));
        assert_eq!(store.edge_weight("b", "d"), Some(2.0));
    }

    #[test]
    fn reject_scales_down() {
        let mut store = SimpleNgramFeedbackGraph::new(NgramConfig::default());
        store
            .add_sentences(&[Sentence::from_text("a b c"), Sentence::from_text("b c")], None, None)
            .unwrap();
        let mut recorder = FlightRecorder::new();
        recorder
            .record(Vec::<&str>::new(), vec!["a b"], Vec::<&str>::new())
            .unwrap();
        store.incorporate_feedback(&recorder).unwrap();
        assert_eq!(store.edge_weight("a", "b"), Some(0.0));
        assert_eq!(store.edge_weight("b", "c"), Some(1.0));
    }

    #[test]
    fn malformed_and_unknown_labels_are_ignored() {
        let mut store = SimpleNgramFeedbackGraph::new(NgramConfig::default());
        store
            .add_sentences(&[Sentence::from_text("x y")], None, None)
            .unwrap();
        let mut recorder = FlightRecorder::new();
        recorder
            .record(vec!["x", "y x"], vec!["q r"], Vec::<&str>::new())
            .unwrap();
        store.incorporate_feedback(&recorder).unwrap();
        assert_eq!(store.get_weights().unwrap().get("x y"), Some(1.0));
    }

    #[test]
    fn empty_graph_cannot_normalize() {
        let store = SimpleNgramFeedbackGraph::new(NgramConfig::default());
        assert!(store.get_weights().is_err());
    }
}
