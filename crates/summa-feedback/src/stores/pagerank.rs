//! PageRank over the concept co-occurrence graph.

use std::collections::{HashMap, HashSet};

use serde_json::json;

use summa_core::config::PageRankConfig;
use summa_core::errors::{FeedbackError, SummaError, SummaResult};
use summa_core::models::{GraphStats, Sentence, WeightSnapshot};
use summa_core::traits::IFeedbackStore;
use summa_core::{FlightRecorder, StoreKind};

use crate::graph::pagerank::{pagerank, PageRankParams};
use crate::graph::stats::graph_stats;
use crate::graph::CountGraph;

/// Concepts co-occurring within a window of `n` concepts are linked, earlier
/// to later. Rejected concepts are deleted for good.
pub struct PageRankFeedbackGraph {
    graph: CountGraph,
    config: PageRankConfig,
    ranks: HashMap<String, f64>,
    removed: HashSet<String>,
}

impl PageRankFeedbackGraph {
    pub fn new(config: PageRankConfig) -> Self {
        Self {
            graph: CountGraph::new(),
            config,
            ranks: HashMap::new(),
            removed: HashSet::new(),
        }
    }

    fn recompute(&mut self) -> SummaResult<()> {
        let ranks = pagerank(&self.graph.graph, |w| *w, &PageRankParams::from(&self.config))?;
        self.ranks = ranks
            .into_iter()
            .filter_map(|(idx, rank)| self.graph.key(idx).map(|k| (k.to_string(), rank)))
            .collect();
        Ok(())
    }

    /// Whether `concept` was deleted by a rejection.
    pub fn is_removed(&self, concept: &str) -> bool {
        self.removed.contains(concept)
    }

    pub fn contains(&self, concept: &str) -> bool {
        self.graph.get_node(concept).is_some()
    }

    pub fn stats(&self) -> GraphStats {
        graph_stats(self.kind().as_str(), &self.graph.graph, std::iter::empty())
    }
}

impl IFeedbackStore for PageRankFeedbackGraph {
    fn kind(&self) -> StoreKind {
        StoreKind::PageRank
    }

    /// Supplied weights are not used; ranks come from co-occurrence alone.
    fn add_sentences(
        &mut self,
        sentences: &[Sentence],
        _weights: Option<&HashMap<String, f64>>,
        _max_weight: Option<f64>,
    ) -> SummaResult<()> {
        let n = self.config.n;
        if n < 2 {
            return Err(SummaError::Config {
                reason: format!("co-occurrence window size must be at least 2, got {n}"),
            });
        }
        for sentence in sentences {
            let concepts: Vec<&String> = sentence
                .concepts
                .iter()
                .filter(|c| !self.removed.contains(*c))
                .collect();
            for concept in &concepts {
                self.graph.ensure_node(concept, || (*concept).clone());
            }
            for window in concepts.windows(n) {
                for (i, earlier) in window.iter().enumerate() {
                    for later in &window[i + 1..] {
                        if earlier == later {
                            continue;
                        }
                        let (Some(a), Some(b)) = (self.graph.get_node(earlier), self.graph.get_node(later)) else {
                            continue;
                        };
                        match self.graph.graph.find_edge(a, b) {
                            Some(edge) => self.graph.graph[edge] += 1.0,
                            None => {
                                self.graph.graph.add_edge(a, b, 1.0);
                            }
                        }
                    }
                }
            }
        }
        self.recompute()?;
        tracing::debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "co-occurrence graph built"
        );
        Ok(())
    }

    fn incorporate_feedback(&mut self, recorder: &FlightRecorder) -> SummaResult<()> {
        let before = self.graph.node_count();
        for concept in recorder.union().reject() {
            self.graph.remove_node(concept);
            self.removed.insert(concept.clone());
        }
        self.recompute()?;
        tracing::debug!(
            removed = before - self.graph.node_count(),
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "rejected concepts deleted"
        );
        Ok(())
    }

    /// Ranks scaled by the largest rank.
    fn get_weights(&self) -> SummaResult<WeightSnapshot> {
        let store = self.kind().as_str();
        let max = self
            .ranks
            .values()
            .copied()
            .reduce(f64::max)
            .ok_or_else(|| FeedbackError::EmptyGraph {
                store: store.to_string(),
            })?;
        if max <= 0.0 || !max.is_finite() {
            return Err(FeedbackError::DegenerateNormalization {
                store: store.to_string(),
                reason: format!("largest rank is {max}"),
            }
            .into());
        }
        let weights = self
            .ranks
            .iter()
            .map(|(k, &rank)| (k.clone(), rank / max))
            .collect();
        Ok(WeightSnapshot::validated(store, weights)?)
    }

    fn get_config(&self) -> serde_json::Value {
        json!({
            "type": self.kind().as_str(),
            "N": self.config.n,
            "damping": self.config.damping,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(concepts: &[&str]) -> Sentence {
        let concepts: Vec<String> = concepts.iter().map(|c| c.to_string()).collect();
        Sentence::new(concepts.clone(), concepts)
    }

    #[test]
    fn windows_add_forward_edges() {
        let mut store = PageRankFeedbackGraph::new(PageRankConfig {
            n: 3,
            ..PageRankConfig::default()
        });
        store
            .add_sentences(&[sentence(&["a", "b", "c"])], None, None)
            .unwrap();
        assert_eq!(store.graph.edge_count(), 3);
        assert!(store.graph.find_edge("a", "c").is_some());
        assert!(store.graph.find_edge("c", "a").is_none());
    }

    #[test]
    fn repeated_pairs_accumulate() {
        let mut store = PageRankFeedbackGraph::new(PageRankConfig::default());
        store
            .add_sentences(&[sentence(&["a", "b"]), sentence(&["a", "b"])], None, None)
            .unwrap();
        let edge = store.graph.find_edge("a", "b").unwrap();
        assert_eq!(store.graph.graph[edge], 2.0);
    }

    #[test]
    fn empty_store_reports_empty_graph() {
        let store = PageRankFeedbackGraph::new(PageRankConfig::default());
        assert!(matches!(
            store.get_weights(),
            Err(summa_core::SummaError::FeedbackError(FeedbackError::EmptyGraph { .. }))
        ));
    }
}
