//! Word-embedding similarity graph shared by the Gaussian, random-walk and
//! ego-PageRank stores.
//!
//! Node lifecycle: unseen -> tracked (on ingestion) -> frozen (on a direct
//! label). Propagation only writes to tracked, unfrozen nodes. Every write is
//! saturated into [0, 1].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use summa_core::constants::{MAX_WEIGHT, MIN_WEIGHT};
use summa_core::errors::{FeedbackError, SummaError, SummaResult};
use summa_core::models::{GraphStats, Sentence, WeightSnapshot};
use summa_core::traits::resolve_max_weight;
use summa_core::StoreKind;
use summa_embeddings::{cosine_similarity, ConceptEmbedder};

use crate::graph::stats::graph_stats;
use crate::graph::{GraphNode, UndirectedGraph};
use crate::snapshot::{SimilarityGraphSnapshot, SnapshotEdge, SnapshotNode};

/// A tracked concept.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptNode {
    pub concept: String,
    /// Append-only history; the last entry is the current weight.
    pub feedback: Vec<f64>,
    pub frozen: bool,
    /// Raw weight supplied at ingestion.
    pub df: f64,
}

impl ConceptNode {
    /// Current weight, 0.0 for an empty history.
    pub fn latest(&self) -> f64 {
        self.feedback.last().copied().unwrap_or(0.0)
    }
}

impl GraphNode for ConceptNode {
    fn key(&self) -> &str {
        &self.concept
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityEdge {
    pub similarity: f64,
    pub dissimilarity: f64,
}

impl SimilarityEdge {
    pub fn new(similarity: f64) -> Self {
        Self {
            similarity,
            dissimilarity: 1.0 - similarity,
        }
    }
}

pub(crate) fn saturate(value: f64) -> f64 {
    value.clamp(MIN_WEIGHT, MAX_WEIGHT)
}

pub struct SimilarityGraph {
    kind: StoreKind,
    pub(crate) graph: UndirectedGraph<ConceptNode, SimilarityEdge>,
    vectors: HashMap<String, Vec<f32>>,
    embedder: Arc<ConceptEmbedder>,
    cut_off_threshold: f64,
}

impl SimilarityGraph {
    pub fn new(kind: StoreKind, embedder: Arc<ConceptEmbedder>, cut_off_threshold: f64) -> Self {
        Self {
            kind,
            graph: UndirectedGraph::new(),
            vectors: HashMap::new(),
            embedder,
            cut_off_threshold,
        }
    }

    /// Track every new concept of `sentences` and link it to each concept whose
    /// vector is more similar than the cut-off. Concepts already tracked keep
    /// their history.
    pub fn add_sentences(
        &mut self,
        sentences: &[Sentence],
        weights: Option<&HashMap<String, f64>>,
        max_weight: Option<f64>,
    ) -> SummaResult<()> {
        let max_weight = resolve_max_weight(weights, max_weight)?;
        let mut added = Vec::new();

        for sentence in sentences {
            for (i, concept) in sentence.concepts.iter().enumerate() {
                if self.graph.get_node(concept).is_some() {
                    continue;
                }
                let vector = self.embedder.embed(&sentence.surface_words(i))?;
                let raw = weights.and_then(|w| w.get(concept)).copied();
                let df = raw.unwrap_or(1.0);
                let idx = self.graph.ensure_node(concept, || ConceptNode {
                    concept: concept.clone(),
                    feedback: vec![saturate(df / max_weight)],
                    frozen: false,
                    df,
                });
                self.vectors.insert(concept.clone(), vector);
                added.push(idx);
            }
        }

        if let Some(weights) = weights {
            let unknown = weights
                .keys()
                .filter(|k| self.graph.get_node(k).is_none())
                .count();
            tracing::debug!(
                store = %self.kind,
                unknown,
                tracked = self.graph.node_count(),
                "weights without a graph node"
            );
        }
        tracing::debug!(
            store = %self.kind,
            unique_vectors = self.embedder.cache_len(),
            unknown_words = self.embedder.error_count(),
            "embedded concepts"
        );

        self.link(&added)?;

        let stats = self.stats();
        tracing::debug!(store = %self.kind, ?stats, "similarity graph built");
        Ok(())
    }

    /// Add similarity edges for every pair involving at least one of `added`.
    fn link(&mut self, added: &[NodeIndex]) -> SummaResult<()> {
        let fresh: HashSet<NodeIndex> = added.iter().copied().collect();
        let all: Vec<NodeIndex> = self.graph.graph.node_indices().collect();

        for &u in added {
            let u_vec = self.vector_of(u)?.to_vec();
            for &v in &all {
                if u == v || (fresh.contains(&v) && v < u) {
                    continue;
                }
                let similarity = cosine_similarity(&u_vec, self.vector_of(v)?);
                if similarity > self.cut_off_threshold {
                    self.graph.graph.update_edge(u, v, SimilarityEdge::new(similarity));
                }
            }
        }
        Ok(())
    }

    fn vector_of(&self, idx: NodeIndex) -> SummaResult<&[f32]> {
        self.graph
            .key(idx)
            .and_then(|k| self.vectors.get(k))
            .map(Vec::as_slice)
            .ok_or_else(|| SummaError::FeedbackError(FeedbackError::DegenerateNormalization {
                store: self.kind.to_string(),
                reason: "tracked concept has no vector".to_string(),
            }))
    }

    /// Mark `concept` as labelled and append `value` to its history.
    /// Returns `None` for a concept the graph does not track.
    pub fn freeze(&mut self, concept: &str, value: f64) -> Option<NodeIndex> {
        let Some(idx) = self.graph.get_node(concept) else {
            tracing::debug!(store = %self.kind, concept = %concept, "feedback for untracked concept skipped");
            return None;
        };
        let node = &mut self.graph.graph[idx];
        node.frozen = true;
        node.feedback.push(saturate(value));
        Some(idx)
    }

    pub fn latest(&self, idx: NodeIndex) -> f64 {
        self.graph.graph.node_weight(idx).map_or(0.0, ConceptNode::latest)
    }

    pub fn is_frozen(&self, idx: NodeIndex) -> bool {
        self.graph.graph.node_weight(idx).is_some_and(|n| n.frozen)
    }

    /// Append `value`, saturated, to the node's history and return what was written.
    pub fn append(&mut self, idx: NodeIndex, value: f64) -> f64 {
        let written = saturate(value);
        if let Some(node) = self.graph.graph.node_weight_mut(idx) {
            node.feedback.push(written);
        }
        written
    }

    /// Neighbours of `idx` with the similarity of the connecting edge.
    pub fn neighbors(&self, idx: NodeIndex) -> Vec<(NodeIndex, f64)> {
        self.graph
            .graph
            .edges(idx)
            .map(|e| {
                let other = if e.source() == idx { e.target() } else { e.source() };
                (other, e.weight().similarity)
            })
            .collect()
    }

    pub fn weights(&self) -> SummaResult<WeightSnapshot> {
        let weights = self
            .graph
            .graph
            .node_weights()
            .map(|n| (n.concept.clone(), n.latest()))
            .collect();
        Ok(WeightSnapshot::validated(self.kind.as_str(), weights)?)
    }

    pub fn node(&self, concept: &str) -> Option<&ConceptNode> {
        self.graph.get_node(concept).map(|idx| &self.graph.graph[idx])
    }

    pub fn stats(&self) -> GraphStats {
        graph_stats(
            self.kind.as_str(),
            &self.graph.graph,
            self.graph.graph.node_weights().map(ConceptNode::latest),
        )
    }

    pub fn cut_off_threshold(&self) -> f64 {
        self.cut_off_threshold
    }

    pub fn snapshot(&self) -> SimilarityGraphSnapshot {
        let mut nodes: Vec<SnapshotNode> = self
            .graph
            .graph
            .node_weights()
            .map(|n| SnapshotNode {
                concept: n.concept.clone(),
                feedback: n.feedback.clone(),
                frozen: n.frozen,
                df: n.df,
                vector: self.vectors.get(&n.concept).cloned().unwrap_or_default(),
            })
            .collect();
        nodes.sort_by(|a, b| a.concept.cmp(&b.concept));

        let mut edges: Vec<SnapshotEdge> = self
            .graph
            .graph
            .edge_references()
            .filter_map(|e| {
                let a = self.graph.key(e.source())?;
                let b = self.graph.key(e.target())?;
                let (source, target) = if a <= b { (a, b) } else { (b, a) };
                Some(SnapshotEdge {
                    source: source.to_string(),
                    target: target.to_string(),
                    similarity: e.weight().similarity,
                })
            })
            .collect();
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        SimilarityGraphSnapshot {
            store: self.kind,
            cut_off_threshold: self.cut_off_threshold,
            nodes,
            edges,
        }
    }

    /// Replace the graph with the snapshot's contents.
    pub fn restore(&mut self, snapshot: &SimilarityGraphSnapshot) {
        let mut graph = UndirectedGraph::new();
        let mut vectors = HashMap::new();
        for node in &snapshot.nodes {
            graph.ensure_node(&node.concept, || ConceptNode {
                concept: node.concept.clone(),
                feedback: node.feedback.clone(),
                frozen: node.frozen,
                df: node.df,
            });
            vectors.insert(node.concept.clone(), node.vector.clone());
        }
        for edge in &snapshot.edges {
            let (Some(a), Some(b)) = (graph.get_node(&edge.source), graph.get_node(&edge.target)) else {
                tracing::debug!(source = %edge.source, target = %edge.target, "snapshot edge without endpoints skipped");
                continue;
            };
            graph.graph.update_edge(a, b, SimilarityEdge::new(edge.similarity));
        }
        self.graph = graph;
        self.vectors = vectors;
        self.cut_off_threshold = snapshot.cut_off_threshold;
    }
}
