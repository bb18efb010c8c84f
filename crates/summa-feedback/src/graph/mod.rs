//! petgraph::StableGraph wrapper keyed by concept string.

pub mod pagerank;
pub mod stats;
pub mod traversal;

use std::collections::HashMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::{Directed, EdgeType, Undirected};

/// A node payload that knows its own key.
pub trait GraphNode {
    fn key(&self) -> &str;
}

impl GraphNode for String {
    fn key(&self) -> &str {
        self
    }
}

/// Graph with O(1) lookup from key to `NodeIndex`.
///
/// Node indices stay valid across removals, so callers may hold them for the
/// duration of one operation.
#[derive(Debug, Clone)]
pub struct IndexedGraph<N, E, Ty: EdgeType = Directed> {
    pub graph: StableGraph<N, E, Ty>,
    pub node_index: HashMap<String, NodeIndex>,
}

/// Directed co-occurrence graph with counted edges.
pub type CountGraph = IndexedGraph<String, f64, Directed>;

/// Undirected graph, used for word-embedding similarity.
pub type UndirectedGraph<N, E> = IndexedGraph<N, E, Undirected>;

impl<N: GraphNode, E, Ty: EdgeType> IndexedGraph<N, E, Ty> {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::default(),
            node_index: HashMap::new(),
        }
    }

    /// Get or create the node for `key`, building its payload only on creation.
    pub fn ensure_node(&mut self, key: &str, init: impl FnOnce() -> N) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(key) {
            return idx;
        }
        let idx = self.graph.add_node(init());
        self.node_index.insert(key.to_string(), idx);
        idx
    }

    pub fn get_node(&self, key: &str) -> Option<NodeIndex> {
        self.node_index.get(key).copied()
    }

    /// Key of the node at `idx`.
    pub fn key(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(GraphNode::key)
    }

    /// Remove a node and all its edges.
    pub fn remove_node(&mut self, key: &str) -> bool {
        if let Some(idx) = self.node_index.remove(key) {
            self.graph.remove_node(idx);
            true
        } else {
            false
        }
    }

    /// Edge between two keyed nodes, in the graph's direction sense.
    pub fn find_edge(&self, source: &str, target: &str) -> Option<EdgeIndex> {
        let a = self.get_node(source)?;
        let b = self.get_node(target)?;
        self.graph.find_edge(a, b)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl<N: GraphNode, E, Ty: EdgeType> Default for IndexedGraph<N, E, Ty> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_node_is_idempotent() {
        let mut g = CountGraph::new();
        let a = g.ensure_node("solar power", || "solar power".to_string());
        let again = g.ensure_node("solar power", || unreachable!());
        assert_eq!(a, again);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.key(a), Some("solar power"));
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut g = CountGraph::new();
        let a = g.ensure_node("a", || "a".to_string());
        let b = g.ensure_node("b", || "b".to_string());
        g.graph.add_edge(a, b, 1.0);
        assert!(g.find_edge("a", "b").is_some());
        assert!(g.remove_node("a"));
        assert!(!g.remove_node("a"));
        assert_eq!(g.edge_count(), 0);
        assert!(g.find_edge("a", "b").is_none());
    }

    #[test]
    fn undirected_find_edge_is_symmetric() {
        let mut g: UndirectedGraph<String, f64> = UndirectedGraph::new();
        let a = g.ensure_node("a", || "a".to_string());
        let b = g.ensure_node("b", || "b".to_string());
        g.graph.add_edge(a, b, 0.9);
        assert!(g.find_edge("b", "a").is_some());
    }
}
