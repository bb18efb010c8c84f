//! Shape statistics of a feedback graph.

use petgraph::stable_graph::StableGraph;
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, IntoEdgeReferences, NodeIndexable};
use petgraph::{Direction, EdgeType};

use summa_core::models::GraphStats;

/// Summarize `graph`. `feedback` carries the latest per-node feedback values of
/// node-centric stores and may be empty.
pub fn graph_stats<N, E, Ty: EdgeType>(
    store: &str,
    graph: &StableGraph<N, E, Ty>,
    feedback: impl IntoIterator<Item = f64>,
) -> GraphStats {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();
    let directed = Ty::is_directed();

    let degrees: Vec<usize> = graph
        .node_indices()
        .map(|n| {
            if directed {
                graph.edges_directed(n, Direction::Outgoing).count()
                    + graph.edges_directed(n, Direction::Incoming).count()
            } else {
                graph.edges(n).count()
            }
        })
        .collect();

    let density = if node_count < 2 {
        0.0
    } else {
        let pairs = (node_count * (node_count - 1)) as f64;
        if directed {
            edge_count as f64 / pairs
        } else {
            2.0 * edge_count as f64 / pairs
        }
    };

    let component_count = (!directed).then(|| {
        let mut sets = UnionFind::<usize>::new(graph.node_bound());
        for edge in graph.edge_references() {
            sets.union(edge.source().index(), edge.target().index());
        }
        let mut roots: Vec<usize> = graph.node_indices().map(|n| sets.find(n.index())).collect();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    });

    let feedback: Vec<f64> = feedback.into_iter().collect();
    let (feedback_min, feedback_mean, feedback_max) = if feedback.is_empty() {
        (None, None, None)
    } else {
        (
            feedback.iter().copied().reduce(f64::min),
            Some(feedback.iter().sum::<f64>() / feedback.len() as f64),
            feedback.iter().copied().reduce(f64::max),
        )
    };

    GraphStats {
        store: store.to_string(),
        directed,
        node_count,
        edge_count,
        density,
        degree_min: degrees.iter().copied().min().unwrap_or(0),
        degree_avg: if node_count == 0 {
            0.0
        } else {
            degrees.iter().sum::<usize>() as f64 / node_count as f64
        },
        degree_max: degrees.iter().copied().max().unwrap_or(0),
        component_count,
        feedback_min,
        feedback_mean,
        feedback_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::{Directed, Undirected};

    #[test]
    fn counts_components_of_undirected_graph() {
        let mut g: StableGraph<(), (), Undirected> = StableGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let _lonely = g.add_node(());
        g.add_edge(a, b, ());
        let stats = graph_stats("test", &g, [0.2, 0.4, 0.6]);
        assert_eq!(stats.component_count, Some(2));
        assert_eq!(stats.degree_max, 1);
        assert_eq!(stats.degree_min, 0);
        assert!((stats.density - 1.0 / 3.0).abs() < 1e-9);
        assert!((stats.feedback_mean.unwrap() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn directed_graph_skips_components() {
        let mut g: StableGraph<(), (), Directed> = StableGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(a, b, ());
        let stats = graph_stats("test", &g, std::iter::empty());
        assert!(stats.directed);
        assert_eq!(stats.component_count, None);
        assert_eq!(stats.feedback_max, None);
        assert!((stats.density - 0.5).abs() < 1e-9);
    }
}
