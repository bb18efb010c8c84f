//! Weighted PageRank by power iteration.
//!
//! Transitions are row-stochastic over out-weights; nodes without outgoing
//! weight are dangling and spread their mass uniformly. Iteration stops once
//! the L1 change drops below `N * tolerance`. Undirected edges count in both
//! directions.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::EdgeType;

use summa_core::config::defaults::{
    DEFAULT_DAMPING, DEFAULT_PAGERANK_MAX_ITERATIONS, DEFAULT_PAGERANK_TOLERANCE,
};
use summa_core::config::{EgoPrConfig, PageRankConfig};
use summa_core::errors::FeedbackError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankParams {
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for PageRankParams {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_PAGERANK_MAX_ITERATIONS,
            tolerance: DEFAULT_PAGERANK_TOLERANCE,
        }
    }
}

impl From<&PageRankConfig> for PageRankParams {
    fn from(config: &PageRankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }
}

impl From<&EgoPrConfig> for PageRankParams {
    fn from(config: &EgoPrConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }
}

/// PageRank over every node of `graph`.
pub fn pagerank<N, E, Ty: EdgeType>(
    graph: &StableGraph<N, E, Ty>,
    weight: impl Fn(&E) -> f64,
    params: &PageRankParams,
) -> Result<HashMap<NodeIndex, f64>, FeedbackError> {
    let nodes: Vec<NodeIndex> = graph.node_indices().collect();
    pagerank_subgraph(graph, &nodes, weight, params)
}

/// PageRank over the subgraph induced by `nodes`.
pub fn pagerank_subgraph<N, E, Ty: EdgeType>(
    graph: &StableGraph<N, E, Ty>,
    nodes: &[NodeIndex],
    weight: impl Fn(&E) -> f64,
    params: &PageRankParams,
) -> Result<HashMap<NodeIndex, f64>, FeedbackError> {
    let local: HashMap<NodeIndex, usize> = nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    let mut edges = Vec::new();
    for edge in graph.edge_references() {
        let (Some(&s), Some(&t)) = (local.get(&edge.source()), local.get(&edge.target())) else {
            continue;
        };
        let w = weight(edge.weight());
        edges.push((s, t, w));
        if !Ty::is_directed() && s != t {
            edges.push((t, s, w));
        }
    }

    let ranks = power_iteration(nodes.len(), &edges, params)?;
    Ok(nodes.iter().copied().zip(ranks).collect())
}

/// Power iteration over a dense index space `0..n` with weighted arcs.
fn power_iteration(
    n: usize,
    edges: &[(usize, usize, f64)],
    params: &PageRankParams,
) -> Result<Vec<f64>, FeedbackError> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut out_weight = vec![0.0f64; n];
    for &(s, _, w) in edges {
        out_weight[s] += w;
    }
    let transitions: Vec<(usize, usize, f64)> = edges
        .iter()
        .map(|&(s, t, w)| {
            let p = if out_weight[s] != 0.0 { w / out_weight[s] } else { 0.0 };
            (s, t, p)
        })
        .collect();
    let dangling: Vec<usize> = (0..n).filter(|&i| out_weight[i] == 0.0).collect();

    let alpha = params.damping;
    let uniform = 1.0 / n as f64;
    let mut x = vec![uniform; n];

    for _ in 0..params.max_iterations {
        let last = x;
        x = vec![0.0f64; n];
        let dangle_sum = alpha * dangling.iter().map(|&i| last[i]).sum::<f64>();

        for &(s, t, p) in &transitions {
            x[t] += alpha * last[s] * p;
        }
        for value in x.iter_mut() {
            *value += dangle_sum * uniform + (1.0 - alpha) * uniform;
        }

        let err: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        if err < n as f64 * params.tolerance {
            return Ok(x);
        }
    }

    Err(FeedbackError::PageRankNotConverged {
        iterations: params.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::{Directed, Undirected};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn empty_graph_has_no_ranks() {
        let g: StableGraph<(), f64, Directed> = StableGraph::default();
        let ranks = pagerank(&g, |w| *w, &PageRankParams::default()).unwrap();
        assert!(ranks.is_empty());
    }

    #[test]
    fn ranks_sum_to_one() {
        let mut g: StableGraph<(), f64, Directed> = StableGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(a, b, 1.0);
        g.add_edge(b, c, 2.0);
        g.add_edge(a, c, 1.0);
        let ranks = pagerank(&g, |w| *w, &PageRankParams::default()).unwrap();
        let total: f64 = ranks.values().sum();
        assert!(approx(total, 1.0));
        // c collects from both a and b.
        assert!(ranks[&c] > ranks[&b]);
        assert!(ranks[&b] > ranks[&a]);
    }

    #[test]
    fn two_node_cycle_is_uniform() {
        let mut g: StableGraph<(), f64, Directed> = StableGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(a, b, 1.0);
        g.add_edge(b, a, 1.0);
        let ranks = pagerank(&g, |w| *w, &PageRankParams::default()).unwrap();
        assert!(approx(ranks[&a], 0.5));
        assert!(approx(ranks[&b], 0.5));
    }

    #[test]
    fn undirected_star_favours_center() {
        let mut g: StableGraph<(), f64, Undirected> = StableGraph::default();
        let center = g.add_node(());
        let leaves: Vec<_> = (0..3).map(|_| g.add_node(())).collect();
        for &leaf in &leaves {
            g.add_edge(center, leaf, 0.8);
        }
        let ranks = pagerank(&g, |w| *w, &PageRankParams::default()).unwrap();
        for leaf in leaves {
            assert!(ranks[&center] > ranks[&leaf]);
        }
    }

    #[test]
    fn subgraph_ignores_outside_edges() {
        let mut g: StableGraph<(), f64, Undirected> = StableGraph::default();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(a, b, 1.0);
        g.add_edge(b, c, 1.0);
        let ranks = pagerank_subgraph(&g, &[a, b], |w| *w, &PageRankParams::default()).unwrap();
        assert_eq!(ranks.len(), 2);
        assert!(approx(ranks[&a], 0.5));
    }

    #[test]
    fn zero_iterations_fail_to_converge() {
        let mut g: StableGraph<(), f64, Directed> = StableGraph::default();
        g.add_node(());
        let params = PageRankParams {
            max_iterations: 0,
            ..PageRankParams::default()
        };
        assert!(matches!(
            pagerank(&g, |w| *w, &params),
            Err(FeedbackError::PageRankNotConverged { iterations: 0 })
        ));
    }
}
