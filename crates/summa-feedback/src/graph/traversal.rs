//! Breadth-first traversal and ego networks.

use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::EdgeType;

/// Nodes reachable from `start` in breadth-first order, `start` first.
/// Follows outgoing edges on directed graphs.
pub fn bfs_order<N, E, Ty: EdgeType>(graph: &StableGraph<N, E, Ty>, start: NodeIndex) -> Vec<NodeIndex> {
    within_radius(graph, start, usize::MAX)
}

/// Nodes within `radius` hops of `center`, `center` included.
/// Together with the edges among them this is the ego network of `center`.
pub fn ego_nodes<N, E, Ty: EdgeType>(
    graph: &StableGraph<N, E, Ty>,
    center: NodeIndex,
    radius: usize,
) -> Vec<NodeIndex> {
    within_radius(graph, center, radius)
}

fn within_radius<N, E, Ty: EdgeType>(
    graph: &StableGraph<N, E, Ty>,
    start: NodeIndex,
    radius: usize,
) -> Vec<NodeIndex> {
    if !graph.contains_node(start) {
        return Vec::new();
    }
    let mut order = vec![start];
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0usize)]);

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= radius {
            continue;
        }
        for neighbor in graph.neighbors(node) {
            if visited.insert(neighbor) {
                order.push(neighbor);
                queue.push_back((neighbor, depth + 1));
            }
        }
    }
    order
}
