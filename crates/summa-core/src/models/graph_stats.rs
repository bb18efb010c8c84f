use serde::{Deserialize, Serialize};

/// Shape summary of a feedback graph, logged after ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Store type name.
    pub store: String,
    pub directed: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub degree_min: usize,
    pub degree_avg: f64,
    pub degree_max: usize,
    /// Connected components; only computed for undirected graphs.
    pub component_count: Option<usize>,
    /// Latest feedback values across nodes, for node-centric stores.
    pub feedback_min: Option<f64>,
    pub feedback_mean: Option<f64>,
    pub feedback_max: Option<f64>,
}
