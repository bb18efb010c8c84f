//! Serializable state of a word-embedding similarity graph.

use serde::{Deserialize, Serialize};

use summa_core::errors::SummaResult;
use summa_core::StoreKind;

/// One concept node with its full feedback history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub concept: String,
    pub feedback: Vec<f64>,
    pub frozen: bool,
    pub df: f64,
    /// Concept vector, kept so later ingestion can link new concepts.
    #[serde(default)]
    pub vector: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: String,
    pub target: String,
    pub similarity: f64,
}

/// Nodes sorted by concept, edges sorted by endpoints with `source < target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityGraphSnapshot {
    pub store: StoreKind,
    pub cut_off_threshold: f64,
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

impl SimilarityGraphSnapshot {
    pub fn to_json(&self) -> SummaResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> SummaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
