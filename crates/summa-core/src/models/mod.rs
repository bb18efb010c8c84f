pub mod graph_stats;
pub mod sentence;
pub mod weight_snapshot;

pub use graph_stats::GraphStats;
pub use sentence::Sentence;
pub use weight_snapshot::WeightSnapshot;
