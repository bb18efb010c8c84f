mod embedding;
mod feedback_store;
mod optimizer;
mod oracle;
mod recommender;

pub use embedding::IWordEmbeddings;
pub use feedback_store::{resolve_max_weight, IFeedbackStore};
pub use optimizer::ISummaryOptimizer;
pub use oracle::IOracle;
pub use recommender::IRecommender;
