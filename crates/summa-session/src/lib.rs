//! # summa-session
//!
//! The interactive loop around a feedback store.
//!
//! - [`oracle`]: simulated (reference summary) and human label sources.
//! - [`recommender`]: which summary concepts to ask about next.
//! - [`engine`]: [`FeedbackSession`], rounds of label → incorporate → solve.
//! - [`grid`]: parameter sweeps over store configurations.
//! - [`tracing_setup`]: subscriber initialization and span macros.

pub mod engine;
pub mod grid;
pub mod oracle;
pub mod recommender;
pub mod tracing_setup;

pub use engine::{FeedbackSession, IterationReport, SessionReport, StopReason};
pub use grid::ParameterGrid;
pub use oracle::{HumanOracle, Label, LabelValue, ReferenceOracle};
pub use recommender::{build_recommender, DefaultRecommender, HighestWeightRecommender};
