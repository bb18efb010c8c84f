//! # summa-core
//!
//! Foundation crate for the summa feedback loop.
//! Defines the concept/sentence models, the flight recorder, the store and
//! collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod recorder;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{FeedbackConfig, StoreKind, SummaConfig};
pub use errors::{FeedbackError, SummaError, SummaResult};
pub use models::{Sentence, WeightSnapshot};
pub use recorder::{FlightRecorder, Record};
