pub mod defaults;
pub mod embedding_config;
pub mod feedback_config;
pub mod observability_config;
pub mod session_config;

pub use embedding_config::EmbeddingConfig;
pub use feedback_config::{
    BaselineConfig, EgoPrConfig, FeedbackConfig, GaussianConfig, NgramConfig, OracleType,
    PageRankConfig, ParseType, RandomWalkConfig, StoreKind,
};
pub use observability_config::ObservabilityConfig;
pub use session_config::{RecommenderKind, SessionConfig};

use serde::{Deserialize, Serialize};

use crate::errors::{SummaError, SummaResult};

/// Top-level configuration, one section per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaConfig {
    pub feedback: FeedbackConfig,
    pub embedding: EmbeddingConfig,
    pub session: SessionConfig,
    pub observability: ObservabilityConfig,
}

impl SummaConfig {
    /// Parse a TOML document. Missing sections and fields fall back to defaults.
    pub fn from_toml(content: &str) -> SummaResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| SummaError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> SummaResult<String> {
        toml::to_string(self).map_err(|e| SummaError::Config {
            reason: e.to_string(),
        })
    }

    /// Reject parameter combinations no store can run with.
    pub fn validate(&self) -> SummaResult<()> {
        self.feedback.validate()?;
        if self.embedding.dimensions == 0 {
            return Err(SummaError::Config {
                reason: "embedding.dimensions must be positive".to_string(),
            });
        }
        if self.session.max_iteration_count == 0 {
            return Err(SummaError::Config {
                reason: "session.max_iteration_count must be positive".to_string(),
            });
        }
        Ok(())
    }
}
