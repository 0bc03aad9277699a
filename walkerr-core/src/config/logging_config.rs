//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Filter used when neither `WALKERR_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "walkerr=info";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string, e.g. `walkerr_analysis=debug`.
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
