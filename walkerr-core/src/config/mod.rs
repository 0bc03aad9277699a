//! Configuration system for walkerr.
//! TOML-based, layered resolution: overrides > env > project > defaults.

pub mod analysis_config;
pub mod frontend_config;
pub mod logging_config;
pub mod walkerr_config;

pub use analysis_config::{AnalysisConfig, UnresolvedCallPolicy};
pub use frontend_config::FrontendConfig;
pub use logging_config::LoggingConfig;
pub use walkerr_config::{ConfigOverrides, WalkerrConfig};
