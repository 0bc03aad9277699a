//! walkerr-core: shared foundation for the walkerr error-flow analyzer.
//!
//! - Errors: one `thiserror` enum per subsystem plus stable error codes
//! - Config: TOML-based, layered resolution (overrides > env > project > defaults)
//! - Events: synchronous observer dispatch, so analysis code never logs inline
//! - Tracing: `tracing-subscriber` setup driven by `WALKERR_LOG`
//! - Types: collection aliases used across the workspace

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

pub use config::WalkerrConfig;
pub use errors::{AnalysisError, ConfigError, ParseError, PipelineError, PipelineResult};
pub use events::{EventDispatcher, WalkerrEventHandler};
