//! Error handling for walkerr.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use error_code::WalkerrErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::{PipelineError, PipelineResult};
