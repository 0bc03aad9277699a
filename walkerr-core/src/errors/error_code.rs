//! WalkerrErrorCode trait for host-facing error reporting.

/// Every error enum implements this to expose a stable code string that a
/// host can match on without parsing messages.
pub trait WalkerrErrorCode {
    /// Returns the error code string (e.g., "PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted host string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const SYNTAX_ERROR: &str = "SYNTAX_ERROR";
pub const ANALYSIS_ERROR: &str = "ANALYSIS_ERROR";
pub const NESTING_LIMIT: &str = "NESTING_LIMIT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
