//! Unit-level analysis failures.

use super::error_code::{self, WalkerrErrorCode};

/// A fatal inability to analyze one compilation unit.
///
/// Unresolvable identifiers are not errors; they are skipped where they
/// occur. These variants abort the unit they were raised for.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Nesting in {function} exceeds the limit of {limit}")]
    NestingTooDeep { function: String, limit: usize },

    #[error("Malformed unit {unit}: {message}")]
    MalformedUnit { unit: String, message: String },
}

impl WalkerrErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NestingTooDeep { .. } => error_code::NESTING_LIMIT,
            Self::MalformedUnit { .. } => error_code::ANALYSIS_ERROR,
        }
    }
}
