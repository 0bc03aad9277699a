//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, WalkerrErrorCode};

/// Errors that can occur while turning a source file into a compilation unit.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to load grammar: {message}")]
    GrammarLoad { message: String },

    #[error("Tree-sitter error parsing {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("{path}:{line}:{column}: {count} syntax error(s)")]
    SyntaxErrors {
        path: PathBuf,
        count: u32,
        line: u32,
        column: u32,
    },

    #[error("{path}:{line}:{column}: syntax tree nests deeper than the limit of {limit}")]
    TreeTooDeep {
        path: PathBuf,
        line: u32,
        column: u32,
        limit: usize,
    },

    #[error("Missing package clause in {path}")]
    MissingPackageClause { path: PathBuf },
}

impl WalkerrErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SyntaxErrors { .. } => error_code::SYNTAX_ERROR,
            Self::TreeTooDeep { .. } => error_code::NESTING_LIMIT,
            _ => error_code::PARSE_ERROR,
        }
    }
}
