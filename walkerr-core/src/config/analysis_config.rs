//! Analysis configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default limit on statement/expression nesting inside one function body.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// What the join step does with a call target it cannot attribute to an
/// analyzed function of the same unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedCallPolicy {
    /// Contribute nothing for the call.
    #[default]
    Skip,
    /// Report the callee's own name as a possible source of an unanalyzed error.
    Report,
}

impl fmt::Display for UnresolvedCallPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Report => f.write_str("report"),
        }
    }
}

impl FromStr for UnresolvedCallPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "report" => Ok(Self::Report),
            other => Err(format!("expected \"skip\" or \"report\", got \"{other}\"")),
        }
    }
}

/// Configuration for the summarization engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Unresolved-call handling in the join step. Default: skip.
    pub unresolved_calls: Option<UnresolvedCallPolicy>,
    /// Maximum nesting depth walked inside a function body. Default: 512.
    pub max_nesting_depth: Option<usize>,
    /// Analyze units in parallel. Default: true.
    pub parallel: Option<bool>,
    /// Worker threads for parallel analysis. Default: rayon's choice.
    pub threads: Option<usize>,
}

impl AnalysisConfig {
    /// Returns the effective unresolved-call policy, defaulting to skip.
    pub fn effective_unresolved_calls(&self) -> UnresolvedCallPolicy {
        self.unresolved_calls.unwrap_or_default()
    }

    /// Returns the effective nesting limit, defaulting to 512.
    pub fn effective_max_nesting_depth(&self) -> usize {
        self.max_nesting_depth.unwrap_or(DEFAULT_MAX_NESTING_DEPTH)
    }

    /// Returns whether units are analyzed in parallel, defaulting to true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
