//! Go frontend configuration.

use serde::{Deserialize, Serialize};

/// Calls whose single result is treated as an `error` value when inferring
/// the type of a variable initializer. Written as `importpath.Func`.
pub const DEFAULT_ERROR_CONSTRUCTORS: &[&str] = &["errors.New", "fmt.Errorf", "errors.Join"];

/// Default limit on syntax tree depth before a file is lowered.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 512;

/// Configuration for the source frontend that produces compilation units.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FrontendConfig {
    /// Error constructor functions. Empty means the defaults.
    #[serde(default)]
    pub error_constructors: Vec<String>,
    /// Analyze files that contain syntax errors. Default: false.
    pub allow_syntax_errors: Option<bool>,
    /// Deepest syntax tree a file may have. Default: 512.
    pub max_tree_depth: Option<usize>,
}

impl FrontendConfig {
    /// Returns the configured error constructors, or the defaults when none are set.
    pub fn effective_error_constructors(&self) -> Vec<String> {
        if self.error_constructors.is_empty() {
            DEFAULT_ERROR_CONSTRUCTORS.iter().map(|s| s.to_string()).collect()
        } else {
            self.error_constructors.clone()
        }
    }

    /// Returns whether syntax errors are tolerated, defaulting to false.
    pub fn effective_allow_syntax_errors(&self) -> bool {
        self.allow_syntax_errors.unwrap_or(false)
    }

    /// Returns the syntax tree depth limit, defaulting to 512.
    pub fn effective_max_tree_depth(&self) -> usize {
        self.max_tree_depth.unwrap_or(DEFAULT_MAX_TREE_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_constructor_list_means_defaults() {
        let config = FrontendConfig::default();
        assert_eq!(config.effective_error_constructors().len(), DEFAULT_ERROR_CONSTRUCTORS.len());
    }

    #[test]
    fn test_configured_constructors_replace_defaults() {
        let config = FrontendConfig {
            error_constructors: vec!["github.com/pkg/errors.New".to_string()],
            allow_syntax_errors: Some(true),
            ..FrontendConfig::default()
        };
        assert_eq!(config.effective_error_constructors(), vec!["github.com/pkg/errors.New"]);
        assert!(config.effective_allow_syntax_errors());
    }

    #[test]
    fn test_tree_depth_default() {
        let config = FrontendConfig::default();
        assert_eq!(config.effective_max_tree_depth(), DEFAULT_MAX_TREE_DEPTH);
        let config = FrontendConfig {
            max_tree_depth: Some(64),
            ..FrontendConfig::default()
        };
        assert_eq!(config.effective_max_tree_depth(), 64);
    }
}
