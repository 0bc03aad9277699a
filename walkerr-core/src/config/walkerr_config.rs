//! Top-level walkerr configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, FrontendConfig, LoggingConfig, UnresolvedCallPolicy};
use crate::errors::ConfigError;

/// Name of the project-level config file looked up in the analysis root.
pub const PROJECT_CONFIG_FILE: &str = "walkerr.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Host overrides (applied via `apply_overrides`)
/// 2. Environment variables (`WALKERR_*`)
/// 3. Project config (`walkerr.toml` in the analysis root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WalkerrConfig {
    pub analysis: AnalysisConfig,
    pub frontend: FrontendConfig,
    pub logging: LoggingConfig,
}

/// Overrides supplied by the embedding host. They win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub unresolved_calls: Option<UnresolvedCallPolicy>,
    pub max_nesting_depth: Option<usize>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
}

impl WalkerrConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1: host overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &WalkerrConfig) -> Result<(), ConfigError> {
        if config.analysis.max_nesting_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.max_nesting_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.analysis.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.frontend.max_tree_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "frontend.max_tree_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for name in &config.frontend.error_constructors {
            let well_formed = name
                .rsplit_once('.')
                .is_some_and(|(path, func)| !path.is_empty() && !func.is_empty());
            if !well_formed {
                return Err(ConfigError::ValidationFailed {
                    field: "frontend.error_constructors".to_string(),
                    message: format!("\"{name}\" is not of the form importpath.Func"),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut WalkerrConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::ReadFailed {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;

        let file_config: WalkerrConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut WalkerrConfig, other: &WalkerrConfig) {
        // Analysis
        if other.analysis.unresolved_calls.is_some() {
            base.analysis.unresolved_calls = other.analysis.unresolved_calls;
        }
        if other.analysis.max_nesting_depth.is_some() {
            base.analysis.max_nesting_depth = other.analysis.max_nesting_depth;
        }
        if other.analysis.parallel.is_some() {
            base.analysis.parallel = other.analysis.parallel;
        }
        if other.analysis.threads.is_some() {
            base.analysis.threads = other.analysis.threads;
        }

        // Frontend
        if !other.frontend.error_constructors.is_empty() {
            base.frontend.error_constructors = other.frontend.error_constructors.clone();
        }
        if other.frontend.allow_syntax_errors.is_some() {
            base.frontend.allow_syntax_errors = other.frontend.allow_syntax_errors;
        }
        if other.frontend.max_tree_depth.is_some() {
            base.frontend.max_tree_depth = other.frontend.max_tree_depth;
        }

        // Logging
        if other.logging.filter.is_some() {
            base.logging.filter = other.logging.filter.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `WALKERR_UNRESOLVED_CALLS`, `WALKERR_MAX_NESTING_DEPTH`, etc.
    ///
    /// A present but malformed policy value is an error; malformed numbers
    /// and booleans are ignored.
    fn apply_env_overrides(config: &mut WalkerrConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("WALKERR_UNRESOLVED_CALLS") {
            let policy = val
                .parse::<UnresolvedCallPolicy>()
                .map_err(|message| ConfigError::InvalidValue {
                    field: "WALKERR_UNRESOLVED_CALLS".to_string(),
                    message,
                })?;
            config.analysis.unresolved_calls = Some(policy);
        }
        if let Ok(val) = std::env::var("WALKERR_MAX_NESTING_DEPTH") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.max_nesting_depth = Some(v);
            }
        }
        if let Ok(val) = std::env::var("WALKERR_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("WALKERR_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("WALKERR_ALLOW_SYNTAX_ERRORS") {
            if let Ok(v) = val.parse::<bool>() {
                config.frontend.allow_syntax_errors = Some(v);
            }
        }
        if let Ok(val) = std::env::var("WALKERR_MAX_TREE_DEPTH") {
            if let Ok(v) = val.parse::<usize>() {
                config.frontend.max_tree_depth = Some(v);
            }
        }
        Ok(())
    }

    /// Apply host overrides (highest priority).
    pub fn apply_overrides(config: &mut WalkerrConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.unresolved_calls {
            config.analysis.unresolved_calls = Some(v);
        }
        if let Some(v) = overrides.max_nesting_depth {
            config.analysis.max_nesting_depth = Some(v);
        }
        if let Some(v) = overrides.parallel {
            config.analysis.parallel = Some(v);
        }
        if let Some(v) = overrides.threads {
            config.analysis.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_base_where_other_is_unset() {
        let mut base = WalkerrConfig::from_toml("[analysis]\nthreads = 2\nparallel = false\n").unwrap();
        let other = WalkerrConfig::from_toml("[analysis]\nthreads = 8\n").unwrap();
        WalkerrConfig::merge(&mut base, &other);
        assert_eq!(base.analysis.threads, Some(8));
        assert_eq!(base.analysis.parallel, Some(false));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = WalkerrConfig::from_toml("[analysis]\ncolour = \"blue\"\n").unwrap();
        assert_eq!(config.analysis.threads, None);
    }
}
