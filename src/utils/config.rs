use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::DEFAULT_PARALLEL_TOLERANCE;

/// Pairwise triangulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangulationConfig {
    /// Directions with `|1 - alpha^2|` at or below this value are parallel
    pub parallel_tolerance: f64,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            parallel_tolerance: DEFAULT_PARALLEL_TOLERANCE,
        }
    }
}

/// What to do with an observation pair whose lines are parallel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Abort the localization with the pair's error
    #[default]
    FailFast,
    /// Drop the pair and fuse the remaining ones
    SkipDegenerate,
}

/// Multi-observation localization parameters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizerConfig {
    pub triangulation: TriangulationConfig,
    pub degenerate_policy: DegeneratePolicy,
    /// Triangulate pairs on the rayon thread pool
    pub parallel: bool,
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    #[error("I/O error: {message}")]
    Io { message: String },
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl TriangulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tol = self.parallel_tolerance;
        if !tol.is_finite() || !(0.0..1.0).contains(&tol) {
            return Err(ConfigError::InvalidParameter {
                parameter: "parallel_tolerance".to_string(),
                value: tol.to_string(),
                reason: "must be finite and within [0, 1)".to_string(),
            });
        }
        Ok(())
    }
}

impl LocalizerConfig {
    /// Fail-fast configuration
    pub fn fail_fast() -> Self {
        Self::default()
    }

    /// Configuration discarding degenerate pairs
    pub fn skip_degenerate() -> Self {
        Self {
            degenerate_policy: DegeneratePolicy::SkipDegenerate,
            ..Default::default()
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.triangulation.validate()
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: LocalizerConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Serialization {
                message: format!("Failed to parse localizer config: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        Self::from_json_str(&content).map_err(|e| match e {
            ConfigError::Serialization { message } => ConfigError::Serialization {
                message: format!("{} ({})", message, path_str),
            },
            other => other,
        })
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| ConfigError::Io {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })
    }
}
