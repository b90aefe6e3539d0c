//! Configuration validation for covtree.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, OutputConfig, RenderConfig, ViewConfig};
use crate::model::{Dimension, Watermarks};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.watermarks.validate());
        errors.extend(self.view.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for Watermarks {
    fn validate(&self) -> Vec<ConfigError> {
        Dimension::ALL
            .into_iter()
            .filter(|dimension| !self.get(*dimension).is_valid())
            .map(|dimension| {
                let mark = self.get(dimension);
                ConfigError {
                    field: format!("watermarks.{dimension}"),
                    message: format!(
                        "Watermarks must satisfy 0 <= low <= high <= 100, got [{}, {}]",
                        mark.low(),
                        mark.high()
                    ),
                }
            })
            .collect()
    }
}

impl Validatable for ViewConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        match self.sort_key() {
            Err(e) => errors.push(ConfigError {
                field: "view.sort".to_string(),
                message: e.to_string(),
            }),
            Ok(Some(key)) => {
                if let Some(dimension) = key.dimension() {
                    if !self.metrics.contains(&dimension) {
                        errors.push(ConfigError {
                            field: "view.sort".to_string(),
                            message: format!(
                                "Sort key '{key}' uses {dimension}, which is not in view.metrics"
                            ),
                        });
                    }
                }
            }
            Ok(None) => {}
        }

        if let Some(path) = &self.path {
            if let Err(e) = crate::view::check_path_filter(path) {
                errors.push(ConfigError {
                    field: "view.path".to_string(),
                    message: e.to_string(),
                });
            }
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError {
                    field: "output.file".to_string(),
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        if self.title.trim().is_empty() {
            errors.push(ConfigError {
                field: "output.title".to_string(),
                message: "Title must not be empty".to_string(),
            });
        }

        errors
    }
}

impl Validatable for RenderConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.payload_path.exists() {
            errors.push(ConfigError {
                field: "payload_path".to_string(),
                message: format!("File not found: {}", self.payload_path.display()),
            });
        }
        errors.extend(self.app.validate());
        errors
    }
}
