//! Configuration module for covtree.
//!
//! This module provides:
//! - Type-safe configuration structures with a builder
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use covtree::config::{AppConfig, ConfigOverrides};
//! use covtree::view::SummarizerMode;
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .summarizer(SummarizerMode::Flat)
//!     .sort("statements.pct")
//!     .build();
//!
//! // Load from file, then layer CLI flags on top
//! let (config, loaded_from) =
//!     AppConfig::from_file_with_overrides(None, &ConfigOverrides::default());
//! ```
//!
//! # Configuration File
//!
//! Place a `.covtree.yaml` file in your project root or `~/.config/covtree/`:
//!
//! ```yaml
//! watermarks:
//!   statements: [50, 80]
//!   branches: [40, 75]
//! view:
//!   summarizer: flat
//!   sort: statements.pct
//!   order: asc
//!   buckets: [low, medium]
//! output:
//!   title: Nightly coverage
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{CONFIG_FILE_NAMES, DEFAULT_SORT_KEY, DEFAULT_TITLE};
pub use types::{AppConfig, AppConfigBuilder, OutputConfig, RenderConfig, ViewConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, load_config_file, load_or_default, ConfigFileError, ConfigOverrides,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Documents every option a `.covtree.yaml` file can set, for editor
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
