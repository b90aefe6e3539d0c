//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAMES};
use super::types::AppConfig;
use crate::model::{Dimension, QualityBucket};
use crate::view::{SortOrder, SummarizerMode};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/covtree/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join(CONFIG_DIR_NAME)) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

/// Values given on the command line; `None` keeps the file's setting.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub summarizer: Option<SummarizerMode>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    pub path: Option<String>,
    pub buckets: Option<Vec<QualityBucket>>,
    pub metrics: Option<Vec<Dimension>>,
    pub output_file: Option<PathBuf>,
    pub title: Option<String>,
}

impl AppConfig {
    /// Apply command-line overrides on top of this config.
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        if let Some(mode) = overrides.summarizer {
            self.view.summarizer = mode;
        }
        if overrides.sort.is_some() {
            self.view.sort.clone_from(&overrides.sort);
        }
        if let Some(order) = overrides.order {
            self.view.order = order;
        }
        if overrides.path.is_some() {
            self.view.path.clone_from(&overrides.path);
        }
        if let Some(buckets) = &overrides.buckets {
            self.view.buckets.clone_from(buckets);
        }
        if let Some(metrics) = &overrides.metrics {
            self.view.metrics.clone_from(metrics);
        }
        if overrides.output_file.is_some() {
            self.output.file.clone_from(&overrides.output_file);
        }
        if let Some(title) = &overrides.title {
            self.output.title.clone_from(title);
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Watermark;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".covtree.yaml");
        std::fs::write(&config_path, "view:\n  summarizer: flat\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
watermarks:
  branches: [40, 70]
view:
  summarizer: nested
  sort: lines.covered
  order: desc
  buckets: [low, medium]
output:
  title: Nightly coverage
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.watermarks.branches, Watermark(40.0, 70.0));
        assert_eq!(config.watermarks.statements, Watermark::default());
        assert_eq!(config.view.summarizer, SummarizerMode::Nested);
        assert_eq!(config.view.sort.as_deref(), Some("lines.covered"));
        assert_eq!(config.view.order, SortOrder::Desc);
        assert_eq!(
            config.view.buckets,
            vec![QualityBucket::Low, QualityBucket::Medium]
        );
        assert_eq!(config.view.metrics, Dimension::ALL.to_vec());
        assert_eq!(config.output.title, "Nightly coverage");
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "view:\n  summarizer: sideways\n").unwrap();

        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .summarizer(SummarizerMode::Nested)
            .title("From file")
            .build();
        let overrides = ConfigOverrides {
            sort: Some("statements".to_string()),
            order: Some(SortOrder::Desc),
            buckets: Some(vec![QualityBucket::High]),
            ..ConfigOverrides::default()
        };

        base.merge(&overrides);

        assert_eq!(base.view.summarizer, SummarizerMode::Nested);
        assert_eq!(base.view.sort.as_deref(), Some("statements"));
        assert_eq!(base.view.order, SortOrder::Desc);
        assert_eq!(base.view.buckets, vec![QualityBucket::High]);
        assert_eq!(base.output.title, "From file");
    }

    #[test]
    fn test_load_or_default_falls_back_on_bad_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "watermarks: [nope").unwrap();

        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert_eq!(config, AppConfig::default());
        assert_eq!(loaded_from, None);
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "view:\n  summarizer: flat\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
