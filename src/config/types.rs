//! Configuration types for covtree.
//!
//! [`AppConfig`] is what a config file holds; [`RenderConfig`] is one
//! `render` invocation, the app config plus the payload to load.

use super::defaults::{DEFAULT_SORT_KEY, DEFAULT_TITLE};
use crate::model::{Dimension, QualityBucket, Watermark, Watermarks};
use crate::view::{
    ActiveFilters, ActiveSort, MetricsToShow, SortKey, SortOrder, SummarizerMode, ViewError,
    ViewState,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Application configuration, loaded from a config file and overridden by
/// CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Quality thresholds per dimension, as `[low, high]`
    pub watermarks: Watermarks,
    /// Initial view of the report
    pub view: ViewConfig,
    /// Output destination and page title
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the summarizer mode.
    pub const fn summarizer(mut self, mode: SummarizerMode) -> Self {
        self.config.view.summarizer = mode;
        self
    }

    /// Set the sort key, e.g. `statements.pct`.
    pub fn sort(mut self, key: impl Into<String>) -> Self {
        self.config.view.sort = Some(key.into());
        self
    }

    /// Keep rows in source order.
    pub fn unsorted(mut self) -> Self {
        self.config.view.sort = None;
        self
    }

    /// Set the sort order.
    pub const fn order(mut self, order: SortOrder) -> Self {
        self.config.view.order = order;
        self
    }

    /// Scope the view to a subtree.
    pub fn path_filter(mut self, path: impl Into<String>) -> Self {
        self.config.view.path = Some(path.into());
        self
    }

    /// Set the active quality buckets.
    pub fn buckets(mut self, buckets: Vec<QualityBucket>) -> Self {
        self.config.view.buckets = buckets;
        self
    }

    /// Set the shown dimensions.
    pub fn metrics(mut self, metrics: Vec<Dimension>) -> Self {
        self.config.view.metrics = metrics;
        self
    }

    /// Use the same watermark for every dimension.
    pub const fn watermark(mut self, low: f64, high: f64) -> Self {
        let mark = Watermark(low, high);
        self.config.watermarks = Watermarks {
            statements: mark,
            branches: mark,
            functions: mark,
            lines: mark,
        };
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Set the page title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.output.title = title.into();
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Initial view of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ViewConfig {
    /// Summarizer mode: package, nested or flat
    pub summarizer: SummarizerMode,
    /// Sort key: `file`, a dimension, or `<dimension>.<field>`; omit to keep
    /// source order
    pub sort: Option<String>,
    /// Sort order
    pub order: SortOrder,
    /// Subtree to show, relative to the report root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Quality buckets to show
    pub buckets: Vec<QualityBucket>,
    /// Dimensions to show
    pub metrics: Vec<Dimension>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            summarizer: SummarizerMode::default(),
            sort: Some(DEFAULT_SORT_KEY.to_string()),
            order: SortOrder::default(),
            path: None,
            buckets: QualityBucket::ALL.to_vec(),
            metrics: Dimension::ALL.to_vec(),
        }
    }
}

impl ViewConfig {
    /// Parsed sort key, if sorting is enabled.
    pub fn sort_key(&self) -> Result<Option<SortKey>, ViewError> {
        self.sort.as_deref().map(str::parse).transpose()
    }

    /// Build the view state this config describes.
    pub fn to_view_state(&self) -> Result<ViewState, ViewError> {
        let state = ViewState {
            summarizer: self.summarizer,
            path_filter: self.path.clone().unwrap_or_default(),
            metrics_to_show: MetricsToShow::only(&self.metrics),
            active_filters: ActiveFilters::only(&self.buckets),
            active_sort: self
                .sort_key()?
                .map(|key| ActiveSort::new(key, self.order)),
        };
        state.validate()?;
        Ok(state)
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Page title of the HTML report
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

// ============================================================================
// Command Configuration
// ============================================================================

/// Configuration for one `render` run
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Report payload to load
    pub payload_path: PathBuf,
    /// Effective configuration after file discovery and CLI overrides
    pub app: AppConfig,
    /// Suppress informational output
    pub quiet: bool,
}

impl RenderConfig {
    #[must_use]
    pub fn new(payload_path: impl Into<PathBuf>, app: AppConfig) -> Self {
        Self {
            payload_path: payload_path.into(),
            app,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_config_state() {
        let state = ViewConfig::default().to_view_state().unwrap();
        assert_eq!(state, ViewState::default());
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .summarizer(SummarizerMode::Flat)
            .sort("branches")
            .order(SortOrder::Desc)
            .path_filter("src")
            .buckets(vec![QualityBucket::Low])
            .watermark(40.0, 90.0)
            .title("Nightly")
            .build();

        assert_eq!(config.output.title, "Nightly");
        assert_eq!(config.watermarks.lines, Watermark(40.0, 90.0));

        let state = config.view.to_view_state().unwrap();
        assert_eq!(state.summarizer, SummarizerMode::Flat);
        assert_eq!(state.path_filter, "src");
        assert_eq!(
            state.active_sort,
            Some(ActiveSort::new(SortKey::pct(Dimension::Branches), SortOrder::Desc))
        );
        assert_eq!(state.active_filters, ActiveFilters::only(&[QualityBucket::Low]));
    }

    #[test]
    fn test_unsorted_view() {
        let config = AppConfig::builder().unsorted().build();
        let state = config.view.to_view_state().unwrap();
        assert_eq!(state.active_sort, None);
    }

    #[test]
    fn test_invalid_sort_key_surfaces() {
        let config = AppConfig::builder().sort("coverage").build();
        assert!(matches!(
            config.view.to_view_state(),
            Err(ViewError::InvalidSortKey { .. })
        ));
    }

    #[test]
    fn test_hidden_sort_dimension_surfaces() {
        let config = AppConfig::builder()
            .sort("functions.pct")
            .metrics(vec![Dimension::Statements])
            .build();
        assert_eq!(
            config.view.to_view_state(),
            Err(ViewError::HiddenSortMetric {
                dimension: Dimension::Functions
            })
        );
    }
}
