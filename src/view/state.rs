//! View state owned by the presentation layer.
//!
//! Everything the engine needs to shape the table lives in [`ViewState`],
//! which serializes to JSON so a session can be handed around, logged or
//! replayed in tests. The transitions below mirror the report's controls:
//! summarizer buttons, sortable column headers, bucket checkboxes and
//! drill-down links.

use super::scope::check_path_filter;
use super::sort::{ActiveSort, SortKey, SortOrder};
use super::ViewError;
use crate::model::{join_path, Dimension, QualityBucket};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Trait for option sets a toggle button cycles through.
pub trait CycleFilter: Clone + Copy + Default {
    /// Get the next option in the cycle.
    #[must_use]
    fn next(&self) -> Self;

    /// Get the previous option in the cycle.
    #[must_use]
    fn prev(&self) -> Self;

    /// Get a display name for the option.
    fn display_name(&self) -> &str;
}

/// How the tree is summarized into top-level rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerMode {
    /// One row per directory, files beneath
    #[default]
    Package,
    /// The directory hierarchy as-is
    Nested,
    /// Every file at the top level, named by its full path
    Flat,
}

impl SummarizerMode {
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Nested => "nested",
            Self::Flat => "flat",
        }
    }
}

impl CycleFilter for SummarizerMode {
    fn next(&self) -> Self {
        match self {
            Self::Package => Self::Nested,
            Self::Nested => Self::Flat,
            Self::Flat => Self::Package,
        }
    }

    fn prev(&self) -> Self {
        match self {
            Self::Package => Self::Flat,
            Self::Nested => Self::Package,
            Self::Flat => Self::Nested,
        }
    }

    fn display_name(&self) -> &str {
        match self {
            Self::Package => "Package",
            Self::Nested => "Nested",
            Self::Flat => "Flat",
        }
    }
}

impl std::fmt::Display for SummarizerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Which dimensions are shown (and may gate the bucket filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MetricsToShow {
    pub statements: bool,
    pub branches: bool,
    pub functions: bool,
    pub lines: bool,
}

impl Default for MetricsToShow {
    fn default() -> Self {
        Self {
            statements: true,
            branches: true,
            functions: true,
            lines: true,
        }
    }
}

impl MetricsToShow {
    /// No dimension shown.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            statements: false,
            branches: false,
            functions: false,
            lines: false,
        }
    }

    /// Show exactly the given dimensions.
    #[must_use]
    pub fn only(dimensions: &[Dimension]) -> Self {
        let mut shown = Self::none();
        for dimension in dimensions {
            shown.set(*dimension, true);
        }
        shown
    }

    #[must_use]
    pub const fn is_shown(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Statements => self.statements,
            Dimension::Branches => self.branches,
            Dimension::Functions => self.functions,
            Dimension::Lines => self.lines,
        }
    }

    pub fn set(&mut self, dimension: Dimension, shown: bool) {
        match dimension {
            Dimension::Statements => self.statements = shown,
            Dimension::Branches => self.branches = shown,
            Dimension::Functions => self.functions = shown,
            Dimension::Lines => self.lines = shown,
        }
    }

    /// Shown dimensions in column order.
    pub fn shown(&self) -> impl Iterator<Item = Dimension> + '_ {
        Dimension::ALL.into_iter().filter(|d| self.is_shown(*d))
    }
}

/// Which quality buckets are currently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ActiveFilters {
    pub low: bool,
    pub medium: bool,
    pub high: bool,
}

impl Default for ActiveFilters {
    fn default() -> Self {
        Self {
            low: true,
            medium: true,
            high: true,
        }
    }
}

impl ActiveFilters {
    /// Every bucket disabled.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            low: false,
            medium: false,
            high: false,
        }
    }

    /// Enable exactly the given buckets.
    #[must_use]
    pub fn only(buckets: &[QualityBucket]) -> Self {
        let mut filters = Self::none();
        for bucket in buckets {
            filters.set(*bucket, true);
        }
        filters
    }

    #[must_use]
    pub const fn is_active(&self, bucket: QualityBucket) -> bool {
        match bucket {
            QualityBucket::Low => self.low,
            QualityBucket::Medium => self.medium,
            QualityBucket::High => self.high,
        }
    }

    pub fn set(&mut self, bucket: QualityBucket, active: bool) {
        match bucket {
            QualityBucket::Low => self.low = active,
            QualityBucket::Medium => self.medium = active,
            QualityBucket::High => self.high = active,
        }
    }

    pub fn toggle(&mut self, bucket: QualityBucket) {
        self.set(bucket, !self.is_active(bucket));
    }
}

/// The complete request the engine shapes rows for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    pub summarizer: SummarizerMode,
    /// Subtree to show; empty shows the whole tree
    pub path_filter: String,
    pub metrics_to_show: MetricsToShow,
    pub active_filters: ActiveFilters,
    pub active_sort: Option<ActiveSort>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            summarizer: SummarizerMode::default(),
            path_filter: String::new(),
            metrics_to_show: MetricsToShow::default(),
            active_filters: ActiveFilters::default(),
            active_sort: Some(ActiveSort::default()),
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the state can be applied to a well-formed tree.
    pub fn validate(&self) -> Result<(), ViewError> {
        check_path_filter(&self.path_filter)?;
        if let Some(dimension) = self.active_sort.and_then(|s| s.sort_key.dimension()) {
            if !self.metrics_to_show.is_shown(dimension) {
                return Err(ViewError::HiddenSortMetric { dimension });
            }
        }
        Ok(())
    }

    pub fn set_summarizer(&mut self, mode: SummarizerMode) {
        self.summarizer = mode;
    }

    pub fn cycle_summarizer(&mut self) {
        self.summarizer = self.summarizer.next();
    }

    /// Column header click: the active column flips its order, any other
    /// column becomes active ascending.
    pub fn sort_by(&mut self, sort_key: SortKey) {
        self.active_sort = Some(match self.active_sort {
            Some(active) if active.sort_key == sort_key => {
                ActiveSort::new(sort_key, active.order.reversed())
            }
            _ => ActiveSort::new(sort_key, SortOrder::Asc),
        });
    }

    pub fn clear_sort(&mut self) {
        self.active_sort = None;
    }

    pub fn toggle_bucket(&mut self, bucket: QualityBucket) {
        self.active_filters.toggle(bucket);
    }

    pub fn set_bucket(&mut self, bucket: QualityBucket, active: bool) {
        self.active_filters.set(bucket, active);
    }

    /// Show or hide a dimension. Hiding the dimension the table is sorted
    /// by falls back to sorting by path.
    pub fn toggle_metric(&mut self, dimension: Dimension) {
        let shown = !self.metrics_to_show.is_shown(dimension);
        self.metrics_to_show.set(dimension, shown);
        if !shown {
            if let Some(active) = self.active_sort {
                if active.sort_key.dimension() == Some(dimension) {
                    self.active_sort = Some(ActiveSort::default());
                }
            }
        }
    }

    /// Follow a row link: `name` is relative to the current scope.
    pub fn drill_into(&mut self, name: &str) {
        self.path_filter = join_path(&self.path_filter, name);
    }

    /// Go up one path segment; returns `false` at the top.
    pub fn drill_up(&mut self) -> bool {
        if self.path_filter.is_empty() {
            return false;
        }
        match self.path_filter.rfind('/') {
            Some(idx) => self.path_filter.truncate(idx),
            None => self.path_filter.clear(),
        }
        true
    }

    pub fn clear_path_filter(&mut self) {
        self.path_filter.clear();
    }

    /// Breadcrumb segments of the current scope, each paired with the
    /// filter that drills to it.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<(String, String)> {
        let mut crumbs = Vec::new();
        let mut path = String::new();
        for segment in self.path_filter.split('/').filter(|s| !s.is_empty()) {
            path = join_path(&path, segment);
            crumbs.push((segment.to_string(), path.clone()));
        }
        crumbs
    }
}
