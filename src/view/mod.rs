//! Tree view engine.
//!
//! Four pure stages shape a coverage tree into the rows a report shows:
//!
//! 1. [`summarize`] picks the node list for the summarizer mode
//! 2. [`scope`] restricts it to the subtree under a path filter
//! 3. [`filter_nodes`] drops files outside the active quality buckets
//! 4. [`sort_nodes`] orders siblings at every depth
//!
//! Stages never mutate their input; each returns freshly built nodes.
//! [`child_rows`] runs them in order for a [`ViewState`].
//!
//! ```ignore
//! let mut state = ViewState::new();
//! state.set_summarizer(SummarizerMode::Flat);
//! state.sort_by("statements.pct".parse()?);
//!
//! let rows = child_rows(&data, &state, &Watermarks::default())?;
//! ```

mod filter;
mod scope;
mod sort;
mod state;
mod summarize;

pub use filter::filter_nodes;
pub use scope::{check_path_filter, scope};
pub use sort::{sort_nodes, ActiveSort, SortKey, SortOrder, PATH_SORT_KEY};
pub use state::{ActiveFilters, CycleFilter, MetricsToShow, SummarizerMode, ViewState};
pub use summarize::summarize;

use crate::model::{CoverageMetrics, Dimension, ReportData, TreeNode, Watermarks};

/// Errors raised while shaping a view.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ViewError {
    #[error("invalid sort key '{key}': {reason}")]
    InvalidSortKey { key: String, reason: String },

    #[error("cannot sort by {dimension}: the dimension is hidden")]
    HiddenSortMetric { dimension: Dimension },

    #[error("invalid path filter '{filter}': {reason}")]
    InvalidPathFilter {
        filter: String,
        reason: &'static str,
    },

    #[error("'{path}' has no ordered value for sort key {key}")]
    UnorderedValue { path: String, key: String },
}

/// Rows to display for `state`.
///
/// Runs summarize, scope (when a path filter is set), filter and sort (when
/// a sort is active). Fails before touching the tree if the state itself is
/// invalid.
pub fn child_rows(
    data: &ReportData,
    state: &ViewState,
    watermarks: &Watermarks,
) -> Result<Vec<TreeNode>, ViewError> {
    state.validate()?;

    let mut rows = summarize(data, state.summarizer);
    tracing::debug!(mode = %state.summarizer, rows = rows.len(), "summarized");

    if !state.path_filter.is_empty() {
        rows = scope(&rows, &state.path_filter)?;
        tracing::debug!(path = %state.path_filter, rows = rows.len(), "scoped");
    }

    rows = filter_nodes(
        &rows,
        &state.metrics_to_show,
        &state.active_filters,
        watermarks,
    );
    tracing::debug!(rows = rows.len(), "filtered");

    if let Some(sort) = &state.active_sort {
        rows = sort_nodes(&rows, sort)?;
    }
    Ok(rows)
}

/// A loaded report paired with the watermarks used to classify it.
#[derive(Debug, Clone)]
pub struct TreeView {
    data: ReportData,
    watermarks: Watermarks,
}

impl TreeView {
    #[must_use]
    pub const fn new(data: ReportData, watermarks: Watermarks) -> Self {
        Self { data, watermarks }
    }

    #[must_use]
    pub const fn data(&self) -> &ReportData {
        &self.data
    }

    #[must_use]
    pub const fn watermarks(&self) -> &Watermarks {
        &self.watermarks
    }

    /// Rows for `state`. See [`child_rows`].
    pub fn rows(&self, state: &ViewState) -> Result<Vec<TreeNode>, ViewError> {
        child_rows(&self.data, state, &self.watermarks)
    }

    /// Totals of the root the summarizer reads from.
    #[must_use]
    pub const fn overall(&self, mode: SummarizerMode) -> &CoverageMetrics {
        match mode {
            SummarizerMode::Nested => self.data.nested.metrics(),
            SummarizerMode::Package | SummarizerMode::Flat => self.data.package.metrics(),
        }
    }
}
