//! Report configuration types.

use crate::model::{CoverageMetrics, Watermarks};
use crate::view::ViewState;
use chrono::{DateTime, Utc};

/// Everything a reporter needs besides the rows themselves.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Page title
    pub title: String,
    /// The view the rows were shaped for
    pub view: ViewState,
    /// Thresholds used to classify cells
    pub watermarks: Watermarks,
    /// Totals of the summarizer root, shown above the table
    pub overall: Option<CoverageMetrics>,
    /// Report metadata
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: crate::config::DEFAULT_TITLE.to_string(),
            view: ViewState::default(),
            watermarks: Watermarks::default(),
            overall: None,
            metadata: ReportMetadata::default(),
        }
    }
}

/// Report metadata
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// Payload the report was rendered from
    pub source_path: Option<String>,
    /// Timestamp shown in the footer
    pub generated_at: DateTime<Utc>,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            source_path: None,
            generated_at: Utc::now(),
        }
    }
}
