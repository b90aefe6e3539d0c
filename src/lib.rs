//! **Reshape coverage report trees for display.**
//!
//! `covtree` takes the coverage tree an HTML coverage report is built from
//! (statements, branches, functions and lines per file, aggregated per
//! directory) and turns it into the rows a viewer asks for: the tree as
//! given, flattened to a list of files, scoped to a subtree, filtered by
//! coverage quality and sorted by any metric or by name.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the coverage tree ([`TreeNode`]), its metrics, quality
//!   buckets and watermarks, and the [`ReportData`] payload with validation.
//! - **[`view`]**: the tree view engine. Four pure stages (summarize, scope,
//!   filter, sort) composed by [`child_rows`], plus the serializable
//!   [`ViewState`] with the transitions a report UI performs.
//! - **[`pipeline`]**: tree sources, the view and report stages, output.
//! - **[`reports`]**: the HTML table renderer.
//! - **[`config`]**: YAML configuration with discovery and validation.
//!
//! ## Getting Started
//!
//! ```no_run
//! use covtree::pipeline::{JsonFileSource, TreeSource};
//! use covtree::{child_rows, ViewState, Watermarks};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = JsonFileSource::new("coverage/report.json").load()?;
//!
//!     let mut state = ViewState::new();
//!     state.set_summarizer(covtree::SummarizerMode::Flat);
//!     state.sort_by("statements.pct".parse()?);
//!
//!     for row in child_rows(&data, &state, &Watermarks::default())? {
//!         println!("{:>7.2}%  {}", row.metrics().statements.pct, row.name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Drilling into a subtree
//!
//! ```
//! use covtree::{child_rows, CoverageMetrics, ReportData, TreeNode, ViewState, Watermarks};
//!
//! let root = TreeNode::directory(
//!     "",
//!     CoverageMetrics::uniform(70),
//!     vec![TreeNode::directory(
//!         "src",
//!         CoverageMetrics::uniform(70),
//!         vec![TreeNode::leaf("utils.js", CoverageMetrics::uniform(70))],
//!     )],
//! );
//! let data = ReportData::single(root);
//!
//! let mut state = ViewState::new();
//! state.drill_into("src");
//! let rows = child_rows(&data, &state, &Watermarks::default()).unwrap();
//! assert_eq!(rows[0].name(), "utils.js");
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Counts are widened to f64 for sorting and display
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    // State structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools,
    clippy::unused_self
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod view;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, OutputConfig, Validatable, ViewConfig};
pub use error::{CovtreeError, ErrorContext, Result};
pub use model::{
    CoverageMetric, CoverageMetrics, Dimension, QualityBucket, ReportData, TreeError, TreeNode,
    Watermark, Watermarks,
};
pub use reports::{HtmlReporter, ReportGenerator};
pub use view::{
    child_rows, ActiveFilters, ActiveSort, CycleFilter, MetricsToShow, SortKey, SortOrder,
    SummarizerMode, TreeView, ViewError, ViewState,
};
