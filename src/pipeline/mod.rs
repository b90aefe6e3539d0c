//! Pipeline orchestration for coverage reports.
//!
//! Shared load → view → report logic for the CLI command handlers.

mod output;
mod report_stage;
mod source;
mod view_stage;

pub use output::{write_output, OutputTarget};
pub use report_stage::{output_report, report_config};
pub use source::{load_report, JsonFileSource, JsonTextSource, TreeSource};
pub use view_stage::compute_view;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read, parse or validate a payload
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// The view request could not be applied
    #[error("View failed: {source}")]
    ViewFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - at least one row was rendered
    pub const SUCCESS: i32 = 0;
    /// The view matched no rows
    pub const NO_ROWS: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
