//! Report generation for shaped coverage rows.
//!
//! Reporters take the rows returned by the view engine and render them;
//! they never reshape the tree themselves.
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! File names and links come from the payload and must be escaped before
//! being embedded in HTML.

pub mod escape;
mod html;
mod types;

pub use html::{format_pct, HtmlReporter};
pub use types::{ReportConfig, ReportMetadata};

use crate::model::TreeNode;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the rows of one view
    fn generate_report(&self, rows: &[TreeNode], config: &ReportConfig)
        -> Result<String, ReportError>;

    /// Write the report to a writer
    fn write_report(
        &self,
        rows: &[TreeNode],
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_report(rows, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }
}
