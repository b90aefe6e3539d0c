//! Report output stage.
//!
//! Renders shaped rows as HTML and writes them to the configured target.

use crate::config::RenderConfig;
use crate::model::TreeNode;
use crate::reports::{HtmlReporter, ReportConfig, ReportGenerator, ReportMetadata};
use crate::view::{TreeView, ViewState};
use anyhow::{Context, Result};

use super::{write_output, OutputTarget};

/// Build the reporter configuration for one rendered view.
#[must_use]
pub fn report_config(config: &RenderConfig, view: &TreeView, state: &ViewState) -> ReportConfig {
    ReportConfig {
        title: config.app.output.title.clone(),
        view: state.clone(),
        watermarks: *view.watermarks(),
        overall: Some(*view.overall(state.summarizer)),
        metadata: ReportMetadata {
            source_path: Some(config.payload_path.display().to_string()),
            ..ReportMetadata::default()
        },
    }
}

/// Render `rows` and write the report to the configured destination.
pub fn output_report(
    config: &RenderConfig,
    view: &TreeView,
    state: &ViewState,
    rows: &[TreeNode],
) -> Result<()> {
    let output_target = OutputTarget::from_option(config.app.output.file.clone());
    let report = HtmlReporter::new()
        .generate_report(rows, &report_config(config, view, state))
        .context("Failed to render HTML report")?;

    write_output(&report, &output_target, config.quiet)
}
