//! Render command handler.
//!
//! Implements the `render` subcommand: load a payload, shape it for the
//! configured view and write the HTML table.

use crate::config::{RenderConfig, Validatable};
use crate::pipeline::{
    compute_view, exit_codes, load_report, output_report, JsonFileSource, JsonTextSource,
    PipelineError, TreeSource,
};
use crate::view::TreeView;
use anyhow::{bail, Result};
use std::path::Path;

/// Payload path that reads from stdin.
const STDIN_PATH: &str = "-";

/// Run the render command
#[allow(clippy::needless_pass_by_value)]
pub fn run_render(config: RenderConfig) -> Result<i32> {
    let reading_stdin = config.payload_path == Path::new(STDIN_PATH);

    let errors: Vec<_> = config
        .validate()
        .into_iter()
        .filter(|e| !(reading_stdin && e.field == "payload_path"))
        .collect();
    if !errors.is_empty() {
        for error in &errors {
            tracing::error!("{error}");
        }
        bail!("Invalid configuration ({} problems)", errors.len());
    }

    let state = config.app.view.to_view_state()?;

    let source: Box<dyn TreeSource> = if reading_stdin {
        Box::new(JsonTextSource::from_reader("stdin", std::io::stdin().lock())?)
    } else {
        Box::new(JsonFileSource::new(&config.payload_path))
    };
    let data = load_report(source.as_ref(), config.quiet).map_err(|source_err| {
        PipelineError::LoadFailed {
            path: source.describe(),
            source: source_err,
        }
    })?;

    let view = TreeView::new(data, config.app.watermarks);
    let rows = compute_view(&view, &state, config.quiet)
        .map_err(|source| PipelineError::ViewFailed { source })?;

    output_report(&config, &view, &state, &rows)
        .map_err(|source| PipelineError::ReportFailed { source })?;

    if rows.is_empty() {
        if !config.quiet {
            tracing::warn!("No rows matched the current view");
        }
        return Ok(exit_codes::NO_ROWS);
    }
    Ok(exit_codes::SUCCESS)
}
