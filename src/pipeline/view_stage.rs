//! View computation stage.
//!
//! Runs the tree view engine for the requested state and reports what it
//! produced.

use crate::model::{count_leaves, TreeNode};
use crate::view::{TreeView, ViewState};
use anyhow::{Context, Result};

/// Shape the rows for `state`.
pub fn compute_view(view: &TreeView, state: &ViewState, quiet: bool) -> Result<Vec<TreeNode>> {
    if !quiet {
        tracing::info!(
            "Building {} view{}",
            state.summarizer,
            if state.path_filter.is_empty() {
                String::new()
            } else {
                format!(" of {}", state.path_filter)
            }
        );
    }

    let rows = view.rows(state).context("Failed to build view")?;

    if !quiet {
        tracing::info!(
            "{} rows, {} files after filtering",
            rows.len(),
            count_leaves(&rows)
        );
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoverageMetrics, ReportData, Watermarks};
    use crate::view::{SortKey, SummarizerMode};

    fn view() -> TreeView {
        let root = TreeNode::directory(
            "",
            CoverageMetrics::uniform(50),
            vec![TreeNode::directory(
                "lib",
                CoverageMetrics::uniform(50),
                vec![
                    TreeNode::leaf("x.js", CoverageMetrics::uniform(20)),
                    TreeNode::leaf("y.js", CoverageMetrics::uniform(80)),
                ],
            )],
        );
        TreeView::new(ReportData::single(root), Watermarks::default())
    }

    #[test]
    fn test_compute_view() {
        let mut state = ViewState::new();
        state.set_summarizer(SummarizerMode::Flat);
        let rows = compute_view(&view(), &state, true).unwrap();
        let names: Vec<_> = rows.iter().map(TreeNode::name).collect();
        assert_eq!(names, ["lib/x.js", "lib/y.js"]);
    }

    #[test]
    fn test_compute_view_reports_engine_errors() {
        let mut state = ViewState::new();
        state.sort_by(SortKey::pct(crate::model::Dimension::Lines));
        state.metrics_to_show.lines = false;

        let err = compute_view(&view(), &state, true).unwrap_err();
        assert_eq!(err.to_string(), "Failed to build view");
        assert!(err.root_cause().to_string().contains("hidden"));
    }
}
