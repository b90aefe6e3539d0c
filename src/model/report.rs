//! The report payload supplied by the tree source, and its validation.

use super::metrics::{expected_pct, CoverageMetric, Dimension};
use super::node::TreeNode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Tolerance when checking a payload percentage against its counts.
///
/// Payload percentages are floored to two decimals.
const PCT_TOLERANCE: f64 = 0.011;

/// Errors found while validating a coverage tree.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TreeError {
    #[error("Invalid node name '{name}' under '{parent}': {reason}")]
    InvalidName {
        parent: String,
        name: String,
        reason: &'static str,
    },

    #[error("Invalid {dimension} metric at '{path}': {reason}")]
    InvalidMetric {
        path: String,
        dimension: Dimension,
        reason: String,
    },

    #[error("Inconsistent {dimension} percentage at '{path}': payload says {actual}, counts give {expected}")]
    InconsistentPercent {
        path: String,
        dimension: Dimension,
        actual: f64,
        expected: f64,
    },

    #[error("Directory '{path}' does not match its children: {dimension} {field} is {actual}, children sum to {expected}")]
    UnbalancedDirectory {
        path: String,
        dimension: Dimension,
        field: &'static str,
        actual: u64,
        expected: u64,
    },

    #[error("Duplicate path '{path}'")]
    DuplicatePath { path: String },

    #[error("Summarizer root '{0}' must be a directory")]
    RootNotDirectory(&'static str),
}

/// Coverage trees for each summarizer, as produced by the report generator.
///
/// `package` groups files by directory; `nested` mirrors the directory
/// hierarchy. The roots' own names do not take part in paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawReportData")]
pub struct ReportData {
    pub package: TreeNode,
    pub nested: TreeNode,
}

/// A payload is either keyed by summarizer or a single root node that
/// serves both summarizers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReportData {
    Keyed {
        package: TreeNode,
        #[serde(default)]
        nested: Option<TreeNode>,
    },
    Single(TreeNode),
}

impl From<RawReportData> for ReportData {
    fn from(raw: RawReportData) -> Self {
        match raw {
            RawReportData::Keyed { package, nested } => {
                let nested = nested.unwrap_or_else(|| package.clone());
                Self { package, nested }
            }
            RawReportData::Single(root) => Self {
                package: root.clone(),
                nested: root,
            },
        }
    }
}

impl ReportData {
    /// Use one root for both summarizers.
    #[must_use]
    pub fn single(root: TreeNode) -> Self {
        Self {
            package: root.clone(),
            nested: root,
        }
    }

    /// Parse a payload from JSON without validating it.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the tree invariants of both summarizer roots.
    pub fn validate(&self) -> Result<(), TreeError> {
        validate_root(&self.package, "package")?;
        validate_root(&self.nested, "nested")
    }
}

fn validate_root(root: &TreeNode, summarizer: &'static str) -> Result<(), TreeError> {
    let Some(children) = root.children() else {
        return Err(TreeError::RootNotDirectory(summarizer));
    };
    check_metrics(root, "")?;
    check_aggregation(root, "")?;
    let mut seen = HashSet::new();
    validate_children(children, "", &mut seen)
}

fn validate_children(
    nodes: &[TreeNode],
    parent: &str,
    seen: &mut HashSet<String>,
) -> Result<(), TreeError> {
    for node in nodes {
        check_name(node.name(), parent)?;
        let path = join_path(parent, node.name());
        check_metrics(node, &path)?;
        if !seen.insert(path.clone()) {
            return Err(TreeError::DuplicatePath { path });
        }
        if let Some(children) = node.children() {
            check_aggregation(node, &path)?;
            validate_children(children, &path, seen)?;
        }
    }
    Ok(())
}

/// Join a parent path and a relative name with `/`.
#[must_use]
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

fn check_name(name: &str, parent: &str) -> Result<(), TreeError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.contains('\\') {
        Some("backslash separators are not allowed")
    } else if name.starts_with('/') {
        Some("absolute paths are not allowed")
    } else if name.ends_with('/') {
        Some("trailing separator")
    } else if name.split('/').any(str::is_empty) {
        Some("empty path segment")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(TreeError::InvalidName {
            parent: parent.to_string(),
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn check_metrics(node: &TreeNode, path: &str) -> Result<(), TreeError> {
    for dimension in Dimension::ALL {
        check_metric(node.metrics().get(dimension), dimension, path)?;
    }
    Ok(())
}

fn check_metric(metric: &CoverageMetric, dimension: Dimension, path: &str) -> Result<(), TreeError> {
    let invalid = |reason: String| TreeError::InvalidMetric {
        path: path.to_string(),
        dimension,
        reason,
    };

    if !metric.pct.is_finite() || !(0.0..=100.0).contains(&metric.pct) {
        return Err(invalid(format!("pct {} is outside 0-100", metric.pct)));
    }
    if metric.covered > metric.total {
        return Err(invalid(format!(
            "covered {} exceeds total {}",
            metric.covered, metric.total
        )));
    }

    let expected = expected_pct(metric.total, metric.covered);
    if (metric.pct - expected).abs() > PCT_TOLERANCE {
        return Err(TreeError::InconsistentPercent {
            path: path.to_string(),
            dimension,
            actual: metric.pct,
            expected,
        });
    }
    Ok(())
}

fn check_aggregation(node: &TreeNode, path: &str) -> Result<(), TreeError> {
    let Some(children) = node.children() else {
        return Ok(());
    };
    // Zero-leaf directories carry whatever totals the generator wrote.
    if children.is_empty() {
        return Ok(());
    }

    for dimension in Dimension::ALL {
        let metric = node.metrics().get(dimension);
        let total: u64 = children.iter().map(|c| c.metrics().get(dimension).total).sum();
        let covered: u64 = children.iter().map(|c| c.metrics().get(dimension).covered).sum();

        for (field, actual, expected) in [
            ("total", metric.total, total),
            ("covered", metric.covered, covered),
        ] {
            if actual != expected {
                return Err(TreeError::UnbalancedDirectory {
                    path: path.to_string(),
                    dimension,
                    field,
                    actual,
                    expected,
                });
            }
        }
    }
    Ok(())
}
