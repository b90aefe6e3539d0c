//! Scope stage: restrict rows to the subtree under a path and re-root
//! their names relative to it.

use super::ViewError;
use crate::model::{join_path, TreeNode};

/// Keep only the nodes at or under `path_filter`, named relative to it.
///
/// Ancestors of the filter are not emitted; their matching descendants are
/// spliced into the output in their place. Matching is per path segment,
/// so `src` scopes `src/a.js` but not `srcx/a.js`. An empty filter returns
/// the input unchanged.
pub fn scope(nodes: &[TreeNode], path_filter: &str) -> Result<Vec<TreeNode>, ViewError> {
    if path_filter.is_empty() {
        return Ok(nodes.to_vec());
    }
    check_path_filter(path_filter)?;
    Ok(scope_level(nodes, path_filter, ""))
}

/// Reject filters that can never name a node.
pub fn check_path_filter(path_filter: &str) -> Result<(), ViewError> {
    let reason = if path_filter.contains('\\') {
        Some("use '/' as the path separator")
    } else if path_filter.starts_with('/') {
        Some("path must be relative")
    } else if path_filter.ends_with('/') {
        Some("trailing separator")
    } else if path_filter.split('/').any(str::is_empty) {
        Some("empty path segment")
    } else {
        None
    };

    match reason {
        Some(reason) if !path_filter.is_empty() => Err(ViewError::InvalidPathFilter {
            filter: path_filter.to_string(),
            reason,
        }),
        _ => Ok(()),
    }
}

fn scope_level(nodes: &[TreeNode], path_filter: &str, parent: &str) -> Vec<TreeNode> {
    let mut out = Vec::new();
    for node in nodes {
        let full_path = join_path(parent, node.name());

        if full_path == path_filter {
            match node.children() {
                Some(children) => out.extend(scope_level(children, path_filter, &full_path)),
                None => out.push(node.with_name(last_segment(&full_path))),
            }
        } else if is_under(path_filter, &full_path) {
            if let Some(children) = node.children() {
                out.extend(scope_level(children, path_filter, &full_path));
            }
        } else if is_under(&full_path, path_filter) {
            out.push(node.with_name(&full_path[path_filter.len() + 1..]));
        }
    }
    out
}

/// True when `path` lies strictly below `ancestor`.
fn is_under(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
