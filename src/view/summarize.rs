//! Summarize stage: pick the node list for a summarizer mode.

use super::SummarizerMode;
use crate::model::{join_path, DirectoryNode, FileNode, ReportData, TreeNode};

/// Top-level rows for `mode`.
///
/// `package` and `nested` return their root's children with the same
/// structure and names. `flat` walks the package tree depth-first and
/// returns every file at the top level, named by its full path below the
/// root.
///
/// The payload writes each `output` link relative to the node's parent.
/// Every row returned here carries its link resolved against the report
/// root instead, so later stages can rename and re-root rows freely.
#[must_use]
pub fn summarize(data: &ReportData, mode: SummarizerMode) -> Vec<TreeNode> {
    match mode {
        SummarizerMode::Package => top_level(&data.package),
        SummarizerMode::Nested => top_level(&data.nested),
        SummarizerMode::Flat => {
            let mut leaves = Vec::new();
            if let Some(children) = data.package.children() {
                flatten_into(children, "", &mut leaves);
            }
            leaves
        }
    }
}

fn top_level(root: &TreeNode) -> Vec<TreeNode> {
    root.children()
        .map(|children| with_root_links(children, ""))
        .unwrap_or_default()
}

/// Copy `nodes` with every link rebased from `parent` to the report root.
fn with_root_links(nodes: &[TreeNode], parent: &str) -> Vec<TreeNode> {
    nodes
        .iter()
        .map(|node| {
            let output = root_link(node, parent);
            match node {
                TreeNode::Leaf(file) => TreeNode::Leaf(FileNode {
                    output,
                    ..file.clone()
                }),
                TreeNode::Directory(dir) => {
                    let path = join_path(parent, &dir.name);
                    TreeNode::Directory(DirectoryNode {
                        name: dir.name.clone(),
                        output,
                        metrics: dir.metrics,
                        children: with_root_links(&dir.children, &path),
                    })
                }
            }
        })
        .collect()
}

fn root_link(node: &TreeNode, parent: &str) -> Option<String> {
    node.output().map(|href| join_path(parent, href))
}

/// Append every leaf under `nodes` to `out`, renamed to its path from the
/// flattening root.
fn flatten_into(nodes: &[TreeNode], parent: &str, out: &mut Vec<TreeNode>) {
    for node in nodes {
        let path = join_path(parent, node.name());
        match node {
            TreeNode::Directory(dir) => flatten_into(&dir.children, &path, out),
            TreeNode::Leaf(file) => out.push(TreeNode::Leaf(FileNode {
                name: path,
                output: root_link(node, parent),
                metrics: file.metrics,
            })),
        }
    }
}
