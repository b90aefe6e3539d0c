//! Coverage tree nodes.
//!
//! A node is either a [`FileNode`] (one source file) or a
//! [`DirectoryNode`] with children. Nodes are never mutated once built:
//! the view stages derive new nodes with [`TreeNode::with_name`] and
//! [`DirectoryNode::with_children`].

use super::metrics::CoverageMetrics;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A leaf node: coverage for a single source file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    /// Path relative to the parent node
    pub name: String,
    /// Link to the file's detail page, relative to the parent node's page.
    /// Rows from the view engine carry it relative to the report root.
    pub output: Option<String>,
    pub metrics: CoverageMetrics,
}

/// A directory node with aggregated metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryNode {
    /// Path relative to the parent node (may span several segments)
    pub name: String,
    pub output: Option<String>,
    pub metrics: CoverageMetrics,
    pub children: Vec<TreeNode>,
}

impl DirectoryNode {
    /// Copy of this directory holding `children` instead of its own.
    ///
    /// The existing children are not cloned.
    #[must_use]
    pub fn with_children(&self, children: Vec<TreeNode>) -> Self {
        Self {
            name: self.name.clone(),
            output: self.output.clone(),
            metrics: self.metrics,
            children,
        }
    }
}

/// A node in the coverage tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum TreeNode {
    Leaf(FileNode),
    Directory(DirectoryNode),
}

impl TreeNode {
    /// Create a leaf node
    pub fn leaf(name: impl Into<String>, metrics: CoverageMetrics) -> Self {
        Self::Leaf(FileNode {
            name: name.into(),
            output: None,
            metrics,
        })
    }

    /// Create a directory node
    pub fn directory(
        name: impl Into<String>,
        metrics: CoverageMetrics,
        children: Vec<Self>,
    ) -> Self {
        Self::Directory(DirectoryNode {
            name: name.into(),
            output: None,
            metrics,
            children,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(node) => &node.name,
            Self::Directory(node) => &node.name,
        }
    }

    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Leaf(node) => node.output.as_deref(),
            Self::Directory(node) => node.output.as_deref(),
        }
    }

    #[must_use]
    pub const fn metrics(&self) -> &CoverageMetrics {
        match self {
            Self::Leaf(node) => &node.metrics,
            Self::Directory(node) => &node.metrics,
        }
    }

    /// Children of a directory; `None` for leaves.
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        match self {
            Self::Directory(node) => Some(&node.children),
            Self::Leaf(_) => None,
        }
    }

    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// True when the node has no instrumented lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.metrics().is_empty()
    }

    /// Copy of this node under a different name.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        match self {
            Self::Leaf(node) => Self::Leaf(FileNode {
                name: name.into(),
                ..node.clone()
            }),
            Self::Directory(node) => Self::Directory(DirectoryNode {
                name: name.into(),
                ..node.clone()
            }),
        }
    }

    /// Number of leaves in this subtree (1 for a leaf).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Directory(node) => node.children.iter().map(Self::leaf_count).sum(),
        }
    }
}

/// Total leaf count of a node list.
#[must_use]
pub fn count_leaves(nodes: &[TreeNode]) -> usize {
    nodes.iter().map(TreeNode::leaf_count).sum()
}

// ============================================================================
// Wire shape
// ============================================================================

/// Node as embedded in the HTML report payload.
///
/// The generator writes `"children": false` for files, so `children` only
/// marks a directory when it holds an array.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(default)]
    is_empty: Option<bool>,
    metrics: CoverageMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<RawChildren>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawChildren {
    Nodes(Vec<TreeNode>),
    Absent(NoChildren),
}

/// The literal `false` a file node carries in place of a child list.
struct NoChildren;

impl Serialize for NoChildren {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(false)
    }
}

impl<'de> Deserialize<'de> for NoChildren {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if bool::deserialize(deserializer)? {
            return Err(de::Error::custom("`children: true` is not a child list"));
        }
        Ok(Self)
    }
}

impl TryFrom<RawNode> for TreeNode {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        if let Some(is_empty) = raw.is_empty {
            if is_empty != raw.metrics.is_empty() {
                return Err(format!(
                    "'{}' has isEmpty {is_empty} but {} lines",
                    raw.file, raw.metrics.lines.total
                ));
            }
        }

        Ok(match raw.children {
            Some(RawChildren::Nodes(children)) => Self::Directory(DirectoryNode {
                name: raw.file,
                output: raw.output,
                metrics: raw.metrics,
                children,
            }),
            Some(RawChildren::Absent(NoChildren)) | None => Self::Leaf(FileNode {
                name: raw.file,
                output: raw.output,
                metrics: raw.metrics,
            }),
        })
    }
}

impl From<TreeNode> for RawNode {
    fn from(node: TreeNode) -> Self {
        let is_empty = Some(node.is_empty());
        match node {
            TreeNode::Leaf(leaf) => Self {
                file: leaf.name,
                output: leaf.output,
                is_empty,
                metrics: leaf.metrics,
                children: None,
            },
            TreeNode::Directory(dir) => Self {
                file: dir.name,
                output: dir.output,
                is_empty,
                metrics: dir.metrics,
                children: Some(RawChildren::Nodes(dir.children)),
            },
        }
    }
}
