//! Sort stage: order siblings at every depth by one key.

use super::ViewError;
use crate::model::{join_path, Dimension, MetricField, TreeNode};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Literal key that sorts by node name.
pub const PATH_SORT_KEY: &str = "file";

/// What to sort rows by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortKey {
    /// Node name, compared lexicographically
    #[default]
    Path,
    /// A numeric field of one dimension, e.g. `statements.pct`
    Metric {
        dimension: Dimension,
        field: MetricField,
    },
}

impl SortKey {
    /// Sort by a dimension's percentage.
    #[must_use]
    pub const fn pct(dimension: Dimension) -> Self {
        Self::Metric {
            dimension,
            field: MetricField::Pct,
        }
    }

    /// Dimension this key reads, if any.
    #[must_use]
    pub const fn dimension(&self) -> Option<Dimension> {
        match self {
            Self::Path => None,
            Self::Metric { dimension, .. } => Some(*dimension),
        }
    }

    fn extract<'a>(&self, node: &'a TreeNode, parent: &str) -> Result<SortValue<'a>, ViewError> {
        match self {
            Self::Path => Ok(SortValue::Text(node.name())),
            Self::Metric { dimension, field } => {
                let value = node.metrics().get(*dimension).value(*field);
                if value.is_nan() {
                    return Err(ViewError::UnorderedValue {
                        path: join_path(parent, node.name()),
                        key: self.to_string(),
                    });
                }
                Ok(SortValue::Number(value))
            }
        }
    }
}

impl FromStr for SortKey {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ViewError::InvalidSortKey {
            key: s.to_string(),
            reason: reason.to_string(),
        };

        if s == PATH_SORT_KEY {
            return Ok(Self::Path);
        }

        let (dimension, field) = match s.split_once('.') {
            Some((dimension, field)) => (dimension, Some(field)),
            None => (s, None),
        };
        let dimension = Dimension::from_key(dimension)
            .ok_or_else(|| invalid("expected 'file' or '<dimension>.<field>'"))?;
        let field = match field {
            // Bare dimension names sort by percentage
            None => MetricField::Pct,
            Some(field) => MetricField::from_key(field)
                .ok_or_else(|| invalid("field must be one of total, covered, skipped, pct"))?,
        };
        Ok(Self::Metric { dimension, field })
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path => write!(f, "{PATH_SORT_KEY}"),
            Self::Metric { dimension, field } => write!(f, "{}.{}", dimension.key(), field.key()),
        }
    }
}

impl TryFrom<String> for SortKey {
    type Error = ViewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}

impl JsonSchema for SortKey {
    fn schema_name() -> String {
        "SortKey".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// The sort currently applied to the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSort {
    pub sort_key: SortKey,
    pub order: SortOrder,
}

impl ActiveSort {
    #[must_use]
    pub const fn new(sort_key: SortKey, order: SortOrder) -> Self {
        Self { sort_key, order }
    }
}

enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl SortValue<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // NaN is rejected during extraction
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            // One key never yields both kinds
            (Self::Text(_), Self::Number(_)) | (Self::Number(_), Self::Text(_)) => Ordering::Equal,
        }
    }
}

/// Sort `nodes` and every directory's children by `sort`.
///
/// The sort is stable: rows with equal keys keep their input order.
pub fn sort_nodes(nodes: &[TreeNode], sort: &ActiveSort) -> Result<Vec<TreeNode>, ViewError> {
    sort_level(nodes, sort, "")
}

fn sort_level(
    nodes: &[TreeNode],
    sort: &ActiveSort,
    parent: &str,
) -> Result<Vec<TreeNode>, ViewError> {
    let mut keyed = nodes
        .iter()
        .map(|node| Ok((sort.sort_key.extract(node, parent)?, node)))
        .collect::<Result<Vec<_>, ViewError>>()?;

    keyed.sort_by(|(a, _), (b, _)| sort.order.apply(a.compare(b)));

    keyed
        .into_iter()
        .map(|(_, node)| match node {
            TreeNode::Directory(dir) => {
                let path = join_path(parent, &dir.name);
                let children = sort_level(&dir.children, sort, &path)?;
                Ok(TreeNode::Directory(dir.with_children(children)))
            }
            TreeNode::Leaf(_) => Ok(node.clone()),
        })
        .collect()
}
