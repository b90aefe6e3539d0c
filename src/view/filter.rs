//! Filter stage: hide files whose coverage falls outside the active
//! quality buckets.

use super::{ActiveFilters, MetricsToShow};
use crate::model::{Dimension, TreeNode, Watermarks};

/// Keep files with at least one shown dimension in an active bucket, and
/// directories with at least one surviving child.
///
/// Directory metrics are passed through as-is; a filtered directory still
/// reports the totals of its whole subtree.
#[must_use]
pub fn filter_nodes(
    nodes: &[TreeNode],
    metrics_to_show: &MetricsToShow,
    active_filters: &ActiveFilters,
    watermarks: &Watermarks,
) -> Vec<TreeNode> {
    nodes
        .iter()
        .filter_map(|node| match node {
            TreeNode::Directory(dir) => {
                let children =
                    filter_nodes(&dir.children, metrics_to_show, active_filters, watermarks);
                (!children.is_empty()).then(|| TreeNode::Directory(dir.with_children(children)))
            }
            TreeNode::Leaf(_) => leaf_matches(node, metrics_to_show, active_filters, watermarks)
                .then(|| node.clone()),
        })
        .collect()
}

fn leaf_matches(
    node: &TreeNode,
    metrics_to_show: &MetricsToShow,
    active_filters: &ActiveFilters,
    watermarks: &Watermarks,
) -> bool {
    Dimension::ALL
        .into_iter()
        .filter(|dimension| metrics_to_show.is_shown(*dimension))
        .any(|dimension| active_filters.is_active(watermarks.bucket(node.metrics(), dimension)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoverageMetric, CoverageMetrics, QualityBucket};

    fn names(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(TreeNode::name).collect()
    }

    fn rows() -> Vec<TreeNode> {
        vec![
            TreeNode::leaf("low.js", CoverageMetrics::uniform(20)),
            TreeNode::leaf("mid.js", CoverageMetrics::uniform(60)),
            TreeNode::directory(
                "dir",
                CoverageMetrics::uniform(55),
                vec![
                    TreeNode::leaf("high.js", CoverageMetrics::uniform(95)),
                    TreeNode::leaf("low2.js", CoverageMetrics::uniform(15)),
                ],
            ),
        ]
    }

    fn only(buckets: &[QualityBucket]) -> ActiveFilters {
        let mut filters = ActiveFilters::none();
        for bucket in buckets {
            filters.set(*bucket, true);
        }
        filters
    }

    #[test]
    fn test_all_buckets_keep_everything() {
        let kept = filter_nodes(
            &rows(),
            &MetricsToShow::default(),
            &ActiveFilters::default(),
            &Watermarks::default(),
        );
        assert_eq!(kept, rows());
    }

    #[test]
    fn test_only_high_drops_empty_directories_and_keeps_metrics() {
        let kept = filter_nodes(
            &rows(),
            &MetricsToShow::default(),
            &only(&[QualityBucket::High]),
            &Watermarks::default(),
        );
        assert_eq!(names(&kept), ["dir"]);
        assert_eq!(names(kept[0].children().unwrap()), ["high.js"]);
        assert_eq!(kept[0].metrics(), &CoverageMetrics::uniform(55));
    }

    #[test]
    fn test_only_low() {
        let kept = filter_nodes(
            &rows(),
            &MetricsToShow::default(),
            &only(&[QualityBucket::Low]),
            &Watermarks::default(),
        );
        assert_eq!(names(&kept), ["low.js", "dir"]);
        assert_eq!(names(kept[1].children().unwrap()), ["low2.js"]);
    }

    #[test]
    fn test_no_dimensions_shown_drops_everything() {
        let kept = filter_nodes(
            &rows(),
            &MetricsToShow::none(),
            &ActiveFilters::default(),
            &Watermarks::default(),
        );
        assert!(kept.is_empty());
    }

    #[test]
    fn test_any_eligible_dimension_matches() {
        let mut metrics = CoverageMetrics::uniform(90);
        metrics.branches = CoverageMetric::from_counts(10, 1, 0);
        let input = vec![TreeNode::leaf("mixed.js", metrics)];

        let low = only(&[QualityBucket::Low]);
        let all_dims = MetricsToShow::default();
        assert_eq!(
            filter_nodes(&input, &all_dims, &low, &Watermarks::default()).len(),
            1
        );

        let mut no_branches = MetricsToShow::default();
        no_branches.set(Dimension::Branches, false);
        assert!(filter_nodes(&input, &no_branches, &low, &Watermarks::default()).is_empty());
    }

    #[test]
    fn test_watermarks_move_bucket_boundaries() {
        let input = vec![TreeNode::leaf("a.js", CoverageMetrics::uniform(70))];
        let mut strict = Watermarks::default();
        strict.statements.1 = 60.0;
        strict.branches.1 = 60.0;
        strict.functions.1 = 60.0;
        strict.lines.1 = 60.0;

        let high = only(&[QualityBucket::High]);
        assert!(filter_nodes(&input, &MetricsToShow::default(), &high, &Watermarks::default()).is_empty());
        assert_eq!(filter_nodes(&input, &MetricsToShow::default(), &high, &strict).len(), 1);
    }

    #[test]
    fn test_directory_without_children_is_dropped() {
        let input = vec![TreeNode::directory("empty", CoverageMetrics::uniform(0), vec![])];
        let kept = filter_nodes(
            &input,
            &MetricsToShow::default(),
            &ActiveFilters::default(),
            &Watermarks::default(),
        );
        assert!(kept.is_empty());
    }
}
