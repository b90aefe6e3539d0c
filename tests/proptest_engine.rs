//! Property-based tests for the view engine.
//!
//! Random coverage trees are pushed through each stage to check the
//! invariants that must hold regardless of tree shape.

use covtree::model::{count_leaves, join_path, CoverageMetrics};
use covtree::view::{
    filter_nodes, scope, sort_nodes, summarize, ActiveFilters, ActiveSort, MetricsToShow,
    SortKey, SortOrder, SummarizerMode,
};
use covtree::{child_rows, Dimension, QualityBucket, ReportData, TreeNode, ViewState, Watermarks};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Shape {
    Leaf(u64),
    Dir(Vec<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = (0u64..=100).prop_map(Shape::Leaf);
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Shape::Dir)
    })
}

/// Sibling names are derived from position so paths never collide.
fn build(shapes: &[Shape]) -> Vec<TreeNode> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| match shape {
            Shape::Leaf(pct) => TreeNode::leaf(format!("f{i}.js"), CoverageMetrics::uniform(*pct)),
            Shape::Dir(children) => TreeNode::directory(
                format!("d{i}"),
                CoverageMetrics::uniform(50),
                build(children),
            ),
        })
        .collect()
}

fn report() -> impl Strategy<Value = ReportData> {
    prop::collection::vec(shape(), 0..8).prop_map(|top| {
        ReportData::single(TreeNode::directory(
            "",
            CoverageMetrics::uniform(50),
            build(&top),
        ))
    })
}

fn sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Path),
        prop::sample::select(Dimension::ALL.to_vec()).prop_map(SortKey::pct),
        Just(SortKey::Metric {
            dimension: Dimension::Lines,
            field: covtree::model::MetricField::Covered,
        }),
    ]
}

fn order() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)]
}

fn leaf_paths(nodes: &[TreeNode], parent: &str, out: &mut Vec<String>) {
    for node in nodes {
        let path = join_path(parent, node.name());
        match node.children() {
            Some(children) => leaf_paths(children, &path, out),
            None => out.push(path),
        }
    }
}

fn no_empty_directories(nodes: &[TreeNode]) -> bool {
    nodes.iter().all(|node| match node.children() {
        Some(children) => !children.is_empty() && no_empty_directories(children),
        None => true,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn flatten_preserves_leaf_count(data in report()) {
        let flat = summarize(&data, SummarizerMode::Flat);
        prop_assert_eq!(flat.len(), data.package.leaf_count());
        prop_assert!(flat.iter().all(|row| !row.is_directory()));
    }

    #[test]
    fn flatten_names_are_leaf_paths(data in report()) {
        let mut expected = Vec::new();
        leaf_paths(data.package.children().unwrap_or(&[]), "", &mut expected);

        let flat = summarize(&data, SummarizerMode::Flat);
        let names: Vec<String> = flat.iter().map(|row| row.name().to_string()).collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn scope_keeps_exactly_the_subtree(data in report(), target in 0usize..8) {
        let filter = format!("d{target}");
        let rows = summarize(&data, SummarizerMode::Nested);
        let scoped = scope(&rows, &filter).unwrap();

        let mut all = Vec::new();
        leaf_paths(&rows, "", &mut all);
        let prefix = format!("{filter}/");
        let expected = all.iter().filter(|path| path.starts_with(&prefix)).count();
        prop_assert_eq!(count_leaves(&scoped), expected);
        prop_assert_eq!(scope(&scoped, "").unwrap(), scoped);
    }

    #[test]
    fn filter_is_monotonic_in_active_buckets(
        data in report(),
        low in any::<bool>(),
        medium in any::<bool>(),
        extra in prop::sample::select(QualityBucket::ALL.to_vec()),
    ) {
        let rows = summarize(&data, SummarizerMode::Nested);
        let shown = MetricsToShow::default();
        let watermarks = Watermarks::default();

        let mut active = ActiveFilters::none();
        active.set(QualityBucket::Low, low);
        active.set(QualityBucket::Medium, medium);
        let mut before = Vec::new();
        leaf_paths(&filter_nodes(&rows, &shown, &active, &watermarks), "", &mut before);

        active.set(extra, true);
        let mut after = Vec::new();
        leaf_paths(&filter_nodes(&rows, &shown, &active, &watermarks), "", &mut after);

        for path in &before {
            prop_assert!(after.contains(path), "{} dropped after enabling {}", path, extra);
        }
    }

    #[test]
    fn filter_never_leaves_empty_directories(
        data in report(),
        bucket in prop::sample::select(QualityBucket::ALL.to_vec()),
    ) {
        let rows = summarize(&data, SummarizerMode::Nested);
        let filtered = filter_nodes(
            &rows,
            &MetricsToShow::default(),
            &ActiveFilters::only(&[bucket]),
            &Watermarks::default(),
        );
        prop_assert!(no_empty_directories(&filtered));
    }

    #[test]
    fn sort_is_idempotent(data in report(), key in sort_key(), order in order()) {
        let sort = ActiveSort::new(key, order);
        let rows = summarize(&data, SummarizerMode::Nested);
        let once = sort_nodes(&rows, &sort).unwrap();
        let twice = sort_nodes(&once, &sort).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn path_sort_reverses_exactly(data in report()) {
        // Flat names are full paths, so there are no ties
        let rows = summarize(&data, SummarizerMode::Flat);
        let asc = sort_nodes(&rows, &ActiveSort::new(SortKey::Path, SortOrder::Asc)).unwrap();
        let mut desc = sort_nodes(&rows, &ActiveSort::new(SortKey::Path, SortOrder::Desc)).unwrap();
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn child_rows_never_mutates_input(
        data in report(),
        key in sort_key(),
        bucket in prop::sample::select(QualityBucket::ALL.to_vec()),
    ) {
        let before = data.clone();
        let mut state = ViewState::new();
        state.set_summarizer(SummarizerMode::Flat);
        state.sort_by(key);
        state.toggle_bucket(bucket);

        let rows = child_rows(&data, &state, &Watermarks::default()).unwrap();
        prop_assert!(rows.len() <= data.package.leaf_count());
        prop_assert_eq!(data, before);
    }
}
