#![no_main]
use covtree::{child_rows, CoverageMetrics, ReportData, TreeNode, ViewState, Watermarks};
use libfuzzer_sys::fuzz_target;

/// Fuzz view state deserialization against a fixed tree.
///
/// Path filters and sort keys come straight from the input, so malformed
/// values must surface as errors rather than panics.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let Ok(state) = serde_json::from_str::<ViewState>(s) else {
            return;
        };

        let m = CoverageMetrics::uniform(60);
        let root = TreeNode::directory(
            "",
            m,
            vec![TreeNode::directory(
                "src",
                m,
                vec![TreeNode::leaf("a.js", m), TreeNode::leaf("b/c.js", m)],
            )],
        );
        let _ = child_rows(&ReportData::single(root), &state, &Watermarks::default());
    }
});
