#![no_main]
use covtree::{child_rows, ReportData, SortKey, SummarizerMode, ViewState, Watermarks};
use libfuzzer_sys::fuzz_target;

/// Fuzz payload parsing, validation and the view engine.
///
/// Any payload that validates must be shapeable in every summarizer mode
/// without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let Ok(report) = ReportData::from_json_str(s) else {
            return;
        };
        if report.validate().is_err() {
            return;
        }

        let mut state = ViewState::new();
        for mode in [SummarizerMode::Package, SummarizerMode::Nested, SummarizerMode::Flat] {
            state.set_summarizer(mode);
            let _ = child_rows(&report, &state, &Watermarks::default());
            state.sort_by(SortKey::Path);
        }
    }
});
