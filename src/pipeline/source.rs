//! Tree sources: where a report payload comes from.

use crate::error::{CovtreeError, ErrorContext, Result};
use crate::model::ReportData;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Something that can supply a validated coverage report.
pub trait TreeSource {
    /// Load, parse and validate the payload.
    fn load(&self) -> Result<ReportData>;

    /// Human-readable origin, for logs and report footers.
    fn describe(&self) -> String;
}

/// A JSON payload file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TreeSource for JsonFileSource {
    fn load(&self) -> Result<ReportData> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| CovtreeError::io(&self.path, e))?;
        parse_and_validate(&content).with_context(|| self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A JSON payload already in memory, e.g. read from stdin.
#[derive(Debug, Clone)]
pub struct JsonTextSource {
    label: String,
    json: String,
}

impl JsonTextSource {
    pub fn new(label: impl Into<String>, json: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            json: json.into(),
        }
    }

    /// Read the whole of `reader` as a payload.
    pub fn from_reader(label: impl Into<String>, mut reader: impl Read) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Ok(Self::new(label, json))
    }
}

impl TreeSource for JsonTextSource {
    fn load(&self) -> Result<ReportData> {
        parse_and_validate(&self.json).with_context(|| self.describe())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

fn parse_and_validate(json: &str) -> Result<ReportData> {
    let data = ReportData::from_json_str(json)?;
    data.validate()?;
    Ok(data)
}

/// Load a report with progress logging.
pub fn load_report(source: &dyn TreeSource, quiet: bool) -> anyhow::Result<ReportData> {
    if !quiet {
        tracing::info!("Loading coverage report: {}", source.describe());
    }

    let data = source.load()?;

    if !quiet {
        tracing::info!(
            "Loaded {} files ({} top-level entries)",
            data.package.leaf_count(),
            data.package.children().map_or(0, <[_]>::len)
        );
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;
    use crate::model::TreeError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PAYLOAD: &str = r#"{
        "file": "",
        "isEmpty": false,
        "metrics": {
            "statements": {"total": 4, "covered": 2, "skipped": 0, "pct": 50},
            "branches": {"total": 0, "covered": 0, "skipped": 0, "pct": 100},
            "functions": {"total": 1, "covered": 1, "skipped": 0, "pct": 100},
            "lines": {"total": 4, "covered": 2, "skipped": 0, "pct": 50}
        },
        "children": [{
            "file": "a.js",
            "isEmpty": false,
            "output": "a.js.html",
            "metrics": {
                "statements": {"total": 4, "covered": 2, "skipped": 0, "pct": 50},
                "branches": {"total": 0, "covered": 0, "skipped": 0, "pct": 100},
                "functions": {"total": 1, "covered": 1, "skipped": 0, "pct": 100},
                "lines": {"total": 4, "covered": 2, "skipped": 0, "pct": 50}
            },
            "children": false
        }]
    }"#;

    #[test]
    fn test_text_source_loads_single_root() {
        let data = JsonTextSource::new("inline", PAYLOAD).load().unwrap();
        assert_eq!(data.package.leaf_count(), 1);
        assert_eq!(data.package, data.nested);
    }

    #[test]
    fn test_file_source_loads() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();

        let source = JsonFileSource::new(file.path());
        let data = load_report(&source, true).unwrap();
        assert_eq!(data.package.children().unwrap()[0].output(), Some("a.js.html"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = JsonFileSource::new("/nonexistent/coverage.json");
        assert!(matches!(source.load(), Err(CovtreeError::Io { .. })));
    }

    #[test]
    fn test_bad_json_carries_source_context() {
        let err = JsonTextSource::new("stdin", "{").load().unwrap_err();
        match err {
            CovtreeError::Load {
                context,
                source: LoadErrorKind::InvalidJson(_),
            } => assert_eq!(context, "stdin: JSON deserialization"),
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_tree_is_rejected() {
        let bad = PAYLOAD.replace("\"file\": \"a.js\"", "\"file\": \"/a.js\"");
        let err = JsonTextSource::new("inline", bad).load().unwrap_err();
        assert!(matches!(
            err,
            CovtreeError::Load {
                source: LoadErrorKind::InvalidTree(TreeError::InvalidName { .. }),
                ..
            }
        ));
    }

    #[test]
    fn test_from_reader() {
        let source = JsonTextSource::from_reader("stdin", PAYLOAD.as_bytes()).unwrap();
        assert_eq!(source.describe(), "stdin");
        assert!(source.load().is_ok());
    }
}
