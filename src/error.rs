//! Unified error types for covtree.
//!
//! Library layers raise their own `thiserror` enums ([`ViewError`],
//! [`TreeError`], [`ReportError`]); this module wraps them into one
//! hierarchy with loading context for callers that want a single type.

use crate::model::TreeError;
use crate::reports::ReportError;
use crate::view::ViewError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for covtree operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CovtreeError {
    /// Errors while loading a report payload
    #[error("Failed to load coverage report: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// The requested view could not be built
    #[error("Invalid view: {0}")]
    View(#[from] ViewError),

    /// Errors during report rendering
    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    InvalidTree(#[from] TreeError),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for covtree operations
pub type Result<T> = std::result::Result<T, CovtreeError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CovtreeError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for CovtreeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CovtreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<TreeError> for CovtreeError {
    fn from(err: TreeError) -> Self {
        Self::load("tree validation", LoadErrorKind::InvalidTree(err))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended to whatever the error already carries, so nested
/// calls read outermost first: `"loading report.json: JSON deserialization"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CovtreeError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// View and report errors carry their own detail and pass through as-is.
fn add_context_to_error(err: CovtreeError, new_ctx: &str) -> CovtreeError {
    match err {
        CovtreeError::Load {
            context: existing,
            source,
        } => CovtreeError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CovtreeError::Io {
            path,
            message,
            source,
        } => CovtreeError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        CovtreeError::Config(msg) => CovtreeError::Config(chain_context(new_ctx, &msg)),
        other => other,
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
