//! Error types for lexingest.
//!
//! Library crates use [`LexIngestError`] via `thiserror`.
//! App crates (cli/server) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all lexingest operations.
#[derive(Debug, thiserror::Error)]
pub enum LexIngestError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Listing page unreachable or returned a non-success status.
    #[error("discovery error: {0}")]
    Discovery(String),

    /// Document URL unreachable or returned a non-success status.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The response was not a PDF. A deliberate skip, not a failure:
    /// the orchestrator drops the document without writing anything.
    #[error("not a PDF ({content_type}): {url}")]
    NotPdf { url: String, content_type: String },

    /// The payload could not be opened as a paginated PDF document.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// A valid PDF yielded zero usable text. The stored artifact is
    /// cleaned up before this is surfaced.
    #[error("no text extracted from document '{identity}'")]
    NoTextExtracted { identity: String },

    /// Sink write failure that is not a plain filesystem error
    /// (e.g. record serialization).
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Filesystem I/O error on one of the sinks.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LexIngestError>;

impl LexIngestError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is the deliberate not-a-PDF skip.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::NotPdf { .. })
    }
}
