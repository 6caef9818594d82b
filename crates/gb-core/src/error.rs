//! Error types for story loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::story::StoryIssue;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading a story document.
///
/// All of these are content-authoring errors: a story that fails to load
/// cannot be played.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The story file could not be read.
    #[error("cannot read story file {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not a valid scene mapping.
    #[error("malformed story document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but the graph is inconsistent.
    #[error("invalid story: {}", format_issues(.0))]
    Invalid(Vec<StoryIssue>),
}

fn format_issues(issues: &[StoryIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
