//! Path normalization errors.

use super::error_code::{self, TrekErrorCode};

/// Errors that can occur while normalizing raw path records.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// A back click with no forward history to undo. The replay stack must
    /// never underflow; a path that does this is structurally malformed.
    #[error("malformed path `{path}`: back click at step {step} with empty history")]
    MalformedPath { path: String, step: usize },

    #[error("path record has an empty token sequence")]
    EmptyPath,

    #[error("unfinished path record has no declared target")]
    MissingTarget,

    #[error("invalid timestamp `{value}`")]
    BadTimestamp { value: String },

    #[error("invalid duration `{value}`")]
    BadDuration { value: String },
}

impl TrekErrorCode for PathError {
    fn error_code(&self) -> &'static str {
        error_code::PATH_ERROR
    }
}
