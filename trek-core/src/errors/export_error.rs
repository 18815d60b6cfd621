//! Export errors.

use super::error_code::{self, TrekErrorCode};

/// Errors that can occur while writing the flat tabular exports.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {what}: {message}")]
    Serialize { what: String, message: String },
}

impl TrekErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        error_code::EXPORT_ERROR
    }
}
