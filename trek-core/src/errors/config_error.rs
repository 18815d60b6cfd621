//! Configuration errors.

use super::error_code::{self, TrekErrorCode};

/// Errors that can occur during configuration resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    /// The dataset folder is absent or not laid out as expected. Reported
    /// as a setup problem, never as a parse backtrace.
    #[error(
        "dataset not found at `{path}`; download the Wikispeedia archive and point \
         [dataset] data_dir at it"
    )]
    DatasetNotFound { path: String },
}

impl TrekErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
