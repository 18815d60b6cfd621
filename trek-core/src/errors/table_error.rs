//! Raw table loading errors.
//!
//! These are fatal structural errors: a malformed table means the dataset
//! itself is corrupt and nothing downstream can be trusted.

use super::error_code::{self, TrekErrorCode};

/// Errors that can occur while parsing the raw tab-separated tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("{path}:{line}: second `# FORMAT:` header (format already declared)")]
    FormatRedeclared { path: String, line: usize },

    #[error("{path}:{line}: row has {found} fields, format declares {expected}")]
    RowArity {
        path: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("required table `{name}` not found in dataset folder")]
    MissingTable { name: String },

    #[error("table `{table}` is missing required column `{column}`")]
    MissingColumn { table: String, column: String },

    #[error("{path}:{line}: {message}")]
    BadField {
        path: String,
        line: usize,
        message: String,
    },

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl TrekErrorCode for TableError {
    fn error_code(&self) -> &'static str {
        error_code::TABLE_ERROR
    }
}
