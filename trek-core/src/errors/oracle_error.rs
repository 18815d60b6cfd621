//! Distance oracle errors.

use super::error_code::{self, TrekErrorCode};

/// Errors that can occur while materializing the sparse distance oracle.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The index-based matrix must be square with one row/column per
    /// article, in article-table order.
    #[error("distance matrix shape mismatch: {rows} rows x {cols} cols for {articles} articles")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        articles: usize,
    },

    #[error("distance matrix row {row}, column {col}: invalid cell `{cell}`")]
    BadCell { row: usize, col: usize, cell: char },
}

impl TrekErrorCode for OracleError {
    fn error_code(&self) -> &'static str {
        error_code::ORACLE_ERROR
    }
}
