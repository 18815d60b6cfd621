//! Graph construction errors.

use super::error_code::{self, TrekErrorCode};

/// Errors raised when the weighted graph build violates its postconditions.
///
/// These indicate a bug in the build, not bad data: unrecognized edges and
/// path-only nodes are tolerated by design and accounted for in the checks.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node count {found} != expected {expected} (articles + path-only names + back node if enabled)")]
    NodeCountMismatch { expected: usize, found: usize },

    #[error("edge count {found} != expected {expected} (links + unrecognized + back edges if enabled)")]
    EdgeCountMismatch { expected: usize, found: usize },

    #[error("edge weight sum {found} != expected {expected} from the raw token identity")]
    WeightSumMismatch { expected: u64, found: u64 },
}

impl TrekErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_ERROR
    }
}
