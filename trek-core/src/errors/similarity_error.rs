//! Similarity space errors.

use super::error_code::{self, TrekErrorCode};

/// Errors raised while building the TF-IDF similarity space.
///
/// A single missing plaintext body is NOT an error (the article is simply
/// absent from the space); these cover the cases where no usable space can
/// be built at all.
#[derive(Debug, thiserror::Error)]
pub enum SimilarityError {
    #[error("plaintext folder `{path}` is missing or unreadable")]
    CorpusNotFound { path: String },

    #[error("no plaintext bodies could be read; the similarity space would be empty")]
    EmptyCorpus,

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl TrekErrorCode for SimilarityError {
    fn error_code(&self) -> &'static str {
        error_code::SIMILARITY_ERROR
    }
}
