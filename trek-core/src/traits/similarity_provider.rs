//! SimilarityProvider trait — the black-box semantic oracle seam.
//!
//! The semantic-increase scorer only needs "how similar are these two
//! articles"; it never sees the vector space. The production implementation
//! is the TF-IDF space in `trek-analysis`; tests substitute fixed tables.

/// Provider of pairwise article similarity in `[0, 1]`.
///
/// `None` means at least one of the articles is absent from the provider's
/// vocabulary — callers must degrade to their sentinel result, never error.
pub trait SimilarityProvider: Send + Sync {
    /// Cosine-style similarity between two articles by decoded name.
    fn similarity(&self, first: &str, second: &str) -> Option<f64>;

    /// Whether the provider can score the given article at all.
    fn contains(&self, article: &str) -> bool {
        self.similarity(article, article).is_some()
    }
}

/// No-op implementation: knows no articles. Every similarity-dependent
/// score degrades to its sentinel.
pub struct NullSimilarityProvider;

impl SimilarityProvider for NullSimilarityProvider {
    fn similarity(&self, _first: &str, _second: &str) -> Option<f64> {
        None
    }
}
