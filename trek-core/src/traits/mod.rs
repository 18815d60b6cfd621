//! Trait seams between the pipeline and its pluggable oracles.

pub mod similarity_provider;

pub use similarity_provider::{NullSimilarityProvider, SimilarityProvider};
