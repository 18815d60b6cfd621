//! Contract Tracking (System 21) — 7 paradigms, schema parsers, endpoint extractors.

pub mod types;
pub mod schema_parsers;
pub mod extractors;
pub mod matching;
pub mod breaking_changes;
pub mod confidence;

pub use types::*;
