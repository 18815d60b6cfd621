//! The sparse shortest-path distance oracle.
//!
//! The archive ships an index-based all-pairs matrix (one row per article,
//! one digit or `_` per column). A full name-keyed materialization would be
//! quadratic in the article count; only pairs that actually co-occur on
//! some observed path are ever queried, so the oracle holds exactly those.

pub mod materializer;
pub mod matrix;

pub use materializer::{materialize, Distance, DistanceOracle};
pub use matrix::DistanceMatrix;
