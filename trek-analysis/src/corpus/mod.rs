//! Path normalization and the exploded per-step view.

pub mod explode;
pub mod normalize;

pub use explode::{explode, ExplodedRow};
pub use normalize::{normalize, normalize_all, replay, NormalizedPath, Replay};
