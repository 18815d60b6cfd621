//! Fast hash collections used across the engine.

pub use rustc_hash::{FxHashMap, FxHashSet};

/// Build an `FxHashMap` with a capacity hint.
pub fn map_with_capacity<K, V>(capacity: usize) -> FxHashMap<K, V> {
    FxHashMap::with_capacity_and_hasher(capacity, Default::default())
}

/// Build an `FxHashSet` with a capacity hint.
pub fn set_with_capacity<T>(capacity: usize) -> FxHashSet<T> {
    FxHashSet::with_capacity_and_hasher(capacity, Default::default())
}
