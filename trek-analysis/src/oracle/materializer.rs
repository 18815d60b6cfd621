//! Sparse oracle materialization from sub-path endpoint pairs.
//!
//! For every path, every (i, j) position pair with i < j is a sub-path a
//! player realized, so its endpoints may later be compared against the
//! optimum. Enumerating those pairs and deduplicating keeps the oracle
//! linear in observed pairs instead of quadratic in articles.

use tracing::info;

use trek_core::types::collections::{FxHashMap, FxHashSet};

use super::matrix::DistanceMatrix;
use crate::loader::RawPathRecord;

/// An optimal path length between two articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Hops(u32),
    Unreachable,
}

impl Distance {
    pub fn hops(self) -> Option<u32> {
        match self {
            Distance::Hops(h) => Some(h),
            Distance::Unreachable => None,
        }
    }
}

/// Sparse (source, target) -> optimal length lookup, keyed by article
/// index. Built once per dataset load; read-only afterward.
#[derive(Debug, Default)]
pub struct DistanceOracle {
    pairs: FxHashMap<(u32, u32), Distance>,
    article_index: FxHashMap<String, u32>,
}

impl DistanceOracle {
    /// Optimal distance between two articles by decoded name.
    /// `None` means the pair was never realized on any observed sub-path.
    pub fn distance(&self, source: &str, target: &str) -> Option<Distance> {
        let i = *self.article_index.get(source)?;
        let j = *self.article_index.get(target)?;
        self.pairs.get(&(i, j)).copied()
    }

    /// Whether the pair is covered by the oracle.
    pub fn covers(&self, source: &str, target: &str) -> bool {
        self.distance(source, target).is_some()
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}

/// Materialize the oracle for every sub-path endpoint pair in the corpus.
///
/// Tokens that are not known articles (back clicks, redirect names absent
/// from the article table) produce no pairs, mirroring the inner join the
/// pairs go through against the article table.
pub fn materialize<'a>(
    matrix: &DistanceMatrix,
    article_index: &FxHashMap<String, u32>,
    paths: impl Iterator<Item = &'a RawPathRecord>,
) -> DistanceOracle {
    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();

    for record in paths {
        // Resolve tokens once per path; position pairs preserve revisits.
        let ids: Vec<Option<u32>> = record
            .tokens
            .iter()
            .map(|token| article_index.get(token.as_str()).copied())
            .collect();

        for i in 0..ids.len() {
            let Some(a) = ids[i] else { continue };
            for b in ids[i + 1..].iter().flatten() {
                seen.insert((a, *b));
            }
        }
    }

    let pairs: FxHashMap<(u32, u32), Distance> = seen
        .into_iter()
        .map(|(i, j)| {
            let distance = match matrix.get(i, j) {
                Some(hops) => Distance::Hops(u32::from(hops)),
                None => Distance::Unreachable,
            };
            ((i, j), distance)
        })
        .collect();

    info!(pairs = pairs.len(), "distance oracle materialized");

    DistanceOracle {
        pairs,
        article_index: article_index.clone(),
    }
}
