//! Hub extraction: top-K articles by PageRank, plus the min-max normalized
//! generality score used by the comparison table.

use trek_core::types::collections::{FxHashMap, FxHashSet};

/// The top-K hub set over the static link graph.
#[derive(Debug)]
pub struct HubSet {
    top: FxHashSet<String>,
    generality: FxHashMap<String, f64>,
    generality_threshold: f64,
    k: usize,
}

impl HubSet {
    pub fn is_hub(&self, article: &str) -> bool {
        self.top.contains(article)
    }

    /// Min-max normalized PageRank in `[0, 1]`.
    pub fn generality(&self, article: &str) -> Option<f64> {
        self.generality.get(article).copied()
    }

    /// The generality score of the first article NOT in the hub set: the
    /// cutoff the max-generality flag compares against.
    pub fn generality_threshold(&self) -> f64 {
        self.generality_threshold
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}

/// Derive the hub set from PageRank scores.
///
/// `k == 0` yields an empty hub set (every hub-usage ratio becomes 0).
/// Ties break by name so the set is deterministic.
pub fn hub_set(scores: &FxHashMap<String, f64>, k: usize) -> HubSet {
    let mut ranked: Vec<(&String, f64)> =
        scores.iter().map(|(name, &score)| (name, score)).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let (min, max) = ranked
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, s)| {
            (lo.min(*s), hi.max(*s))
        });
    let range = max - min;
    let normalize = |score: f64| {
        if range > 0.0 {
            (score - min) / range
        } else {
            0.0
        }
    };

    let generality: FxHashMap<String, f64> = ranked
        .iter()
        .map(|(name, score)| ((*name).clone(), normalize(*score)))
        .collect();

    let top: FxHashSet<String> = ranked
        .iter()
        .take(k)
        .map(|(name, _)| (*name).clone())
        .collect();

    // The first non-hub's generality; 0 when every article is a hub.
    let generality_threshold = ranked
        .get(k)
        .map(|(_, score)| normalize(*score))
        .unwrap_or(0.0);

    HubSet {
        top,
        generality,
        generality_threshold,
        k,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> FxHashMap<String, f64> {
        pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    #[test]
    fn test_top_k_by_score() {
        let hubs = hub_set(&scores(&[("A", 0.5), ("B", 0.3), ("C", 0.2)]), 2);
        assert!(hubs.is_hub("A"));
        assert!(hubs.is_hub("B"));
        assert!(!hubs.is_hub("C"));
        assert_eq!(hubs.len(), 2);
    }

    #[test]
    fn test_k_zero_is_empty() {
        let hubs = hub_set(&scores(&[("A", 0.5), ("B", 0.5)]), 0);
        assert!(hubs.is_empty());
        assert!(!hubs.is_hub("A"));
    }

    #[test]
    fn test_generality_is_min_max_normalized() {
        let hubs = hub_set(&scores(&[("A", 0.6), ("B", 0.4), ("C", 0.2)]), 1);
        assert_eq!(hubs.generality("A"), Some(1.0));
        assert_eq!(hubs.generality("C"), Some(0.0));
        let b = hubs.generality("B").unwrap();
        assert!((b - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_first_non_hub() {
        let hubs = hub_set(&scores(&[("A", 0.6), ("B", 0.4), ("C", 0.2)]), 1);
        // B is the first article outside the hub set.
        assert!((hubs.generality_threshold() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_k_larger_than_universe() {
        let hubs = hub_set(&scores(&[("A", 0.6), ("B", 0.4)]), 10);
        assert_eq!(hubs.len(), 2);
        assert_eq!(hubs.generality_threshold(), 0.0);
    }
}
