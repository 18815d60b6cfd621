//! PageRank over the static link topology.
//!
//! Hubs are a property of the article network itself, not of player
//! behavior, so the power iteration runs on the raw link table with
//! uniform out-edge weights. Dangling mass is redistributed uniformly.

use tracing::debug;

use trek_core::types::collections::FxHashMap;

use crate::loader::{Article, Link};

/// Configuration for the PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    pub damping: f64,
    /// Convergence threshold: stop when the L1 norm of the rank delta
    /// drops below this.
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

/// Compute PageRank scores for every article.
pub fn pagerank(
    articles: &[Article],
    links: &[Link],
    config: &PageRankConfig,
) -> FxHashMap<String, f64> {
    let n = articles.len();
    if n == 0 {
        return FxHashMap::default();
    }

    let index: FxHashMap<&str, usize> = articles
        .iter()
        .enumerate()
        .map(|(i, a)| (a.name.as_str(), i))
        .collect();

    // Uniform out-edge adjacency; duplicate links collapse.
    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
    for link in links {
        let (Some(&a), Some(&b)) = (index.get(link.source.as_str()), index.get(link.target.as_str()))
        else {
            continue;
        };
        if !out_edges[a].contains(&b) {
            out_edges[a].push(b);
        }
    }

    let uniform = 1.0 / n as f64;
    let mut ranks = vec![uniform; n];
    let mut iterations = 0;

    for iter in 0..config.max_iter {
        iterations = iter + 1;
        let dangling_sum: f64 = (0..n)
            .filter(|&i| out_edges[i].is_empty())
            .map(|i| ranks[i])
            .sum();

        let base = (1.0 - config.damping) * uniform + config.damping * dangling_sum * uniform;
        let mut next = vec![base; n];
        for (source, targets) in out_edges.iter().enumerate() {
            if targets.is_empty() {
                continue;
            }
            let share = config.damping * ranks[source] / targets.len() as f64;
            for &target in targets {
                next[target] += share;
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();
        ranks = next;
        if delta < config.tolerance {
            break;
        }
    }

    debug!(iterations, "pagerank converged");

    articles
        .iter()
        .zip(ranks)
        .map(|(article, rank)| (article.name.clone(), rank))
        .collect()
}
