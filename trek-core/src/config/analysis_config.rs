//! Analysis parameters: scorer thresholds, PageRank knobs, filters.

use serde::{Deserialize, Serialize};

/// Tunable analysis parameters. All fields are optional in the TOML file;
/// `effective_*()` accessors supply the compiled defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of top-PageRank articles that count as hubs.
    pub top_hubs: Option<usize>,
    /// PageRank damping factor.
    pub damping: Option<f64>,
    /// PageRank convergence threshold (L1 norm of the rank delta).
    pub pagerank_tolerance: Option<f64>,
    pub pagerank_max_iter: Option<usize>,
    /// A click counts as a "top link" when its relative page position is
    /// at or below this value.
    pub top_link_threshold: Option<f64>,
    /// Whether the weighted graph carries the synthetic back node and
    /// (article -> back) edges.
    pub back_edges: Option<bool>,
    /// Vocabulary cap for the TF-IDF space.
    pub max_features: Option<usize>,
    /// Paths longer than this are excluded from the rank-vs-length view.
    pub rank_length_max_path: Option<usize>,
    /// Paths longer than this are excluded from the exploded view.
    pub explode_max_path: Option<usize>,
    /// Clean-length window for the strategy comparison table.
    pub comparison_min_clicks: Option<usize>,
    pub comparison_max_clicks: Option<usize>,
    /// "Used this strategy" flag thresholds.
    pub semantic_flag_threshold: Option<f64>,
    pub top_link_flag_threshold: Option<f64>,
    pub hub_flag_threshold: Option<f64>,
    pub backtrack_flag_threshold: Option<f64>,
    /// Regression input filters.
    pub regression_min_path_len: Option<usize>,
    pub regression_max_duration_secs: Option<u64>,
}

impl AnalysisConfig {
    pub fn effective_top_hubs(&self) -> usize {
        self.top_hubs.unwrap_or(200)
    }

    pub fn effective_damping(&self) -> f64 {
        self.damping.unwrap_or(0.85)
    }

    pub fn effective_pagerank_tolerance(&self) -> f64 {
        self.pagerank_tolerance.unwrap_or(1e-6)
    }

    pub fn effective_pagerank_max_iter(&self) -> usize {
        self.pagerank_max_iter.unwrap_or(100)
    }

    pub fn effective_top_link_threshold(&self) -> f64 {
        self.top_link_threshold.unwrap_or(0.3)
    }

    pub fn effective_back_edges(&self) -> bool {
        self.back_edges.unwrap_or(false)
    }

    pub fn effective_max_features(&self) -> usize {
        self.max_features.unwrap_or(8000)
    }

    pub fn effective_rank_length_max_path(&self) -> usize {
        self.rank_length_max_path.unwrap_or(50)
    }

    pub fn effective_explode_max_path(&self) -> usize {
        self.explode_max_path.unwrap_or(500)
    }

    pub fn effective_comparison_min_clicks(&self) -> usize {
        self.comparison_min_clicks.unwrap_or(4)
    }

    pub fn effective_comparison_max_clicks(&self) -> usize {
        self.comparison_max_clicks.unwrap_or(100)
    }

    pub fn effective_semantic_flag_threshold(&self) -> f64 {
        self.semantic_flag_threshold.unwrap_or(0.8)
    }

    pub fn effective_top_link_flag_threshold(&self) -> f64 {
        self.top_link_flag_threshold.unwrap_or(0.8)
    }

    pub fn effective_hub_flag_threshold(&self) -> f64 {
        self.hub_flag_threshold.unwrap_or(0.8)
    }

    pub fn effective_backtrack_flag_threshold(&self) -> f64 {
        self.backtrack_flag_threshold.unwrap_or(0.1)
    }

    pub fn effective_regression_min_path_len(&self) -> usize {
        self.regression_min_path_len.unwrap_or(3)
    }

    pub fn effective_regression_max_duration_secs(&self) -> u64 {
        self.regression_max_duration_secs.unwrap_or(1000)
    }
}
