//! Top-level Trek configuration with 3-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, DatasetConfig, ExportConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TREK_*`)
/// 2. Project config (`trek.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrekConfig {
    pub dataset: DatasetConfig,
    pub analysis: AnalysisConfig,
    pub export: ExportConfig,
}

impl TrekConfig {
    /// Load configuration with 3-layer resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 2: project config
        let project_config_path = root.join("trek.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 1 (highest priority): environment variables
        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: TrekConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &TrekConfig) -> Result<(), ConfigError> {
        if let Some(damping) = config.analysis.damping {
            if !(0.0..1.0).contains(&damping) {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.damping".to_string(),
                    message: "must be in [0.0, 1.0)".to_string(),
                });
            }
        }
        for (field, value) in [
            ("analysis.top_link_threshold", config.analysis.top_link_threshold),
            ("analysis.semantic_flag_threshold", config.analysis.semantic_flag_threshold),
            ("analysis.top_link_flag_threshold", config.analysis.top_link_flag_threshold),
            ("analysis.hub_flag_threshold", config.analysis.hub_flag_threshold),
            ("analysis.backtrack_flag_threshold", config.analysis.backtrack_flag_threshold),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0.0 and 1.0".to_string(),
                    });
                }
            }
        }
        if let Some(max_features) = config.analysis.max_features {
            if max_features == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.max_features".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let (Some(min), Some(max)) = (
            config.analysis.comparison_min_clicks,
            config.analysis.comparison_max_clicks,
        ) {
            if min > max {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.comparison_min_clicks".to_string(),
                    message: "must not exceed comparison_max_clicks".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut TrekConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: TrekConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` value.
    fn merge(base: &mut TrekConfig, other: &TrekConfig) {
        // Dataset
        if other.dataset.data_dir.is_some() {
            base.dataset.data_dir = other.dataset.data_dir.clone();
        }
        if other.dataset.tables_folder.is_some() {
            base.dataset.tables_folder = other.dataset.tables_folder.clone();
        }
        if other.dataset.plaintext_folder.is_some() {
            base.dataset.plaintext_folder = other.dataset.plaintext_folder.clone();
        }
        if other.dataset.link_positions_file.is_some() {
            base.dataset.link_positions_file = other.dataset.link_positions_file.clone();
        }

        // Analysis
        if other.analysis.top_hubs.is_some() {
            base.analysis.top_hubs = other.analysis.top_hubs;
        }
        if other.analysis.damping.is_some() {
            base.analysis.damping = other.analysis.damping;
        }
        if other.analysis.pagerank_tolerance.is_some() {
            base.analysis.pagerank_tolerance = other.analysis.pagerank_tolerance;
        }
        if other.analysis.pagerank_max_iter.is_some() {
            base.analysis.pagerank_max_iter = other.analysis.pagerank_max_iter;
        }
        if other.analysis.top_link_threshold.is_some() {
            base.analysis.top_link_threshold = other.analysis.top_link_threshold;
        }
        if other.analysis.back_edges.is_some() {
            base.analysis.back_edges = other.analysis.back_edges;
        }
        if other.analysis.max_features.is_some() {
            base.analysis.max_features = other.analysis.max_features;
        }
        if other.analysis.rank_length_max_path.is_some() {
            base.analysis.rank_length_max_path = other.analysis.rank_length_max_path;
        }
        if other.analysis.explode_max_path.is_some() {
            base.analysis.explode_max_path = other.analysis.explode_max_path;
        }
        if other.analysis.comparison_min_clicks.is_some() {
            base.analysis.comparison_min_clicks = other.analysis.comparison_min_clicks;
        }
        if other.analysis.comparison_max_clicks.is_some() {
            base.analysis.comparison_max_clicks = other.analysis.comparison_max_clicks;
        }
        if other.analysis.semantic_flag_threshold.is_some() {
            base.analysis.semantic_flag_threshold = other.analysis.semantic_flag_threshold;
        }
        if other.analysis.top_link_flag_threshold.is_some() {
            base.analysis.top_link_flag_threshold = other.analysis.top_link_flag_threshold;
        }
        if other.analysis.hub_flag_threshold.is_some() {
            base.analysis.hub_flag_threshold = other.analysis.hub_flag_threshold;
        }
        if other.analysis.backtrack_flag_threshold.is_some() {
            base.analysis.backtrack_flag_threshold = other.analysis.backtrack_flag_threshold;
        }
        if other.analysis.regression_min_path_len.is_some() {
            base.analysis.regression_min_path_len = other.analysis.regression_min_path_len;
        }
        if other.analysis.regression_max_duration_secs.is_some() {
            base.analysis.regression_max_duration_secs =
                other.analysis.regression_max_duration_secs;
        }

        // Export
        if other.export.out_dir.is_some() {
            base.export.out_dir = other.export.out_dir.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TREK_DATA_DIR`, `TREK_TOP_HUBS`, etc.
    fn apply_env_overrides(config: &mut TrekConfig) {
        if let Ok(val) = std::env::var("TREK_DATA_DIR") {
            config.dataset.data_dir = Some(val.into());
        }
        if let Ok(val) = std::env::var("TREK_TOP_HUBS") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.top_hubs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TREK_DAMPING") {
            if let Ok(v) = val.parse::<f64>() {
                config.analysis.damping = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TREK_TOP_LINK_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.analysis.top_link_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TREK_BACK_EDGES") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.back_edges = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TREK_MAX_FEATURES") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.max_features = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TREK_EXPORT_DIR") {
            config.export.out_dir = Some(val.into());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
