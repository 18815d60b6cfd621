//! WeightProvider trait — D1 compliant.
//!
//! In standalone mode, static weights are used. The bridge (Phase 9)
//! implements the trait and provides adaptive weights from Cortex Skill
//! memories. Drift never imports from Cortex.

use std::collections::HashMap;

/// Migration path key for weight table lookup.
///
/// Keyed by (source_language, target_language, source_framework, target_framework).
/// `None` frameworks fall back to language-only lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MigrationPath {
    pub source_language: String,
    pub target_language: String,
    pub source_framework: Option<String>,
    pub target_framework: Option<String>,
}

impl MigrationPath {
    /// Create a new migration path.
    pub fn new(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        source_framework: Option<String>,
        target_framework: Option<String>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            source_framework,
            target_framework,
        }
    }

    /// Create a language-only migration path (no frameworks).
    pub fn language_only(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            source_framework: None,
            target_framework: None,
        }
    }
}

/// Adaptive weight table for specification generation.
///
/// Contains per-section weights, failure distribution, sample size,
/// and last_updated timestamp.
#[derive(Debug, Clone)]
pub struct AdaptiveWeightTable {
    /// Per-section weights (section name → weight).
    pub weights: HashMap<String, f64>,
    /// Per-section failure distribution (section name → failure rate).
    pub failure_distribution: HashMap<String, f64>,
    /// Number of samples used to compute these weights.
    pub sample_size: usize,
    /// Unix timestamp of last update.
    pub last_updated: i64,
}

impl Default for AdaptiveWeightTable {
    fn default() -> Self {
        Self::static_defaults()
    }
}

impl AdaptiveWeightTable {
    /// Static default weights per the spec.
    pub fn static_defaults() -> Self {
        let mut weights = HashMap::new();
        weights.insert("public_api".to_string(), 2.0);
        weights.insert("data_model".to_string(), 1.8);
        weights.insert("data_flow".to_string(), 1.7);
        weights.insert("business_logic".to_string(), 1.6);
        weights.insert("conventions".to_string(), 1.5);
        weights.insert("constraints".to_string(), 1.5);
        weights.insert("security".to_string(), 1.4);
        weights.insert("error_handling".to_string(), 1.3);
        weights.insert("test_requirements".to_string(), 1.2);
        weights.insert("dependencies".to_string(), 1.0);
        weights.insert("overview".to_string(), 0.8);
        weights.insert("migration_notes".to_string(), 0.8);

        Self {
            weights,
            failure_distribution: HashMap::new(),
            sample_size: 0,
            last_updated: 0,
        }
    }

    /// Get weight for a section, falling back to 1.0 if not found.
    /// Clamps negative weights to 0.0, replaces NaN with static default.
    pub fn get_weight(&self, section: &str) -> f64 {
        let raw = self.weights.get(section).copied().unwrap_or(1.0);
        if raw.is_nan() {
            // Fall back to static default for this section
            let defaults = Self::static_defaults();
            defaults.weights.get(section).copied().unwrap_or(1.0)
        } else if raw < 0.0 {
            0.0
        } else {
            raw
        }
    }
}

/// Provider of adaptive weights for specification generation.
///
/// Default implementation returns static weights (D1 compliance).
/// The Cortex bridge (Phase 9) implements this trait to provide
/// adaptive weights from Cortex Skill memories.
pub trait WeightProvider: Send + Sync {
    /// Get weights for a given migration path.
    /// Returns static defaults if no adaptive data is available.
    fn get_weights(&self, path: &MigrationPath) -> AdaptiveWeightTable {
        let _ = path;
        AdaptiveWeightTable::static_defaults()
    }
}

/// No-op implementation for standalone mode — returns static weights.
pub struct StaticWeightProvider;

impl WeightProvider for StaticWeightProvider {}
