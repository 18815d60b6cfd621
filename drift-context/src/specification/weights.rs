//! Weight application, clamping, NaN handling.

use drift_core::traits::{AdaptiveWeightTable, MigrationPath, StaticWeightProvider, WeightProvider};

/// Weight applicator — applies weights with clamping and NaN handling.
pub struct WeightApplicator {
    provider: Box<dyn WeightProvider>,
}

impl WeightApplicator {
    pub fn new() -> Self {
        Self {
            provider: Box::new(StaticWeightProvider),
        }
    }

    pub fn with_provider(provider: Box<dyn WeightProvider>) -> Self {
        Self { provider }
    }

    /// Get weights for a migration path, with clamping and NaN handling.
    pub fn get_weights(&self, migration_path: Option<&MigrationPath>) -> AdaptiveWeightTable {
        let default_path = MigrationPath::language_only("unknown", "unknown");
        let path = migration_path.unwrap_or(&default_path);
        let mut table = self.provider.get_weights(path);

        // Clamp negative weights to 0.0, replace NaN with static defaults
        let defaults = AdaptiveWeightTable::static_defaults();
        for (key, value) in table.weights.iter_mut() {
            if value.is_nan() {
                *value = defaults.weights.get(key).copied().unwrap_or(1.0);
            } else if *value < 0.0 {
                *value = 0.0;
            }
        }

        table
    }
}

impl Default for WeightApplicator {
    fn default() -> Self {
        Self::new()
    }
}
