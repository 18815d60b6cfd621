//! Export destination configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the flat tabular exports are written.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    pub out_dir: Option<PathBuf>,
}

impl ExportConfig {
    pub fn effective_out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("exports"))
    }
}
