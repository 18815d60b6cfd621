//! Dataset location configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the Wikispeedia dataset lives on disk.
///
/// The archive layout is fixed: a `wikispeedia_paths-and-graph/` folder of
/// tab-separated tables and a `plaintext_articles/` folder of article
/// bodies named by percent-encoded title. The link-position table is the
/// export of the external HTML scraper and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatasetConfig {
    pub data_dir: Option<PathBuf>,
    pub tables_folder: Option<String>,
    pub plaintext_folder: Option<String>,
    pub link_positions_file: Option<String>,
}

impl DatasetConfig {
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// The folder holding the six raw tables.
    pub fn tables_dir(&self) -> PathBuf {
        let folder = self
            .tables_folder
            .as_deref()
            .unwrap_or("wikispeedia_paths-and-graph");
        self.effective_data_dir().join(folder)
    }

    /// The folder holding one plaintext body per article.
    pub fn plaintext_dir(&self) -> PathBuf {
        let folder = self
            .plaintext_folder
            .as_deref()
            .unwrap_or("plaintext_articles");
        self.effective_data_dir().join(folder)
    }

    /// The link-position table exported by the HTML scraper.
    pub fn link_positions_path(&self) -> PathBuf {
        let file = self
            .link_positions_file
            .as_deref()
            .unwrap_or("link_positions.tsv");
        self.effective_data_dir().join(file)
    }

    /// Override the data dir (used by tests and callers with fixtures).
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }
}
