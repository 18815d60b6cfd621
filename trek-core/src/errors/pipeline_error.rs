//! Pipeline errors and non-fatal anomaly collection.

use super::error_code::TrekErrorCode;
use super::{
    ConfigError, ExportError, GraphError, OracleError, PathError, SimilarityError,
    TableError,
};

/// Errors that can occur during pipeline execution.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl TrekErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Table(e) => e.error_code(),
            Self::Path(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
            Self::Similarity(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
        }
    }
}

/// Result of a pipeline stage that accumulates non-fatal anomalies.
/// Allows partial results to be returned even when some records misbehave
/// (e.g. articles with no plaintext body).
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal anomalies collected during the stage.
    pub warnings: Vec<String>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new clean pipeline result.
    pub fn new(data: T) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    /// Record a non-fatal anomaly.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns true if no anomalies were recorded.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
