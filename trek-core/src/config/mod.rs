//! Configuration for the Trek engine.

pub mod analysis_config;
pub mod dataset_config;
pub mod export_config;
pub mod trek_config;

pub use analysis_config::AnalysisConfig;
pub use dataset_config::DatasetConfig;
pub use export_config::ExportConfig;
pub use trek_config::TrekConfig;
