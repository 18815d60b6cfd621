//! Error handling for Trek.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod export_error;
pub mod graph_error;
pub mod oracle_error;
pub mod path_error;
pub mod pipeline_error;
pub mod similarity_error;
pub mod table_error;

pub use config_error::ConfigError;
pub use error_code::TrekErrorCode;
pub use export_error::ExportError;
pub use graph_error::GraphError;
pub use oracle_error::OracleError;
pub use path_error::PathError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use similarity_error::SimilarityError;
pub use table_error::TableError;
