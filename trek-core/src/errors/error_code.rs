//! Stable machine-readable error codes.
//!
//! Codes are part of the exported run summary and must never change once
//! released; add new ones instead of renaming.

pub const TABLE_ERROR: &str = "TREK_TABLE_ERROR";
pub const PATH_ERROR: &str = "TREK_PATH_ERROR";
pub const GRAPH_ERROR: &str = "TREK_GRAPH_ERROR";
pub const ORACLE_ERROR: &str = "TREK_ORACLE_ERROR";
pub const SIMILARITY_ERROR: &str = "TREK_SIMILARITY_ERROR";
pub const CONFIG_ERROR: &str = "TREK_CONFIG_ERROR";
pub const EXPORT_ERROR: &str = "TREK_EXPORT_ERROR";

/// Every Trek error maps to a stable code.
pub trait TrekErrorCode {
    fn error_code(&self) -> &'static str;
}
