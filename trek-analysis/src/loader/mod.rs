//! Raw table loading — the entry point to the entire Trek pipeline.
//!
//! The Wikispeedia archive ships a custom line-oriented tabular format:
//! `#` comment lines, at most one `# FORMAT:` header declaring column
//! names, then tab-separated data rows. Everything stays a string at this
//! layer; typing happens in `dataset`.

pub mod dataset;
pub mod percent;
pub mod raw_table;

pub use dataset::{Article, Category, Dataset, Link, LinkPositions, QuitReason, RawPathRecord};
pub use raw_table::{HeaderFormat, RawTable};
