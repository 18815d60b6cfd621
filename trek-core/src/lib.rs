//! Core types, traits, errors, config, and tracing for the Trek engine.
//!
//! Trek analyzes human navigation behavior on the Wikispeedia hyperlink
//! graph: players traverse from a source article to a target article using
//! only hyperlinks, optionally backtracking. This crate holds everything
//! the analysis pipeline shares: the step/path model, per-subsystem error
//! enums, configuration resolution, and the similarity-provider seam.

pub mod config;
pub mod errors;
pub mod logging;
pub mod traits;
pub mod types;
