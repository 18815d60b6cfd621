//! Advanced & Capstone systems — Phase 7.
//!
//! Level 4 leaf systems built on the full Drift analysis stack:
//! - Simulation Engine: Monte Carlo effort estimation with 13 task categories
//! - Decision Mining: git2-based institutional decision extraction
//! - N+1 Query Detection: Advanced ORM-aware loop-query detection

pub mod simulation;
pub mod decisions;
