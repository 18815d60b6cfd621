//! The article graph: weighted realized-transition build, PageRank over
//! the static link topology, and hub extraction.

pub mod builder;
pub mod hubs;
pub mod pagerank;

pub use builder::{build_graph, BackEdgePolicy, WeightedGraph};
pub use hubs::{hub_set, HubSet};
pub use pagerank::{pagerank, PageRankConfig};
