//! Pathgraph Core Library
//!
//! In-memory property graph with fewest-hops (bidirectional BFS), Dijkstra
//! and A* path finders, plus the document loading, configuration and report
//! rendering used by the `pathgraph` binary.

pub mod algo;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod logging;
pub mod records;
pub mod report;
