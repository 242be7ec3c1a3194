//! Path-finding algorithm implementations
//!
//! - `bfs`: bidirectional breadth-first search for fewest-hops paths
//! - `dijkstra`: cheapest paths over non-negative relationship costs
//! - `astar`: cheapest path guided by a remaining-cost estimate
//! - `shared`: search limits, heap entries and predecessor chains

pub mod astar;
pub mod bfs;
pub mod dijkstra;
pub mod shared;

pub use astar::AStar;
pub use bfs::{AllShortestPaths, ShortestPath};
pub use dijkstra::{CheapestPaths, Dijkstra};
pub use shared::{SearchLimits, COST_EPSILON};
