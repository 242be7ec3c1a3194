//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::graph::eval::CoordinateEstimate;
use crate::graph::types::Direction;

/// Hop limit used when none is configured
pub const DEFAULT_MAX_DEPTH: usize = 15;

/// Configuration file contents (`pathgraph.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Finder settings, the `[finder]` table
    #[serde(default)]
    pub finder: FinderConfig,
}

/// Path-finding algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Fewest hops (bidirectional BFS)
    #[default]
    ShortestPath,
    /// Cheapest path by relationship cost
    Dijkstra,
    /// Cheapest path guided by a coordinate estimate
    #[serde(rename = "astar")]
    AStar,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::ShortestPath => "shortest-path",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    /// Whether the algorithm needs a cost evaluator
    pub fn is_weighted(&self) -> bool {
        !matches!(self, Algorithm::ShortestPath)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shortest-path" | "shortestpath" | "bfs" => Ok(Algorithm::ShortestPath),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a-star" | "a*" => Ok(Algorithm::AStar),
            other => Err(format!(
                "unknown algorithm '{}' (expected: shortest-path, dijkstra, astar)",
                other
            )),
        }
    }
}

/// Settings from which a finder is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinderConfig {
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Hop limit for shortest-path searches (default 15)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Relationship types to follow; empty means every type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship_types: Vec<String>,

    /// Direction to follow relationships in (default both)
    #[serde(default)]
    pub direction: Direction,

    /// Relationship property holding the cost (dijkstra, astar)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_property: Option<String>,

    /// Cost for relationships lacking `cost_property`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cost: Option<f64>,

    /// Remaining-cost estimate (astar)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<CoordinateEstimate>,

    /// Maximum node expansions per search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,

    /// Wall-clock budget per search, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Return every optimal path instead of one
    #[serde(default)]
    pub all_paths: bool,

    /// Stop after this many paths when `all_paths` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            algorithm: Algorithm::default(),
            max_depth: default_max_depth(),
            relationship_types: Vec::new(),
            direction: Direction::default(),
            cost_property: None,
            default_cost: None,
            estimate: None,
            max_steps: None,
            timeout_ms: None,
            all_paths: false,
            max_paths: None,
        }
    }
}
