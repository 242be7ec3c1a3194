use std::path::PathBuf;

use clap::{Args, ValueEnum};
use pathgraph_core::config::Algorithm;
use pathgraph_core::graph::Direction;

use super::parse::{parse_algorithm, parse_direction, parse_key_pair};

/// Coordinate estimate for A*
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EstimateKind {
    /// Straight-line distance between x/y properties
    Euclidean,
    /// Haversine distance between lat/lon properties, in metres
    Geo,
}

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Graph document (.json or .toml)
    #[arg(long, short)]
    pub graph: PathBuf,

    /// Start node: document key, prop=value or Label:prop=value
    #[arg(long)]
    pub from: String,

    /// End node: document key, prop=value or Label:prop=value
    #[arg(long)]
    pub to: String,

    /// shortest-path (fewest hops), dijkstra or astar
    #[arg(long, short, value_parser = parse_algorithm)]
    pub algorithm: Option<Algorithm>,

    /// Maximum hops for shortest-path
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Relationship type to follow (repeatable; default all types)
    #[arg(long = "type", short = 't', action = clap::ArgAction::Append)]
    pub types: Vec<String>,

    /// Direction to follow relationships in: outgoing, incoming, both
    #[arg(long, short, value_parser = parse_direction)]
    pub direction: Option<Direction>,

    /// Relationship property holding the traversal cost
    #[arg(long)]
    pub cost_property: Option<String>,

    /// Cost for relationships without the cost property
    #[arg(long)]
    pub default_cost: Option<f64>,

    /// Remaining-cost estimate for astar
    #[arg(long, value_enum)]
    pub estimate: Option<EstimateKind>,

    /// Coordinate property names for the estimate, e.g. x,y or lat,lon
    #[arg(long, value_parser = parse_key_pair, requires = "estimate")]
    pub estimate_keys: Option<(String, String)>,

    /// Return every optimal path instead of one
    #[arg(long)]
    pub all: bool,

    /// Stop after this many paths when returning every optimal path
    #[arg(long)]
    pub max_paths: Option<usize>,

    /// Abort the search after this many node expansions
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Abort the search after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Graph document (.json or .toml)
    #[arg(long, short)]
    pub graph: PathBuf,
}
