//! CLI argument parsing for pathgraph
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{EstimateKind, FindArgs, InspectArgs};
pub use pathgraph_core::format::OutputFormat;
use parse::parse_format;

/// Pathgraph - shortest, cheapest and goal-directed paths through property graphs
#[derive(Parser, Debug)]
#[command(name = "pathgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Finder configuration file (TOML with a [finder] table)
    #[arg(long, global = true, env = "PATHGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (human, json, records)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. debug, pathgraph_core=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find paths between two nodes of a graph document
    Find(FindArgs),

    /// Summarize a graph document
    Inspect(InspectArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pathgraph_core::config::Algorithm;
    use pathgraph_core::graph::Direction;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_find_command() {
        let cli = Cli::try_parse_from([
            "pathgraph",
            "--format",
            "records",
            "find",
            "--graph",
            "g.json",
            "--from",
            "a",
            "--to",
            "b",
            "--algorithm",
            "astar",
            "--type",
            "ROAD",
            "--type",
            "RAIL",
            "--direction",
            "out",
            "--cost-property",
            "length",
            "--estimate",
            "geo",
            "--estimate-keys",
            "latitude,longitude",
            "--all",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Records);
        let Some(Commands::Find(args)) = cli.command else {
            panic!("expected find");
        };
        assert_eq!(args.algorithm, Some(Algorithm::AStar));
        assert_eq!(args.types, vec!["ROAD", "RAIL"]);
        assert_eq!(args.direction, Some(Direction::Outgoing));
        assert_eq!(args.estimate, Some(EstimateKind::Geo));
        assert_eq!(
            args.estimate_keys,
            Some(("latitude".to_string(), "longitude".to_string()))
        );
        assert!(args.all);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = Cli::try_parse_from(["pathgraph", "--format", "yaml", "inspect", "--graph", "g"])
            .unwrap_err();
        assert!(err.to_string().contains("unknown format"));
    }
}
