//! `pathgraph find`
use std::time::Instant;

use crate::cli::{EstimateKind, FindArgs};
use crate::commands::dispatch::CommandContext;
use pathgraph_core::config::FinderConfig;
use pathgraph_core::error::Result;
use pathgraph_core::graph::eval::{CoordinateEstimate, EuclideanEstimate, GeoEstimate};
use pathgraph_core::graph::load_graph;
use pathgraph_core::report::PathReport;

/// Execute the find command
pub fn execute(ctx: &CommandContext, args: &FindArgs) -> Result<()> {
    let mut config = ctx.finder_config()?;
    apply_overrides(&mut config, args);
    let finder = config.build()?;

    let loaded = load_graph(&args.graph)?;
    let start = Instant::now();
    let from = loaded.resolve(&args.from)?;
    let to = loaded.resolve(&args.to)?;

    let found = finder.find(&loaded.graph, from, to)?;
    pathgraph_core::trace_time!(start, "find_paths", paths = found.len());
    tracing::debug!(elapsed = ?ctx.start.elapsed(), "find_complete");

    let report = PathReport::new(&loaded, &args.from, &args.to, finder.algorithm(), &found)?;
    println!("{}", report.render(ctx.cli.format)?);
    Ok(())
}

/// Command-line flags take precedence over the configuration file
fn apply_overrides(config: &mut FinderConfig, args: &FindArgs) {
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if !args.types.is_empty() {
        config.relationship_types = args.types.clone();
    }
    if let Some(direction) = args.direction {
        config.direction = direction;
    }
    if args.cost_property.is_some() {
        config.cost_property = args.cost_property.clone();
    }
    if args.default_cost.is_some() {
        config.default_cost = args.default_cost;
    }
    if let Some(kind) = args.estimate {
        config.estimate = Some(estimate(kind, args.estimate_keys.clone()));
    }
    if args.all {
        config.all_paths = true;
    }
    if args.max_paths.is_some() {
        config.max_paths = args.max_paths;
    }
    if args.max_steps.is_some() {
        config.max_steps = args.max_steps;
    }
    if args.timeout_ms.is_some() {
        config.timeout_ms = args.timeout_ms;
    }
}

fn estimate(kind: EstimateKind, keys: Option<(String, String)>) -> CoordinateEstimate {
    match kind {
        EstimateKind::Euclidean => {
            let (x, y) = keys.unwrap_or_else(|| ("x".into(), "y".into()));
            CoordinateEstimate::Euclidean(EuclideanEstimate { x, y })
        }
        EstimateKind::Geo => {
            let (lat, lon) = keys.unwrap_or_else(|| ("lat".into(), "lon".into()));
            CoordinateEstimate::Geo(GeoEstimate { lat, lon })
        }
    }
}
