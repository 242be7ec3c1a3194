//! `pathgraph inspect`
use crate::cli::InspectArgs;
use crate::commands::dispatch::CommandContext;
use pathgraph_core::error::Result;
use pathgraph_core::graph::load_graph;
use pathgraph_core::report::InspectReport;

/// Execute the inspect command
pub fn execute(ctx: &CommandContext, args: &InspectArgs) -> Result<()> {
    let loaded = load_graph(&args.graph)?;
    tracing::debug!(
        nodes = loaded.graph.node_count(),
        relationships = loaded.graph.relationship_count(),
        elapsed = ?ctx.start.elapsed(),
        "load_graph"
    );

    println!("{}", InspectReport::new(&loaded).render(ctx.cli.format)?);
    Ok(())
}
