//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use pathgraph_core::config::FinderConfig;
use pathgraph_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }

    /// Finder settings from `--config`, or the defaults when none is given
    pub fn finder_config(&self) -> Result<FinderConfig> {
        match &self.cli.config {
            Some(path) => {
                let config = FinderConfig::load(path)?;
                tracing::debug!(path = %path.display(), algorithm = %config.algorithm, "load_config");
                Ok(config)
            }
            None => Ok(FinderConfig::default()),
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("pathgraph {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Shortest, cheapest and goal-directed paths through property graphs.");
        println!();
        println!("Run `pathgraph --help` for usage information.");
        Ok(())
    }
}
