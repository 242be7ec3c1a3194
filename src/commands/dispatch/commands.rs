//! Routing from parsed subcommands to their handlers

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{find, inspect};
use pathgraph_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Find(args) => find::execute(ctx, args),
            Commands::Inspect(args) => inspect::execute(ctx, args),
        }
    }
}
