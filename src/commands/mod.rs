//! CLI commands for pathgraph

pub mod dispatch;
pub mod find;
pub mod inspect;
