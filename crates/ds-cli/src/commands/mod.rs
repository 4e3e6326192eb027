//! CLI subcommand implementations.

pub mod cache;
pub mod generate;
