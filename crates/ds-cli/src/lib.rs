//! Developer activity chart generator CLI.
//!
//! This crate provides the `devstats` binary: configuration, command
//! dispatch, and the SVG chart renderers.

pub mod charts;
mod cli;
pub mod commands;
mod config;

pub use cli::{CacheAction, Cli, Commands};
pub use config::Config;
