//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Developer activity chart generator.
///
/// Aggregates contribution and language statistics from GitHub, Gitea and
/// WakaTime and renders them as static SVG charts.
#[derive(Debug, Parser)]
#[command(name = "devstats", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch activity data and render all charts.
    Generate {
        /// Contribution window in days. The default covers 52 full weeks
        /// plus the current one, so the heatmap aligns on week boundaries.
        #[arg(long, default_value_t = 372)]
        days: u32,

        /// Output directory for the rendered charts.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Drop cached responses and refetch everything.
        #[arg(long)]
        refresh: bool,
    },

    /// Inspect or clear the response cache.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Cache maintenance operations.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// List cached responses.
    Info,

    /// Remove cached responses.
    Clear {
        /// Only remove the entry with this key.
        key: Option<String>,
    },
}
