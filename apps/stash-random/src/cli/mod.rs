//! # stash-random CLI Module
//!
//! This module implements the CLI interface for stash-random.
//!
//! ## Available Commands
//!
//! - `pick` - Run one random cycle and print the destination
//! - `resolve` - Show what a location would sample, without querying
//! - `shell` - Interactive trigger: every empty line is one button press
//! - `serve` - Start the HTTP trigger endpoint

mod commands;

use clap::{Parser, Subcommand};
use stash_random_core::RandomError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// stash-random - a Random button for Stash
///
/// Picks a uniformly random scene, image, gallery, performer, studio, tag or
/// group in the context of the page you are on, and keeps the playlist going.
#[derive(Parser, Debug)]
#[command(name = "stash-random")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (default: ./stash-random.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Stash server URL, overriding config and STASH_URL
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick a random destination from a location
    Pick {
        /// Location the button is pressed on (path, path?query or full URL)
        #[arg(short, long, default_value = "/")]
        from: String,

        /// Seed the random source for a reproducible pick
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the full URL instead of the path
        #[arg(short, long)]
        absolute: bool,
    },

    /// Show the sampling intent for a location
    Resolve {
        /// Location to resolve
        #[arg(short, long, default_value = "/")]
        from: String,
    },

    /// Interactive trigger session
    Shell {
        /// Starting location
        #[arg(short, long, default_value = "/")]
        from: String,

        /// Seed the random source
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Start the HTTP trigger endpoint
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "9998")]
        port: u16,
    },
}

impl Cli {
    /// Whether the command is long-running and deserves a banner.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(
            self.command,
            Some(Commands::Shell { .. } | Commands::Serve { .. })
        )
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), RandomError> {
    let config = load_config(cli.config.as_deref(), cli.url.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Pick {
            from,
            seed,
            absolute,
        }) => cmd_pick(&config, &from, seed, absolute, json_mode).await,
        Some(Commands::Resolve { from }) => cmd_resolve(&config, &from, json_mode),
        Some(Commands::Shell { from, seed }) => cmd_shell(&config, &from, seed, json_mode).await,
        Some(Commands::Serve { host, port }) => cmd_serve(&config, &host, port).await,
        None => {
            // No subcommand - one global pick
            cmd_pick(&config, "/", None, false, json_mode).await
        }
    }
}
