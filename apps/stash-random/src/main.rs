//! # stash-random - Random Button for Stash
//!
//! The main binary for stash-random.
//!
//! This application provides:
//! - CLI interface for one-shot and interactive random picks
//! - HTTP trigger endpoint (axum-based) for a navbar button
//! - GraphQL client for a Stash server (reqwest-based)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  apps/stash-random (THE BINARY)              │
//! │                                                              │
//! │  ┌─────────────┐    ┌──────────────┐    ┌────────────────┐  │
//! │  │    CLI      │    │ HTTP trigger │    │ Stash GraphQL  │  │
//! │  │   (clap)    │    │   (axum)     │    │   (reqwest)    │  │
//! │  └──────┬──────┘    └──────┬───────┘    └───────┬────────┘  │
//! │         │                  │                    │           │
//! │         └──────────────────┼────────────────────┘           │
//! │                            ▼                                │
//! │                 ┌────────────────────┐                      │
//! │                 │ stash-random-core  │                      │
//! │                 │    (THE LOGIC)     │                      │
//! │                 └────────────────────┘                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # One random pick from a performer page
//! stash-random pick --from /performers/42 --absolute
//!
//! # Interactive trigger
//! stash-random shell --from /tags?q=outdoor
//!
//! # HTTP trigger for a navbar button
//! stash-random serve --host 0.0.0.0 --port 9998
//! ```

use clap::Parser;
use stash_random::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // STASH_RANDOM_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr; stdout carries destinations.
    let log_format =
        std::env::var("STASH_RANDOM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stash_random=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Banner only for long-running commands; pick output stays pipeable
    if !cli.quiet && cli.is_interactive() {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// Print the stash-random startup banner.
fn print_banner() {
    eprintln!(
        r#"
  ┌─────────────────────────────┐
  │  stash-random  ⚄  v{:<8} │
  └─────────────────────────────┘
  Random in context • Playlist-sticky
"#,
        env!("CARGO_PKG_VERSION")
    );
}
