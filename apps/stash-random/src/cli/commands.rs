//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::client::StashClient;
use crate::config::StashConfig;
use stash_random_core::{
    Intent, Location, NavigationTarget, RandomError, RandomSource, Randomizer, SeededRandom,
    ThreadRandom, TriggerHost,
};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use url::Url;

// =============================================================================
// SETUP
// =============================================================================

/// Load settings, letting `--url` win over file and environment.
pub fn load_config(path: Option<&Path>, url: Option<&str>) -> Result<StashConfig, RandomError> {
    let mut config = StashConfig::load(path)?;
    if let Some(url) = url {
        config.url = url.to_string();
        config.validate()?;
    }
    tracing::debug!("Using Stash at {}", config.url);
    Ok(config)
}

/// Thread-local randomness, or a fixed seed when `--seed` is given.
#[derive(Debug)]
pub enum CliRandom {
    Thread(ThreadRandom),
    Seeded(SeededRandom),
}

impl CliRandom {
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(SeededRandom::new(seed)),
            None => Self::Thread(ThreadRandom),
        }
    }
}

impl RandomSource for CliRandom {
    fn below(&self, bound: u64) -> u64 {
        match self {
            Self::Thread(r) => r.below(bound),
            Self::Seeded(r) => r.below(bound),
        }
    }
}

/// Wire a Stash client, `random` and the configured resolver together.
pub fn build_randomizer<R: RandomSource>(
    config: &StashConfig,
    random: R,
) -> Result<Randomizer<StashClient, R>, RandomError> {
    Ok(Randomizer::new(
        StashClient::from_config(config)?,
        random,
        config.resolver(),
    )
    .with_marker_page_size(config.marker_page_size))
}

// =============================================================================
// CONSOLE HOST
// =============================================================================

/// Terminal stand-in for the browser: the location is a string, navigation
/// prints the destination.
#[derive(Debug)]
pub struct ConsoleHost {
    location: String,
    base: Url,
    absolute: bool,
    json_mode: bool,
    interactive: bool,
    announced: bool,
}

impl ConsoleHost {
    #[must_use]
    pub fn new(
        location: &str,
        base: Url,
        absolute: bool,
        json_mode: bool,
        interactive: bool,
    ) -> Self {
        Self {
            location: location.to_string(),
            base,
            absolute,
            json_mode,
            interactive,
            announced: false,
        }
    }

    /// Current location.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.location
    }

    /// Move without a random pick, e.g. when the user types a path.
    pub fn move_to(&mut self, location: &str) {
        self.location = location.to_string();
    }

    fn render(&self, target: &NavigationTarget) -> String {
        if self.absolute {
            match target.absolute(&self.base) {
                Ok(url) => return url.to_string(),
                Err(e) => tracing::warn!("{}", e),
            }
        }
        target.to_string()
    }
}

impl TriggerHost for ConsoleHost {
    fn ensure_present(&mut self) {
        if self.interactive && !self.announced {
            eprintln!("Press Enter for a random pick, type a location to go there, 'q' to quit.");
            self.announced = true;
        }
    }

    fn location(&self) -> Result<Location, RandomError> {
        Location::parse(&self.location)
    }

    fn navigate(&mut self, target: &NavigationTarget) {
        let destination = target.to_string();
        if self.json_mode {
            let output = serde_json::json!({
                "destination": destination,
                "url": target.absolute(&self.base).ok().map(|u| u.to_string()),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).unwrap_or_default()
            );
        } else {
            println!("{}", self.render(target));
        }
        self.location = destination;
    }

    fn report(&mut self, error: &RandomError) {
        if self.json_mode {
            let output = serde_json::json!({ "error": error.to_string() });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).unwrap_or_default()
            );
        } else if self.interactive {
            eprintln!("{error}");
        }
    }
}

// =============================================================================
// PICK COMMAND
// =============================================================================

/// Run one cycle from `from` and print where it lands.
pub async fn cmd_pick(
    config: &StashConfig,
    from: &str,
    seed: Option<u64>,
    absolute: bool,
    json_mode: bool,
) -> Result<(), RandomError> {
    let randomizer = build_randomizer(config, CliRandom::from_seed(seed))?;
    let mut host = ConsoleHost::new(from, config.base_url()?, absolute, json_mode, false);

    let target = randomizer.activate(&mut host).await?;
    tracing::debug!("{} -> {}", from, target);
    Ok(())
}

// =============================================================================
// RESOLVE COMMAND
// =============================================================================

/// Print what `from` would sample.
pub fn cmd_resolve(config: &StashConfig, from: &str, json_mode: bool) -> Result<(), RandomError> {
    let location = Location::parse(from)?;
    let intent = config.resolver().resolve(&location);

    if json_mode {
        let output = serde_json::json!({
            "location": location.to_string(),
            "intent": intent,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Location: {}", location);
    match &intent {
        Intent::RandomMarker => {
            println!("Rule:     {:?}", intent.rule());
            println!("Sample:   a random scene marker, then its scene at the marker time");
        }
        Intent::Sample(sample) => {
            println!("Rule:     {:?}", sample.rule);
            println!("Sample:   {}", sample.kind);
            match &sample.filter.scope {
                Some(scope) => println!("Scope:    {} {}", scope.anchor, scope.anchor_id),
                None => println!("Scope:    global"),
            }
            if let Some(search) = sample.filter.search() {
                println!("Search:   {}", search);
            }
            println!("Per page: {}", sample.per_page);
            println!("Playlist: {:?}", sample.playlist);
        }
    }
    Ok(())
}

// =============================================================================
// SHELL COMMAND
// =============================================================================

/// Interactive trigger session on stdin.
///
/// An empty line presses the button; `q`, `quit` or `exit` leaves; anything
/// else moves to that location.
pub async fn cmd_shell(
    config: &StashConfig,
    from: &str,
    seed: Option<u64>,
    json_mode: bool,
) -> Result<(), RandomError> {
    let randomizer = build_randomizer(config, CliRandom::from_seed(seed))?;
    let mut host = ConsoleHost::new(from, config.base_url()?, false, json_mode, true);
    host.ensure_present();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let io_err = |e: std::io::Error| RandomError::Io(e.to_string());

    loop {
        if !json_mode {
            stdout
                .write_all(format!("{} > ", host.current()).as_bytes())
                .await
                .map_err(io_err)?;
            stdout.flush().await.map_err(io_err)?;
        }

        let Some(line) = lines.next_line().await.map_err(io_err)? else {
            break;
        };

        match line.trim() {
            "" => {
                if let Err(e) = randomizer.activate(&mut host).await {
                    tracing::debug!("Activation failed: {}", e);
                }
            }
            "q" | "quit" | "exit" => break,
            location => host.move_to(location),
        }
    }

    Ok(())
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP trigger endpoint.
pub async fn cmd_serve(config: &StashConfig, host: &str, port: u16) -> Result<(), RandomError> {
    println!("stash-random trigger starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Stash:    {}", config.url);
    println!("  Per page: {}", config.per_page);
    println!();
    println!("Endpoints:");
    println!("  GET /random?from=<location> - Redirect to a random pick");
    println!("  GET /resolve?from=<location> - Show the sampling intent");
    println!("  GET /health                  - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, config).await
}
