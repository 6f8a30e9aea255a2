//! Actor - plays the Canopy MCTS engine against an opponent
//!
//! A process that:
//! 1. Loads settings from config.toml, `CANOPY_*` env vars and the command line
//! 2. Plays complete games of the chosen board game, engine against a random
//!    or MCTS opponent, keeping one search tree per game
//! 3. Logs progress to stderr and prints a JSON stats summary on stdout

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, error, info, warn};

mod actor;
mod config;
mod game_config;
mod policy;
mod stats;

use crate::actor::Actor;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    let episodes = if config.max_episodes < 0 {
        "unlimited".to_string()
    } else {
        config.max_episodes.to_string()
    };
    info!(
        game = %config.env_id,
        opponent = %config.opponent,
        engine_first = config.engine_first,
        episodes = %episodes,
        "Starting actor {}",
        config.actor_id
    );
    debug!(config = %serde_json::to_string(&config)?, "Resolved configuration");

    let actor = Arc::new(Actor::new(config)?);

    // Stop after the current ply on ctrl+c
    let shutdown_actor = Arc::clone(&actor);
    let shutdown_handle = tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, stopping actor...");
                shutdown_actor.shutdown();
            }
            Err(e) => warn!("Failed to listen for ctrl+c: {}", e),
        }
    });

    let run_result = actor.run().await;
    shutdown_handle.abort();

    if let Err(e) = run_result {
        error!("Actor failed: {}", e);
        return Err(e);
    }

    // Machine-readable summary on stdout; logs go to stderr
    println!("{}", actor.stats().to_json()?);
    Ok(())
}
