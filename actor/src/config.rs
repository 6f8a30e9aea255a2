//! Configuration for the Actor
//!
//! Defaults come from the central config (config.toml plus `CANOPY_*`
//! environment overrides, see the `engine-config` crate). CLI arguments take
//! highest priority.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use engine_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::level_filters::LevelFilter;

use crate::game_config::GameKind;
use crate::policy::OpponentKind;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_actor_id() -> String {
    CENTRAL_CONFIG.actor.actor_id.clone()
}

fn default_env_id() -> String {
    CENTRAL_CONFIG.common.env_id.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_max_episodes() -> i32 {
    CENTRAL_CONFIG.actor.max_episodes
}

fn default_epochs() -> u32 {
    CENTRAL_CONFIG.mcts.epochs
}

fn default_ponder_epochs() -> u32 {
    CENTRAL_CONFIG.actor.ponder_epochs
}

fn default_expansion_threshold() -> u32 {
    CENTRAL_CONFIG.mcts.expansion_threshold
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

fn default_opponent() -> String {
    CENTRAL_CONFIG.actor.opponent.clone()
}

fn default_engine_first() -> bool {
    CENTRAL_CONFIG.actor.engine_first
}

fn default_move_time_ms() -> u64 {
    CENTRAL_CONFIG.actor.move_time_ms
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.actor.log_interval
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "actor")]
#[command(about = "Canopy Actor - plays the search engine against an opponent")]
#[command(
    long_about = "Actor that runs complete games between the MCTS engine and an
opponent (uniformly random or a second MCTS engine) and reports the results.

Configuration is loaded from config.toml with CANOPY_* environment variable
overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Unique actor identifier
    #[arg(long, default_value_t = default_actor_id())]
    pub actor_id: String,

    /// Game to play (othello, tictactoe)
    #[arg(long, default_value_t = default_env_id())]
    pub env_id: String,

    /// Maximum episodes to run (-1 for unlimited)
    #[arg(long, default_value_t = default_max_episodes())]
    pub max_episodes: i32,

    /// Search epochs before each engine move
    #[arg(long, default_value_t = default_epochs())]
    pub epochs: u32,

    /// Search epochs run while the opponent is to move (at least 1 is used)
    #[arg(long, default_value_t = default_ponder_epochs())]
    pub ponder_epochs: u32,

    /// Prior selections a node needs before it is expanded
    #[arg(long, default_value_t = default_expansion_threshold())]
    pub expansion_threshold: u32,

    /// Exploration constant of the UCB cost
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Opponent policy (random, mcts)
    #[arg(long, default_value_t = default_opponent())]
    pub opponent: String,

    /// Whether the engine takes the first seat
    #[arg(long, default_value_t = default_engine_first(), action = ArgAction::Set)]
    pub engine_first: bool,

    /// Base RNG seed; episode N uses seed + N. Unset seeds from entropy.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Wall-clock budget per engine move in milliseconds (0 to use --epochs)
    #[arg(long, default_value_t = default_move_time_ms())]
    pub move_time_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N episodes (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.actor_id.is_empty() {
            return Err(anyhow!("actor_id cannot be empty"));
        }

        self.game()?;
        self.opponent_kind()?;

        if self.epochs == 0 && self.move_time_ms == 0 {
            return Err(anyhow!(
                "epochs must be greater than 0 unless move_time_ms is set"
            ));
        }

        if self.expansion_threshold == 0 {
            return Err(anyhow!("expansion_threshold must be at least 1"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a finite non-negative number, got {}",
                self.exploration
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn game(&self) -> Result<GameKind> {
        self.env_id.parse()
    }

    pub fn opponent_kind(&self) -> Result<OpponentKind> {
        self.opponent.parse()
    }

    /// Seed from the command line, falling back to `[mcts] seed`.
    pub fn base_seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.mcts.seed)
    }

    pub fn move_time(&self) -> Option<Duration> {
        (self.move_time_ms > 0).then(|| Duration::from_millis(self.move_time_ms))
    }

    /// Search parameters for one episode.
    pub fn mcts_config(&self, episode: u32) -> mcts::MctsConfig {
        let config = mcts::MctsConfig::default()
            .with_expansion_threshold(self.expansion_threshold)
            .with_exploration(self.exploration)
            .with_epochs(self.epochs);
        match self.base_seed() {
            Some(seed) => config.with_seed(seed.wrapping_add(u64::from(episode))),
            None => config,
        }
    }
}
