//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time, so every binary and test
//! sees the same values without needing the file on disk.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    env_id: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    expansion_threshold: u32,
    exploration: f64,
    epochs: u32,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    actor_id: String,
    max_episodes: i32,
    opponent: String,
    engine_first: bool,
    ponder_epochs: u32,
    move_time_ms: u64,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn env_id() -> &'static str {
    &DEFAULTS.common.env_id
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn expansion_threshold() -> u32 {
    DEFAULTS.mcts.expansion_threshold
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn epochs() -> u32 {
    DEFAULTS.mcts.epochs
}
pub fn seed() -> Option<u64> {
    DEFAULTS.mcts.seed
}

// Actor
pub fn actor_id() -> &'static str {
    &DEFAULTS.actor.actor_id
}
pub fn max_episodes() -> i32 {
    DEFAULTS.actor.max_episodes
}
pub fn opponent() -> &'static str {
    &DEFAULTS.actor.opponent
}
pub fn engine_first() -> bool {
    DEFAULTS.actor.engine_first
}
pub fn ponder_epochs() -> u32 {
    DEFAULTS.actor.ponder_epochs
}
pub fn move_time_ms() -> u64 {
    DEFAULTS.actor.move_time_ms
}
pub fn log_interval() -> u32 {
    DEFAULTS.actor.log_interval
}
