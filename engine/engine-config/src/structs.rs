//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_env_id() -> String {
    defaults::env_id().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_expansion_threshold() -> u32 {
    defaults::expansion_threshold()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_epochs() -> u32 {
    defaults::epochs()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_actor_id() -> String {
    defaults::actor_id().into()
}
fn d_max_episodes() -> i32 {
    defaults::max_episodes()
}
fn d_opponent() -> String {
    defaults::opponent().into()
}
fn d_engine_first() -> bool {
    defaults::engine_first()
}
fn d_ponder_epochs() -> u32 {
    defaults::ponder_epochs()
}
fn d_move_time_ms() -> u64 {
    defaults::move_time_ms()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    /// Game to play (`othello` or `tictactoe`)
    #[serde(default = "d_env_id")]
    pub env_id: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            env_id: defaults::env_id().into(),
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search parameters
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_expansion_threshold")]
    pub expansion_threshold: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// Search iterations per engine move
    #[serde(default = "d_epochs")]
    pub epochs: u32,
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            expansion_threshold: defaults::expansion_threshold(),
            exploration: defaults::exploration(),
            epochs: defaults::epochs(),
            seed: defaults::seed(),
        }
    }
}

/// Actor (game driver) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    #[serde(default = "d_actor_id")]
    pub actor_id: String,
    /// Episodes to play; -1 for unlimited
    #[serde(default = "d_max_episodes")]
    pub max_episodes: i32,
    /// Opponent policy (`random` or `mcts`)
    #[serde(default = "d_opponent")]
    pub opponent: String,
    #[serde(default = "d_engine_first")]
    pub engine_first: bool,
    /// Search iterations run while the opponent is to move
    #[serde(default = "d_ponder_epochs")]
    pub ponder_epochs: u32,
    /// Wall clock budget per engine move; 0 runs exactly `mcts.epochs`
    #[serde(default = "d_move_time_ms")]
    pub move_time_ms: u64,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            actor_id: defaults::actor_id().into(),
            max_episodes: defaults::max_episodes(),
            opponent: defaults::opponent().into(),
            engine_first: defaults::engine_first(),
            ponder_epochs: defaults::ponder_epochs(),
            move_time_ms: defaults::move_time_ms(),
            log_interval: defaults::log_interval(),
        }
    }
}
