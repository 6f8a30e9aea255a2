//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the Canopy binaries.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`CANOPY_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! Binaries layer their command line on top of this.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CANOPY_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CANOPY_COMMON_ENV_ID=tictactoe
//!     CANOPY_MCTS_EPOCHS=5000
//!     CANOPY_MCTS_SEED=42
//!     CANOPY_ACTOR_OPPONENT=mcts
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, find_config_file, load_config, load_from_path, CONFIG_ENV_VAR,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;
