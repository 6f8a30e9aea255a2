//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Prefix of every environment override
const ENV_PREFIX: &str = "CANOPY";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CANOPY_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate directory)
];

/// Locate the config file: `$CANOPY_CONFIG` when it names an existing file,
/// otherwise the first of [`CONFIG_SEARCH_PATHS`] that exists.
pub fn find_config_file() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
        if explicit.is_file() {
            return Some(explicit);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_ENV_VAR,
            explicit.display()
        );
    }

    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// Load the central configuration, then apply `CANOPY_*` overrides.
///
/// Without a config file the embedded defaults are used.
pub fn load_config() -> CentralConfig {
    match find_config_file() {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_from_path(&path)
        }
        None => {
            debug!("No config.toml found, using built-in defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files are logged and replaced by the defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Read `CANOPY_<SECTION>_<KEY>` and parse it. Unset or unparseable values
/// yield `None`.
fn env_value<T: FromStr>(section: &str, key: &str) -> Option<T> {
    let name = format!("{}_{}_{}", ENV_PREFIX, section, key).to_ascii_uppercase();
    let raw = std::env::var(&name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

/// Overwrite each listed field of one section from its environment variable.
/// Fields marked `(optional)` hold an `Option` and are only ever set to `Some`.
macro_rules! env_override {
    ($config:ident . $section:ident { $($field:ident $(($opt:ident))?),* $(,)? }) => {
        $(
            env_override!(@field $config.$section, stringify!($section), $field $($opt)?);
        )*
    };
    (@field $target:expr, $section:expr, $field:ident) => {
        if let Some(v) = env_value($section, stringify!($field)) {
            $target.$field = v;
        }
    };
    (@field $target:expr, $section:expr, $field:ident optional) => {
        if let Some(v) = env_value($section, stringify!($field)) {
            $target.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CANOPY_<SECTION>_<KEY>.
/// Values that fail to parse are logged and ignored.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    env_override!(config.common { env_id, log_level });
    env_override!(config.mcts {
        expansion_threshold,
        exploration,
        epochs,
        seed(optional),
    });
    env_override!(config.actor {
        actor_id,
        max_episodes,
        opponent,
        engine_first,
        ponder_epochs,
        move_time_ms,
        log_interval,
    });

    config
}
