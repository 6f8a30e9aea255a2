//! Actor statistics tracking.
//!
//! Tallies episode outcomes from the engine's point of view together with
//! search totals. Snapshots serialize to JSON for the periodic and final log
//! lines.

use engine_core::{Side, Winner};
use mcts::SearchStats;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;

/// Result of a finished episode for the engine's seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn for_side(winner: Winner, side: Side) -> Self {
        match winner {
            Winner::Draw => Outcome::Draw,
            w if w == side.as_winner() => Outcome::Win,
            _ => Outcome::Loss,
        }
    }
}

/// Aggregated actor statistics, designed for lock-free updates.
#[derive(Debug)]
pub struct ActorStats {
    actor_id: String,
    env_id: String,
    episodes_completed: AtomicU32,
    engine_wins: AtomicU32,
    engine_losses: AtomicU32,
    draws: AtomicU32,
    /// Plies across all episodes, both seats
    total_plies: AtomicU64,
    /// Search epochs across all episodes, including pondering
    total_epochs: AtomicU64,
    search_time_us: AtomicU64,
    start_time: Instant,
}

/// Serializable stats for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorStatsSnapshot {
    pub actor_id: String,
    pub env_id: String,
    pub episodes_completed: u32,
    pub engine_wins: u32,
    pub engine_losses: u32,
    pub draws: u32,
    pub win_rate: f64,
    pub avg_episode_length: f64,
    pub total_epochs: u64,
    pub epochs_per_second: f64,
    pub runtime_seconds: f64,
}

impl ActorStats {
    pub fn new(actor_id: &str, env_id: &str) -> Self {
        Self {
            actor_id: actor_id.to_string(),
            env_id: env_id.to_string(),
            episodes_completed: AtomicU32::new(0),
            engine_wins: AtomicU32::new(0),
            engine_losses: AtomicU32::new(0),
            draws: AtomicU32::new(0),
            total_plies: AtomicU64::new(0),
            total_epochs: AtomicU64::new(0),
            search_time_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a completed episode.
    pub fn record_episode(&self, plies: u32, outcome: Outcome, search: &SearchStats) {
        self.episodes_completed.fetch_add(1, Ordering::Relaxed);
        self.total_plies.fetch_add(u64::from(plies), Ordering::Relaxed);
        self.total_epochs
            .fetch_add(u64::from(search.iterations), Ordering::Relaxed);
        self.search_time_us
            .fetch_add(search.elapsed_us, Ordering::Relaxed);

        let counter = match outcome {
            Outcome::Win => &self.engine_wins,
            Outcome::Loss => &self.engine_losses,
            Outcome::Draw => &self.draws,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> ActorStatsSnapshot {
        let episodes = self.episodes_completed.load(Ordering::Relaxed);
        let wins = self.engine_wins.load(Ordering::Relaxed);
        let plies = self.total_plies.load(Ordering::Relaxed);
        let epochs = self.total_epochs.load(Ordering::Relaxed);
        let search_secs = self.search_time_us.load(Ordering::Relaxed) as f64 / 1e6;

        let (win_rate, avg_episode_length) = if episodes > 0 {
            (
                f64::from(wins) / f64::from(episodes),
                plies as f64 / f64::from(episodes),
            )
        } else {
            (0.0, 0.0)
        };

        let epochs_per_second = if search_secs > 0.0 {
            epochs as f64 / search_secs
        } else {
            0.0
        };

        ActorStatsSnapshot {
            actor_id: self.actor_id.clone(),
            env_id: self.env_id.clone(),
            episodes_completed: episodes,
            engine_wins: wins,
            engine_losses: self.engine_losses.load(Ordering::Relaxed),
            draws: self.draws.load(Ordering::Relaxed),
            win_rate,
            avg_episode_length,
            total_epochs: epochs,
            epochs_per_second,
            runtime_seconds: self.start_time.elapsed().as_secs_f64(),
        }
    }

    /// Snapshot as a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }
}
