//! Actor: plays the search engine against an opponent, episode after episode
//!
//! The search lives behind an `Arc<Mutex<_>>` and every `simulate` call runs
//! on tokio's blocking pool, so the async loop stays responsive to shutdown.

use anyhow::{anyhow, Result};
use engine_core::{GameState, Side};
use indicatif::{ProgressBar, ProgressStyle};
use mcts::{MctsSearch, RolloutEvaluator, SearchStats, UcbCost};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::game_config::{GameKind, PlayableGame};
use crate::policy::{create_opponent, OpponentKind};
use crate::stats::{ActorStats, Outcome};

/// Epochs per `simulate` call while spending a wall-clock move budget.
const MOVE_TIME_SLICE: u32 = 64;

type SharedSearch<S> = Arc<Mutex<MctsSearch<S>>>;

fn lock<S: GameState>(search: &SharedSearch<S>) -> Result<MutexGuard<'_, MctsSearch<S>>> {
    search
        .lock()
        .map_err(|e| anyhow!("Search mutex poisoned: {}", e))
}

/// Result of one finished episode.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeResult {
    pub plies: u32,
    pub outcome: Outcome,
    pub search: SearchStats,
}

pub struct Actor {
    config: Config,
    game: GameKind,
    opponent: OpponentKind,
    engine_side: Side,
    stats: ActorStats,
    episode_count: AtomicU32,
    shutdown_signal: AtomicBool,
}

impl Actor {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let game = config.game()?;
        let opponent = config.opponent_kind()?;
        let engine_side = if config.engine_first {
            Side::First
        } else {
            Side::Passive
        };

        info!(
            actor_id = %config.actor_id,
            game = %game,
            opponent = ?opponent,
            engine_side = ?engine_side,
            epochs = config.epochs,
            ponder_epochs = config.ponder_epochs,
            expansion_threshold = config.expansion_threshold,
            exploration = config.exploration,
            "Actor initialized"
        );

        Ok(Self {
            stats: ActorStats::new(&config.actor_id, game.env_id()),
            config,
            game,
            opponent,
            engine_side,
            episode_count: AtomicU32::new(0),
            shutdown_signal: AtomicBool::new(false),
        })
    }

    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }

    pub fn shutdown(&self) {
        self.shutdown_signal.store(true, Ordering::Relaxed);
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown_signal.load(Ordering::Relaxed)
    }

    pub async fn run(&self) -> Result<()> {
        info!(
            actor_id = %self.config.actor_id,
            max_episodes = self.config.max_episodes,
            "Actor starting main loop"
        );

        // Progress bar for bounded runs, only when stderr is a TTY
        let progress = if self.config.max_episodes > 0
            && std::io::IsTerminal::is_terminal(&std::io::stderr())
        {
            let pb = ProgressBar::new(self.config.max_episodes as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} episodes ({eta})")
                .map_err(|e| anyhow!("invalid progress template: {}", e))?
                .progress_chars("#>-");
            pb.set_style(style);
            Some(pb)
        } else {
            None
        };

        loop {
            if self.is_shutting_down() {
                info!("Shutdown signal received, stopping actor");
                break;
            }

            let current_episode_count = self.episode_count.load(Ordering::Relaxed);
            if self.config.max_episodes > 0
                && current_episode_count >= self.config.max_episodes as u32
            {
                info!(
                    "Reached maximum episodes ({}), stopping",
                    self.config.max_episodes
                );
                break;
            }

            let episode_start = Instant::now();
            let result = match self.game {
                GameKind::Othello => self.run_episode::<games_othello::Othello>().await?,
                GameKind::TicTacToe => self.run_episode::<games_tictactoe::TicTacToe>().await?,
            };

            // Interrupted mid-game
            let Some(result) = result else {
                break;
            };

            self.stats
                .record_episode(result.plies, result.outcome, &result.search);
            let new_count = self.episode_count.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(
                episode = new_count,
                plies = result.plies,
                outcome = ?result.outcome,
                epochs = result.search.iterations,
                max_depth = result.search.max_depth,
                duration = episode_start.elapsed().as_secs_f64(),
                "Episode completed"
            );

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            if self.config.log_interval > 0 && new_count % self.config.log_interval == 0 {
                let snapshot = self.stats.snapshot();
                info!(
                    episodes = snapshot.episodes_completed,
                    wins = snapshot.engine_wins,
                    losses = snapshot.engine_losses,
                    draws = snapshot.draws,
                    win_rate = format!("{:.3}", snapshot.win_rate),
                    epochs_per_sec = format!("{:.0}", snapshot.epochs_per_second),
                    "Progress"
                );
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        match self.stats.to_json() {
            Ok(json) => info!(stats = %json, "Actor finished"),
            Err(e) => warn!("Failed to serialize stats: {}", e),
        }
        Ok(())
    }

    /// Play one game to the end. Returns `None` if shutdown interrupted it.
    pub async fn run_episode<S: PlayableGame>(&self) -> Result<Option<EpisodeResult>> {
        let episode = self.episode_count.load(Ordering::Relaxed);
        let mcts_config = self.config.mcts_config(episode);
        let exploration = mcts_config.exploration;

        let mut opponent = create_opponent::<S>(
            self.opponent,
            self.engine_side.opponent(),
            mcts_config.clone(),
        );

        // The engine keeps one tree for the whole game, scored for its own seat
        let evaluator = RolloutEvaluator::new().for_side(self.engine_side);
        let search: SharedSearch<S> = Arc::new(Mutex::new(MctsSearch::with_strategies(
            S::initial(),
            mcts_config,
            evaluator,
            UcbCost::new(exploration),
        )?));

        let mut totals = SearchStats::default();
        let mut plies = 0u32;

        loop {
            if self.is_shutting_down() {
                return Ok(None);
            }

            let state = {
                let guard = lock(&search)?;
                if guard.is_finished() {
                    break;
                }
                guard.root_state().clone()
            };

            if state.side_to_move() == self.engine_side {
                let (action, stats) = self.engine_move(&search).await?;
                totals.merge(&stats);
                debug!(ply = plies, action = ?action, epochs = stats.iterations, "Engine moved");
            } else {
                // The opponent's move must already be a child of the root
                let stats = self.ponder(&search).await?;
                totals.merge(&stats);

                let action = opponent.select_action(&state)?;
                lock(&search)?.enemy(&action)?;
                debug!(ply = plies, action = ?action, "Opponent moved");
            }
            plies += 1;
        }

        let final_state = lock(&search)?.root_state().clone();
        let winner = final_state
            .winner()
            .ok_or_else(|| anyhow!("finished game reported no winner"))?;
        let outcome = Outcome::for_side(winner, self.engine_side);
        debug!(winner = ?winner, "Final position:\n{}", final_state);

        Ok(Some(EpisodeResult {
            plies,
            outcome,
            search: totals,
        }))
    }

    /// Search, then commit to the best root child.
    async fn engine_move<S: GameState>(
        &self,
        search: &SharedSearch<S>,
    ) -> Result<(S::Action, SearchStats)> {
        let search = Arc::clone(search);
        let epochs = self.config.epochs;
        let move_time = self.config.move_time();

        tokio::task::spawn_blocking(move || {
            let mut guard = lock(&search)?;
            let stats = match move_time {
                Some(budget) => simulate_for(&mut guard, budget)?,
                None => guard.simulate(epochs)?,
            };
            let (action, _) = guard.play_move()?;
            Ok((action, stats))
        })
        .await?
    }

    /// Search while the opponent is to move, so the root is expanded.
    async fn ponder<S: GameState>(&self, search: &SharedSearch<S>) -> Result<SearchStats> {
        let search = Arc::clone(search);
        let epochs = self.config.ponder_epochs.max(1);

        tokio::task::spawn_blocking(move || {
            let stats = lock(&search)?.simulate(epochs)?;
            Ok(stats)
        })
        .await?
    }
}

/// Simulate in short slices until `budget` has elapsed; runs at least one slice.
fn simulate_for<S: GameState>(search: &mut MctsSearch<S>, budget: Duration) -> Result<SearchStats> {
    let deadline = Instant::now() + budget;
    let mut stats = search.simulate(MOVE_TIME_SLICE)?;
    while Instant::now() < deadline {
        stats.merge(&search.simulate(MOVE_TIME_SLICE)?);
    }
    Ok(stats)
}
