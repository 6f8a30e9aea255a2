//! Evaluator trait for leaf and terminal scoring.
//!
//! The evaluator turns a game state into a score in `[-1, 1]`. Scores are
//! absolute: positive favors one fixed side no matter whose turn it is, and
//! backup never flips the sign. By default that side is the first player.
//! The default is a uniformly random rollout; callers may plug in any other
//! estimator (for example a learned value function) that keeps the same range
//! and sign convention.

use std::marker::PhantomData;

use engine_core::{GameState, Side, Winner};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Rollout did not finish within {0} plies")]
    RolloutTooLong(u32),
}

/// Trait for state evaluators.
///
/// Implementations could be:
/// - RolloutEvaluator: Random playout to a terminal state
/// - FnEvaluator: Any closure, e.g. wrapping a value network
///
/// `evaluate` receives the tree-owned state by shared reference; anything
/// that needs to advance the position must work on its own copy.
pub trait Evaluator<S: GameState>: Send + Sync {
    /// Score `state` in `[-1, 1]`, positive favoring the first player.
    ///
    /// Finished states should be scored directly from `winner()`.
    fn evaluate(&self, state: &S, rng: &mut ChaCha20Rng) -> Result<f64, EvaluatorError>;
}

/// Score of a finished state under the `First -> 1`, `Passive -> -1`,
/// `Draw -> 0` mapping.
pub fn terminal_score<S: GameState>(state: &S) -> Result<f64, EvaluatorError> {
    state.winner().map(Winner::score).ok_or_else(|| {
        EvaluatorError::InvalidState(format!("finished state has no winner: {:?}", state))
    })
}

/// Random rollout evaluator that plays random moves to terminal state.
/// Returns the game outcome as the score.
#[derive(Debug, Clone, Default)]
pub struct RolloutEvaluator {
    /// Optional cap on rollout length to guard against games that never end
    pub max_depth: Option<u32>,

    /// Side whose wins score `+1`
    pub side: Side,
}

impl RolloutEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: u32) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Self::default()
        }
    }

    /// Builder pattern: score outcomes from `side`'s point of view.
    pub fn for_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

impl<S: GameState> Evaluator<S> for RolloutEvaluator {
    fn evaluate(&self, state: &S, rng: &mut ChaCha20Rng) -> Result<f64, EvaluatorError> {
        if state.finished() {
            return Ok(self.side.sign() * terminal_score(state)?);
        }

        let mut situation = state.clone();
        let mut plies = 0u32;

        while !situation.finished() {
            if let Some(max_depth) = self.max_depth {
                if plies >= max_depth {
                    return Err(EvaluatorError::RolloutTooLong(max_depth));
                }
            }

            let actions = situation.actions();
            let action = actions.choose(rng).ok_or_else(|| {
                EvaluatorError::InvalidState(format!(
                    "unfinished state offers no legal actions: {:?}",
                    situation
                ))
            })?;
            situation.update(action);
            plies += 1;
        }

        Ok(self.side.sign() * terminal_score(&situation)?)
    }
}

/// Evaluator backed by a closure.
///
/// ```rust,ignore
/// let evaluator = FnEvaluator::new(|state: &MyGame, _rng| Ok(value_net.predict(state)));
/// ```
pub struct FnEvaluator<S, F> {
    f: F,
    _state: PhantomData<fn(&S)>,
}

impl<S, F> FnEvaluator<S, F>
where
    S: GameState,
    F: Fn(&S, &mut ChaCha20Rng) -> Result<f64, EvaluatorError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _state: PhantomData,
        }
    }
}

impl<S, F> std::fmt::Debug for FnEvaluator<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEvaluator").finish_non_exhaustive()
    }
}

impl<S, F> Evaluator<S> for FnEvaluator<S, F>
where
    S: GameState,
    F: Fn(&S, &mut ChaCha20Rng) -> Result<f64, EvaluatorError> + Send + Sync,
{
    fn evaluate(&self, state: &S, rng: &mut ChaCha20Rng) -> Result<f64, EvaluatorError> {
        (self.f)(state, rng)
    }
}
