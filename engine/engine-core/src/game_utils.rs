//! Shared utilities for two-player game implementations
//!
//! This module provides common functionality used across multiple game implementations
//! to reduce code duplication and ensure consistent behavior.

use crate::typed::{GameState, Winner};

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Moves first from the initial position
    #[default]
    First,
    /// Moves second
    Passive,
}

impl Side {
    /// The other seat.
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Passive,
            Side::Passive => Side::First,
        }
    }

    /// Outcome in which this side wins.
    #[inline]
    pub fn as_winner(self) -> Winner {
        match self {
            Side::First => Winner::First,
            Side::Passive => Winner::Passive,
        }
    }

    /// `1.0` for the first player, `-1.0` for the passive one. Multiplying an
    /// absolute score by this gives the score from this side's point of view.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Side::First => 1.0,
            Side::Passive => -1.0,
        }
    }
}

/// Decide a game by comparing piece counts.
///
/// # Example
/// ```
/// use engine_core::game_utils::winner_by_count;
/// use engine_core::Winner;
///
/// assert_eq!(winner_by_count(33, 31), Winner::First);
/// assert_eq!(winner_by_count(10, 54), Winner::Passive);
/// assert_eq!(winner_by_count(32, 32), Winner::Draw);
/// ```
#[inline]
pub fn winner_by_count(first: u32, passive: u32) -> Winner {
    match first.cmp(&passive) {
        std::cmp::Ordering::Greater => Winner::First,
        std::cmp::Ordering::Less => Winner::Passive,
        std::cmp::Ordering::Equal => Winner::Draw,
    }
}

/// Apply a sequence of actions to a state, returning the resulting state.
///
/// The input state is left untouched. Handy for setting up mid-game
/// positions in tests and benchmarks.
pub fn play_sequence<S: GameState>(state: &S, actions: &[S::Action]) -> S {
    let mut current = state.clone();
    for action in actions {
        current.update(action);
    }
    current
}
