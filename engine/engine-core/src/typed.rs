//! Typed game contract the search engine operates against
//!
//! A game implements [`GameState`] on a value-semantics snapshot of a
//! position. The search tree keeps every snapshot it has ever produced, so
//! implementations must never share mutable substructure between a state and
//! the states derived from it.

use std::fmt::Debug;
use std::hash::Hash;

/// Outcome of a finished two-player game.
///
/// `First` is the player who moves first from the initial position,
/// `Passive` is the player who moves second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    First,
    Passive,
    Draw,
}

impl Winner {
    /// Absolute score of this outcome: `First -> 1`, `Passive -> -1`, `Draw -> 0`.
    ///
    /// Scores are never flipped per ply; positive always favors the first
    /// player.
    #[inline]
    pub fn score(self) -> f64 {
        match self {
            Winner::First => 1.0,
            Winner::Passive => -1.0,
            Winner::Draw => 0.0,
        }
    }
}

/// Action type shared by grid board games.
///
/// A move places a piece at `(x, y)`; `Pass` hands the turn to the opponent
/// without touching the board. Games match on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardAction {
    Move { x: u8, y: u8 },
    Pass,
}

impl BoardAction {
    /// Shorthand for `BoardAction::Move { x, y }`.
    #[inline]
    pub const fn at(x: u8, y: u8) -> Self {
        BoardAction::Move { x, y }
    }

    /// Coordinates of a move, `None` for a pass.
    pub fn coordinates(&self) -> Option<(u8, u8)> {
        match self {
            BoardAction::Move { x, y } => Some((*x, *y)),
            BoardAction::Pass => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, BoardAction::Pass)
    }
}

impl std::fmt::Display for BoardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardAction::Move { x, y } => write!(f, "({}, {})", x, y),
            BoardAction::Pass => write!(f, "pass"),
        }
    }
}

/// Main trait for game implementations
///
/// The search engine needs nothing beyond this surface. `Clone` is the
/// explicit deep copy used for disposable rollout states.
///
/// # Contract
///
/// * `actions()` is empty only when the position offers no legal move at all.
///   Games with a pass rule return `[Pass]` rather than an empty list.
/// * `updated()` never mutates the receiver and returns a fully independent
///   state.
/// * `winner()` returns `Some` exactly when `finished()` is true.
///
/// # Example
///
/// ```rust
/// use engine_core::typed::{GameState, Winner};
///
/// /// Players alternately take one or two stones; taking the last one wins.
/// #[derive(Debug, Clone, PartialEq)]
/// struct Nim {
///     stones: u8,
///     first_to_move: bool,
/// }
///
/// impl GameState for Nim {
///     type Action = u8;
///
///     fn actions(&self) -> Vec<u8> {
///         (1..=self.stones.min(2)).collect()
///     }
///
///     fn updated(&self, take: &u8) -> Self {
///         Nim {
///             stones: self.stones - take,
///             first_to_move: !self.first_to_move,
///         }
///     }
///
///     fn finished(&self) -> bool {
///         self.stones == 0
///     }
///
///     fn winner(&self) -> Option<Winner> {
///         if !self.finished() {
///             return None;
///         }
///         // The player who just moved took the last stone.
///         Some(if self.first_to_move { Winner::Passive } else { Winner::First })
///     }
/// }
///
/// let start = Nim { stones: 3, first_to_move: true };
/// let next = start.updated(&2);
/// assert_eq!(start.stones, 3);
/// assert_eq!(next.actions(), vec![1]);
/// assert_eq!(next.updated(&1).winner(), Some(Winner::Passive));
/// ```
pub trait GameState: Clone + Debug + Send + Sync + 'static {
    /// Action type - comparable and usable as a lookup key
    type Action: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Legal actions from this state, in a stable order.
    fn actions(&self) -> Vec<Self::Action>;

    /// Return the state reached by applying `action`, leaving `self` untouched.
    fn updated(&self, action: &Self::Action) -> Self;

    /// Apply `action` in place.
    ///
    /// Used on disposable copies during rollouts. Games may override this
    /// with a cheaper in-place transition.
    fn update(&mut self, action: &Self::Action) {
        *self = self.updated(action);
    }

    /// Whether the position is terminal.
    fn finished(&self) -> bool;

    /// Outcome of the game, `None` while it is still in progress.
    fn winner(&self) -> Option<Winner>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_scores() {
        assert_eq!(Winner::First.score(), 1.0);
        assert_eq!(Winner::Passive.score(), -1.0);
        assert_eq!(Winner::Draw.score(), 0.0);
    }

    #[test]
    fn test_board_action_coordinates() {
        assert_eq!(BoardAction::at(2, 5).coordinates(), Some((2, 5)));
        assert_eq!(BoardAction::Pass.coordinates(), None);
        assert!(BoardAction::Pass.is_pass());
        assert!(!BoardAction::at(0, 0).is_pass());
    }

    #[test]
    fn test_board_action_display() {
        assert_eq!(BoardAction::at(3, 4).to_string(), "(3, 4)");
        assert_eq!(BoardAction::Pass.to_string(), "pass");
    }

    #[test]
    fn test_board_action_usable_as_key() {
        use std::collections::HashMap;

        let mut visits = HashMap::new();
        visits.insert(BoardAction::at(1, 1), 3u32);
        visits.insert(BoardAction::Pass, 1u32);

        assert_eq!(visits[&BoardAction::Move { x: 1, y: 1 }], 3);
        assert_eq!(visits[&BoardAction::Pass], 1);
    }

    #[derive(Debug, Clone)]
    struct Countdown(u8);

    impl GameState for Countdown {
        type Action = ();

        fn actions(&self) -> Vec<()> {
            if self.0 == 0 {
                Vec::new()
            } else {
                vec![()]
            }
        }

        fn updated(&self, _action: &()) -> Self {
            Countdown(self.0 - 1)
        }

        fn finished(&self) -> bool {
            self.0 == 0
        }

        fn winner(&self) -> Option<Winner> {
            self.finished().then_some(Winner::Draw)
        }
    }

    #[test]
    fn test_default_update_matches_updated() {
        let original = Countdown(3);
        let mut in_place = original.clone();
        in_place.update(&());

        assert_eq!(in_place.0, original.updated(&()).0);
        assert_eq!(original.0, 3);
    }
}
