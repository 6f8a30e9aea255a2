//! TicTacToe game implementation for the Canopy engine
//!
//! A small, fully deterministic game used as the reference implementation of
//! the [`GameState`] contract and as a fast target for search tests and
//! benchmarks.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{BoardAction, GameState, Winner};
//! use games_tictactoe::TicTacToe;
//!
//! let state = TicTacToe::new();
//! assert_eq!(state.actions().len(), 9);
//!
//! let state = state.updated(&BoardAction::at(1, 1));
//! assert_eq!(state.actions().len(), 8);
//! assert_eq!(state.winner(), None::<Winner>);
//! ```

use std::fmt;

use engine_core::{BoardAction, GameState, Side, Winner};
use thiserror::Error;

/// Board side length
pub const SIZE: u8 = 3;

/// Winning positions (rows, columns, diagonals) as cell indices
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Rejected moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Position ({x}, {y}) is off the board")]
    OutOfBounds { x: u8, y: u8 },

    #[error("Position ({x}, {y}) is already taken")]
    Occupied { x: u8, y: u8 },

    #[error("TicTacToe has no pass move")]
    PassNotAllowed,

    #[error("Game is already over")]
    GameOver,
}

/// TicTacToe game state
///
/// X is the first player and O the passive one. Cells are indexed
/// `y * 3 + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    board: [Option<Side>; 9],
    to_move: Side,
    outcome: Option<Winner>,
}

impl TicTacToe {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            to_move: Side::First, // X goes first
            outcome: None,
        }
    }

    /// Side whose turn it is.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Occupant of `(x, y)`, `None` when empty or off the board.
    pub fn cell(&self, x: u8, y: u8) -> Option<Side> {
        Self::index(x, y).and_then(|idx| self.board[idx])
    }

    /// Number of empty cells.
    pub fn empty_cells(&self) -> usize {
        self.board.iter().filter(|cell| cell.is_none()).count()
    }

    fn index(x: u8, y: u8) -> Option<usize> {
        (x < SIZE && y < SIZE).then(|| usize::from(y * SIZE + x))
    }

    /// Apply `action`, rejecting anything that is not a legal move.
    pub fn try_play(&self, action: &BoardAction) -> Result<Self, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        let (x, y) = action.coordinates().ok_or(GameError::PassNotAllowed)?;
        let idx = Self::index(x, y).ok_or(GameError::OutOfBounds { x, y })?;
        if self.board[idx].is_some() {
            return Err(GameError::Occupied { x, y });
        }

        let mut next = *self;
        next.board[idx] = Some(self.to_move);
        next.outcome = Self::check_winner(&next.board);

        // Switch player if game not over
        if next.outcome.is_none() {
            next.to_move = self.to_move.opponent();
        }
        Ok(next)
    }

    /// Check for winner on the board
    fn check_winner(board: &[Option<Side>; 9]) -> Option<Winner> {
        for [a, b, c] in LINES {
            if let Some(side) = board[a] {
                if board[b] == Some(side) && board[c] == Some(side) {
                    return Some(side.as_winner());
                }
            }
        }

        // Board full but no winner
        if board.iter().all(Option::is_some) {
            return Some(Winner::Draw);
        }

        None
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Action = BoardAction;

    fn actions(&self) -> Vec<BoardAction> {
        if self.outcome.is_some() {
            return Vec::new();
        }

        (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| (x, y)))
            .filter(|&(x, y)| self.cell(x, y).is_none())
            .map(|(x, y)| BoardAction::at(x, y))
            .collect()
    }

    /// Illegal actions leave the state unchanged; use
    /// [`TicTacToe::try_play`] to have them reported.
    fn updated(&self, action: &BoardAction) -> Self {
        self.try_play(action).unwrap_or(*self)
    }

    fn finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn winner(&self) -> Option<Winner> {
        self.outcome
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SIZE {
            let row: Vec<&str> = (0..SIZE)
                .map(|x| match self.cell(x, y) {
                    Some(Side::First) => "X",
                    Some(Side::Passive) => "O",
                    None => ".",
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
