//! Othello game implementation for the Canopy engine
//!
//! Standard 8x8 rules with an explicit pass move:
//!
//! - Black ([`Side::First`]) moves first from the four-stone opening.
//! - A move must flip at least one opposing line.
//! - A player without a legal placement must pass; `actions()` returns
//!   `[BoardAction::Pass]` in that case.
//! - The game ends when the player to move cannot place a stone right after
//!   the opponent passed. The side with more stones wins.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{BoardAction, GameState};
//! use games_othello::Othello;
//!
//! let state = Othello::new();
//! assert_eq!(state.actions().len(), 4);
//!
//! let state = state.updated(&BoardAction::at(2, 3));
//! assert_eq!(state.stones(), (4, 1));
//! ```

use std::fmt;

use engine_core::game_utils::winner_by_count;
use engine_core::{BoardAction, GameState, Side, Winner};
use thiserror::Error;

/// Board side length
pub const SIZE: u8 = 8;

const CELLS: usize = (SIZE as usize) * (SIZE as usize);

const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Rejected moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Position ({x}, {y}) is off the board")]
    OutOfBounds { x: u8, y: u8 },

    #[error("Position ({x}, {y}) is already taken")]
    Occupied { x: u8, y: u8 },

    #[error("Position ({x}, {y}) flips no stones")]
    NoFlips { x: u8, y: u8 },

    #[error("Cannot pass while a placement is available")]
    PassNotAllowed,

    #[error("Game is already over")]
    GameOver,
}

/// Othello game state
///
/// Cells are indexed `y * 8 + x`. Black is the first player, White the
/// passive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Othello {
    board: [Option<Side>; CELLS],
    to_move: Side,
    /// The previous move was a pass
    passed: bool,
}

impl Othello {
    /// Create the standard opening position.
    pub fn new() -> Self {
        let mut board = [None; CELLS];
        board[Self::idx(3, 3)] = Some(Side::Passive);
        board[Self::idx(4, 3)] = Some(Side::First);
        board[Self::idx(3, 4)] = Some(Side::First);
        board[Self::idx(4, 4)] = Some(Side::Passive);
        Self {
            board,
            to_move: Side::First,
            passed: false,
        }
    }

    #[inline]
    fn idx(x: u8, y: u8) -> usize {
        usize::from(y) * usize::from(SIZE) + usize::from(x)
    }

    #[inline]
    fn in_range(x: i8, y: i8) -> bool {
        (0..SIZE as i8).contains(&x) && (0..SIZE as i8).contains(&y)
    }

    /// Side whose turn it is.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Whether the previous move was a pass.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Occupant of `(x, y)`, `None` when empty or off the board.
    pub fn cell(&self, x: u8, y: u8) -> Option<Side> {
        if x < SIZE && y < SIZE {
            self.board[Self::idx(x, y)]
        } else {
            None
        }
    }

    /// Stone counts as `(black, white)`.
    pub fn stones(&self) -> (u32, u32) {
        self.board
            .iter()
            .fold((0, 0), |(black, white), cell| match cell {
                Some(Side::First) => (black + 1, white),
                Some(Side::Passive) => (black, white + 1),
                None => (black, white),
            })
    }

    /// Length of the opposing run flipped in direction `(dx, dy)` when the
    /// side to move places at `(x, y)`. Zero when nothing is flipped.
    fn flips_in_direction(&self, x: u8, y: u8, (dx, dy): (i8, i8)) -> u8 {
        let enemy = self.to_move.opponent();
        let (mut cx, mut cy) = (x as i8 + dx, y as i8 + dy);
        let mut run = 0u8;

        while Self::in_range(cx, cy) {
            match self.board[Self::idx(cx as u8, cy as u8)] {
                Some(side) if side == enemy => run += 1,
                Some(_) => return run,
                None => return 0,
            }
            cx += dx;
            cy += dy;
        }
        0
    }

    fn is_placeable(&self, x: u8, y: u8) -> bool {
        self.board[Self::idx(x, y)].is_none()
            && DIRECTIONS
                .iter()
                .any(|&d| self.flips_in_direction(x, y, d) > 0)
    }

    /// Squares where the side to move may place a stone, row by row.
    pub fn placements(&self) -> Vec<(u8, u8)> {
        (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_placeable(x, y))
            .collect()
    }

    fn has_placement(&self) -> bool {
        (0..SIZE).any(|y| (0..SIZE).any(|x| self.is_placeable(x, y)))
    }

    /// Apply `action`, rejecting anything that is not a legal move.
    pub fn try_play(&self, action: &BoardAction) -> Result<Self, GameError> {
        if self.finished() {
            return Err(GameError::GameOver);
        }

        match *action {
            BoardAction::Pass => {
                if self.has_placement() {
                    return Err(GameError::PassNotAllowed);
                }
                Ok(Self {
                    to_move: self.to_move.opponent(),
                    passed: true,
                    ..*self
                })
            }
            BoardAction::Move { x, y } => {
                if x >= SIZE || y >= SIZE {
                    return Err(GameError::OutOfBounds { x, y });
                }
                if self.board[Self::idx(x, y)].is_some() {
                    return Err(GameError::Occupied { x, y });
                }

                let mut next = *self;
                let mut flipped = 0u32;
                for d in DIRECTIONS {
                    let run = self.flips_in_direction(x, y, d);
                    let (mut cx, mut cy) = (x as i8, y as i8);
                    for _ in 0..run {
                        cx += d.0;
                        cy += d.1;
                        next.board[Self::idx(cx as u8, cy as u8)] = Some(self.to_move);
                    }
                    flipped += u32::from(run);
                }
                if flipped == 0 {
                    return Err(GameError::NoFlips { x, y });
                }

                next.board[Self::idx(x, y)] = Some(self.to_move);
                next.to_move = self.to_move.opponent();
                next.passed = false;
                Ok(next)
            }
        }
    }
}

impl Default for Othello {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Othello {
    type Action = BoardAction;

    fn actions(&self) -> Vec<BoardAction> {
        let placements = self.placements();
        if !placements.is_empty() {
            placements
                .into_iter()
                .map(|(x, y)| BoardAction::at(x, y))
                .collect()
        } else if self.passed {
            Vec::new()
        } else {
            vec![BoardAction::Pass]
        }
    }

    /// Illegal actions leave the state unchanged; use
    /// [`Othello::try_play`] to have them reported.
    fn updated(&self, action: &BoardAction) -> Self {
        self.try_play(action).unwrap_or(*self)
    }

    fn finished(&self) -> bool {
        self.passed && !self.has_placement()
    }

    fn winner(&self) -> Option<Winner> {
        if !self.finished() {
            return None;
        }
        let (black, white) = self.stones();
        Some(winner_by_count(black, white))
    }
}

impl fmt::Display for Othello {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SIZE {
            let row: String = (0..SIZE)
                .map(|x| match self.cell(x, y) {
                    Some(Side::First) => 'X',
                    Some(Side::Passive) => 'O',
                    None => '.',
                })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
