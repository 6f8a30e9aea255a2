//! Games the actor can play
//!
//! The engine only needs [`GameState`]; the actor additionally needs to know
//! whose turn it is and how to render a final position, which
//! [`PlayableGame`] adds for the bundled board games.

use anyhow::{anyhow, Result};
use engine_core::{BoardAction, GameState, Side};
use games_othello::Othello;
use games_tictactoe::TicTacToe;
use std::fmt;
use std::str::FromStr;

/// Game selected by `--env-id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Othello,
    TicTacToe,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Othello, GameKind::TicTacToe];

    pub fn env_id(self) -> &'static str {
        match self {
            GameKind::Othello => "othello",
            GameKind::TicTacToe => "tictactoe",
        }
    }
}

impl FromStr for GameKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.env_id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow!(
                    "unknown game '{}', expected one of: {}",
                    s,
                    GameKind::ALL.map(GameKind::env_id).join(", ")
                )
            })
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_id())
    }
}

/// A board game the actor can drive.
pub trait PlayableGame: GameState<Action = BoardAction> + fmt::Display {
    fn initial() -> Self;

    fn side_to_move(&self) -> Side;
}

impl PlayableGame for Othello {
    fn initial() -> Self {
        Othello::new()
    }

    fn side_to_move(&self) -> Side {
        self.to_move()
    }
}

impl PlayableGame for TicTacToe {
    fn initial() -> Self {
        TicTacToe::new()
    }

    fn side_to_move(&self) -> Side {
        self.to_move()
    }
}
