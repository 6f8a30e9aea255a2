//! Core traits and types for the Canopy search engine
//!
//! This crate provides the fundamental abstractions the search operates on:
//! - `GameState`: Typed trait every two-player game implements
//! - `Winner`: Outcome of a finished game, with its absolute score
//! - `BoardAction`: Move-or-pass action shared by grid board games
//! - `game_utils`: Helpers shared across game implementations

pub mod game_utils;
pub mod typed;

// Re-export main types for convenience
pub use game_utils::Side;
pub use typed::{BoardAction, GameState, Winner};
