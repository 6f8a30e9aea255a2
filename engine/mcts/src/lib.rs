//! Monte Carlo Tree Search (MCTS) over any game implementing the
//! `engine-core` [`GameState`](engine_core::GameState) contract.
//!
//! # Overview
//!
//! Each epoch of [`MctsSearch::simulate`] walks from the root:
//!
//! 1. **Expansion**: a node that has been selected often enough (or the root)
//!    gets one child per legal action
//! 2. **Selection**: unvisited children first, then the highest
//!    `mean value + cost` as computed by a [`SelectCost`]
//! 3. **Evaluation**: the reached leaf or finished state is scored by an
//!    [`Evaluator`] (random rollouts by default)
//! 4. **Backup**: the score is added to every node up to the root
//!
//! Scores are absolute: they favor one fixed side and are never negated on
//! the way up.
//!
//! # Usage
//!
//! ```
//! use games_tictactoe::TicTacToe;
//! use mcts::{MctsConfig, MctsSearch};
//!
//! let config = MctsConfig::for_testing();
//! let mut search = MctsSearch::new(TicTacToe::new(), config).unwrap();
//!
//! search.simulate(200).unwrap();
//! let (action, state) = search.play_move().unwrap();
//! println!("engine played {action}, {} moves left", state.empty_cells());
//! ```
//!
//! # Strategies
//!
//! - [`RolloutEvaluator`]: uniformly random playout to a finished state
//! - [`FnEvaluator`]: any closure, e.g. a learned value function
//! - [`UcbCost`]: `exploration * sqrt(ln N / n)` bonus
//! - [`FnCost`]: any closure over the parent node and action

pub mod config;
pub mod cost;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use cost::{CostError, FnCost, SelectCost, UcbCost};
pub use evaluator::{terminal_score, Evaluator, EvaluatorError, FnEvaluator, RolloutEvaluator};
pub use node::{MctsNode, NodeId};
pub use search::{MctsSearch, SearchError, SearchStats};
pub use tree::{ChildStats, MctsTree, NodeView, TreeStats};
