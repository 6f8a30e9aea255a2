//! MCTS search engine.
//!
//! One epoch walks from the root and ends with exactly one evaluation and
//! backup:
//! 1. Expansion: an expandable node gets one child per legal action
//! 2. Selection: descend into a child via the selection cost
//! 3. Evaluation: score the leaf (or terminal node) that was reached
//! 4. Backup: add the score to every node on the path back to the root
//!
//! Real moves are applied with [`MctsSearch::play`] (the engine's own move)
//! and [`MctsSearch::enemy`] (the opponent's move). Both keep the subtree
//! below the new root and discard the rest.

use std::time::Instant;

use engine_core::GameState;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::cost::{CostError, SelectCost, UcbCost};
use crate::evaluator::{Evaluator, EvaluatorError, RolloutEvaluator};
use crate::node::NodeId;
use crate::tree::{ChildStats, MctsTree};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),

    #[error("Cost error: {0}")]
    Cost(#[from] CostError),
}

/// Counters for one or more `simulate` calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Completed epochs (each ends in one backup)
    pub iterations: u32,
    pub expansions: u32,
    /// Evaluations of unfinished leaves
    pub leaf_evaluations: u32,
    /// Evaluations of finished states
    pub terminal_evaluations: u32,
    /// Deepest descent below the root
    pub max_depth: u32,
    pub elapsed_us: u64,
}

impl SearchStats {
    /// Fold another batch of counters into this one.
    pub fn merge(&mut self, other: &SearchStats) {
        self.iterations += other.iterations;
        self.expansions += other.expansions;
        self.leaf_evaluations += other.leaf_evaluations;
        self.terminal_evaluations += other.terminal_evaluations;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.elapsed_us += other.elapsed_us;
    }
}

/// MCTS search state: the tree plus the strategies that drive it.
///
/// The evaluator and the selection cost are fixed at construction and shared
/// by every node of the tree.
pub struct MctsSearch<S: GameState, E = RolloutEvaluator, C = UcbCost> {
    tree: MctsTree<S>,
    evaluator: E,
    cost: C,
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl<S: GameState> MctsSearch<S> {
    /// Create a search with random rollouts and the UCB cost built from
    /// `config.exploration`.
    pub fn new(state: S, config: MctsConfig) -> Result<Self, SearchError> {
        let cost = UcbCost::new(config.exploration);
        Self::with_strategies(state, config, RolloutEvaluator::new(), cost)
    }
}

impl<S, E, C> MctsSearch<S, E, C>
where
    S: GameState,
    E: Evaluator<S>,
    C: SelectCost<S>,
{
    /// Create a search with caller-supplied evaluation and selection cost.
    pub fn with_strategies(
        state: S,
        config: MctsConfig,
        evaluator: E,
        cost: C,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };

        Ok(Self {
            tree: MctsTree::new(state),
            evaluator,
            cost,
            config,
            rng,
        })
    }

    /// Run `epochs` search iterations from the current root.
    pub fn simulate(&mut self, epochs: u32) -> Result<SearchStats, SearchError> {
        let start = Instant::now();
        let threshold = self.config.expansion_threshold;
        let mut stats = SearchStats::default();

        for _ in 0..epochs {
            let mut node = self.tree.root();
            let mut depth = 0u32;

            loop {
                if self.tree.is_expandable(node, threshold) {
                    let created = self.tree.expand(node)?;
                    if created == 0 {
                        return Err(SearchError::InvalidState(format!(
                            "unfinished state has no legal actions: {:?}",
                            self.tree.get(node).state
                        )));
                    }
                    stats.expansions += 1;
                    trace!(node = node.0, children = created, depth, "Expanded node");
                } else if !self.tree.get(node).has_children() {
                    let finished = self.tree.get(node).state.finished();
                    let score = self.evaluate_node(node)?;
                    self.tree.backup(node, score)?;
                    if finished {
                        stats.terminal_evaluations += 1;
                    } else {
                        stats.leaf_evaluations += 1;
                    }
                    break;
                }

                node = self.tree.select(node, &self.cost, &mut self.rng)?;
                depth += 1;

                if self.tree.get(node).state.finished() {
                    let score = self.evaluate_node(node)?;
                    self.tree.backup(node, score)?;
                    stats.terminal_evaluations += 1;
                    break;
                }
            }

            stats.iterations += 1;
            stats.max_depth = stats.max_depth.max(depth);
        }

        stats.elapsed_us = start.elapsed().as_micros() as u64;

        debug!(
            iterations = stats.iterations,
            expansions = stats.expansions,
            leaf_evaluations = stats.leaf_evaluations,
            terminal_evaluations = stats.terminal_evaluations,
            max_depth = stats.max_depth,
            tree_nodes = self.tree.len(),
            elapsed_us = stats.elapsed_us,
            "Simulation batch complete"
        );

        Ok(stats)
    }

    /// Score `state` with the configured evaluator.
    pub fn evaluate(&mut self, state: &S) -> Result<f64, SearchError> {
        Ok(self.evaluator.evaluate(state, &mut self.rng)?)
    }

    fn evaluate_node(&mut self, id: NodeId) -> Result<f64, SearchError> {
        let state = &self.tree.get(id).state;
        Ok(self.evaluator.evaluate(state, &mut self.rng)?)
    }

    /// Add `score` to `node` and all of its ancestors.
    ///
    /// `node` must come from the current tree: [`play`](Self::play) and
    /// [`enemy`](Self::enemy) renumber the arena, and an id taken before
    /// them is rejected with [`SearchError::InvalidState`] once it falls
    /// outside the arena.
    pub fn backup(&mut self, node: NodeId, score: f64) -> Result<(), SearchError> {
        self.tree.backup(node, score)
    }

    /// Commit the engine's move: the root child with the largest value sum
    /// becomes the new root. Returns the new root state.
    pub fn play(&mut self) -> Result<&S, SearchError> {
        self.play_move().map(|(_, state)| state)
    }

    /// Like [`play`](Self::play), also returning the action taken.
    pub fn play_move(&mut self) -> Result<(S::Action, &S), SearchError> {
        let (action, child) = self.tree.best_action_by_value().ok_or_else(|| {
            SearchError::InvalidState("root has no children to play".into())
        })?;

        let chosen = self.tree.get(child);
        debug!(
            action = ?action,
            visits = chosen.visit_count,
            value_sum = chosen.value_sum,
            "Engine move"
        );

        self.tree.advance_root(child)?;
        Ok((action, self.root_state()))
    }

    /// Apply the opponent's move. The root must already have a child for
    /// `action`; the engine never creates a detached node.
    pub fn enemy(&mut self, action: &S::Action) -> Result<&S, SearchError> {
        let child = self
            .tree
            .get(self.tree.root())
            .child(action)
            .ok_or_else(|| SearchError::InvalidAction(format!("{:?}", action)))?;

        debug!(
            action = ?action,
            visits = self.tree.get(child).visit_count,
            "Opponent move"
        );

        self.tree.advance_root(child)?;
        Ok(self.root_state())
    }

    /// State at the current root.
    pub fn root_state(&self) -> &S {
        &self.tree.get(self.tree.root()).state
    }

    /// Whether the game at the root is over.
    pub fn is_finished(&self) -> bool {
        self.root_state().finished()
    }

    /// Per-child statistics of the root, in action order.
    pub fn root_statistics(&self) -> Vec<ChildStats<S::Action>> {
        self.tree.root_statistics()
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<S> {
        &self.tree
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

impl<S, E, C> std::fmt::Debug for MctsSearch<S, E, C>
where
    S: GameState,
    E: std::fmt::Debug,
    C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MctsSearch")
            .field("tree_nodes", &self.tree.len())
            .field("evaluator", &self.evaluator)
            .field("cost", &self.cost)
            .field("config", &self.config)
            .finish()
    }
}
