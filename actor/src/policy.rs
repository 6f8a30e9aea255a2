//! Opponent policies for the actor

use anyhow::{anyhow, Result};
use engine_core::{GameState, Side};
use mcts::{MctsConfig, MctsSearch, RolloutEvaluator, UcbCost};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use std::str::FromStr;

/// Opponent selected by `--opponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentKind {
    Random,
    Mcts,
}

impl FromStr for OpponentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(OpponentKind::Random),
            "mcts" => Ok(OpponentKind::Mcts),
            _ => Err(anyhow!(
                "unknown opponent '{}', expected one of: random, mcts",
                s
            )),
        }
    }
}

/// Trait for action selection policies.
pub trait Policy<S: GameState>: Send {
    /// Select a legal action for the side to move in `state`.
    fn select_action(&mut self, state: &S) -> Result<S::Action>;
}

/// Picks uniformly among the legal actions.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl<S: GameState> Policy<S> for RandomPolicy {
    fn select_action(&mut self, state: &S) -> Result<S::Action> {
        state
            .actions()
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| anyhow!("no legal actions to choose from"))
    }
}

/// Runs an independent search from scratch for every move.
///
/// Scores are taken from `side`'s point of view, so this policy plays
/// whichever seat it is given.
#[derive(Debug)]
pub struct MctsPolicy {
    config: MctsConfig,
    side: Side,
    moves: u64,
}

impl MctsPolicy {
    pub fn new(config: MctsConfig, side: Side) -> Self {
        Self {
            config,
            side,
            moves: 0,
        }
    }
}

impl<S: GameState> Policy<S> for MctsPolicy {
    fn select_action(&mut self, state: &S) -> Result<S::Action> {
        let mut config = self.config.clone();
        if let Some(seed) = config.seed {
            config.seed = Some(seed.wrapping_add(self.moves));
        }
        self.moves += 1;

        let epochs = config.epochs.max(1);
        let exploration = config.exploration;
        let evaluator = RolloutEvaluator::new().for_side(self.side);
        let mut search = MctsSearch::with_strategies(
            state.clone(),
            config,
            evaluator,
            UcbCost::new(exploration),
        )?;
        search.simulate(epochs)?;
        let (action, _) = search.play_move()?;
        Ok(action)
    }
}

/// Build the opponent for one episode.
pub fn create_opponent<S: GameState>(
    kind: OpponentKind,
    side: Side,
    config: MctsConfig,
) -> Box<dyn Policy<S>> {
    match kind {
        OpponentKind::Random => match config.seed {
            // Decorrelate from the engine's own stream
            Some(seed) => Box::new(RandomPolicy::with_seed(seed ^ 0x5eed)),
            None => Box::new(RandomPolicy::new()),
        },
        OpponentKind::Mcts => {
            let config = MctsConfig {
                seed: config.seed.map(|s| s ^ 0x5eed),
                ..config
            };
            Box::new(MctsPolicy::new(config, side))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::game_utils::play_sequence;
    use engine_core::{BoardAction, Winner};
    use games_othello::Othello;
    use games_tictactoe::TicTacToe;

    #[test]
    fn parses_opponent_kinds() {
        assert_eq!("random".parse::<OpponentKind>().unwrap(), OpponentKind::Random);
        assert_eq!("MCTS".parse::<OpponentKind>().unwrap(), OpponentKind::Mcts);
        assert!("minimax".parse::<OpponentKind>().is_err());
    }

    #[test]
    fn random_policy_picks_legal_actions() {
        let mut policy = RandomPolicy::with_seed(42);
        let state = Othello::new();

        for _ in 0..20 {
            let action = policy.select_action(&state).unwrap();
            assert!(state.actions().contains(&action));
        }
    }

    #[test]
    fn random_policy_is_reproducible() {
        let state = TicTacToe::new();
        let mut a = RandomPolicy::with_seed(9);
        let mut b = RandomPolicy::with_seed(9);

        for _ in 0..10 {
            let left: BoardAction = a.select_action(&state).unwrap();
            let right: BoardAction = b.select_action(&state).unwrap();
            assert_eq!(left, right);
        }
    }

    #[test]
    fn random_policy_fails_without_actions() {
        // X wins on the top row
        let state = play_sequence(
            &TicTacToe::new(),
            &[
                BoardAction::at(0, 0),
                BoardAction::at(0, 1),
                BoardAction::at(1, 0),
                BoardAction::at(1, 1),
                BoardAction::at(2, 0),
            ],
        );
        assert_eq!(state.winner(), Some(Winner::First));

        let mut policy = RandomPolicy::with_seed(1);
        assert!(Policy::<TicTacToe>::select_action(&mut policy, &state).is_err());
    }

    #[test]
    fn mcts_policy_takes_winning_move_for_passive_side() {
        // X . .
        // O O .   O to move wins at (2, 1)
        // X . X
        let state = play_sequence(
            &TicTacToe::new(),
            &[
                BoardAction::at(0, 0),
                BoardAction::at(0, 1),
                BoardAction::at(0, 2),
                BoardAction::at(1, 1),
                BoardAction::at(2, 2),
            ],
        );
        let config = MctsConfig::for_testing()
            .with_exploration(0.5)
            .with_epochs(600);
        let mut policy = MctsPolicy::new(config, Side::Passive);

        let action = policy.select_action(&state).unwrap();
        assert_eq!(action, BoardAction::at(2, 1));
    }

    #[test]
    fn create_opponent_builds_requested_kind() {
        let config = MctsConfig::for_testing().with_epochs(10);
        let state = TicTacToe::new();

        for kind in [OpponentKind::Random, OpponentKind::Mcts] {
            let mut opponent = create_opponent::<TicTacToe>(kind, Side::Passive, config.clone());
            let action = opponent.select_action(&state).unwrap();
            assert!(state.actions().contains(&action));
        }
    }
}
