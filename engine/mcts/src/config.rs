//! MCTS configuration parameters.

use crate::search::SearchError;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of prior selections a node needs before it is expanded.
    /// A node selected for the (threshold + 1)-th time is expanded in that
    /// descent; below that it is evaluated as a leaf. The root is expanded as
    /// soon as it is searched. Must be at least 1.
    pub expansion_threshold: u32,

    /// Exploration constant for the default UCB cost.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration: f64,

    /// Search iterations a caller runs per real move.
    /// The engine itself only uses the value passed to `simulate`.
    pub epochs: u32,

    /// Seed for the search RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            expansion_threshold: 2,
            exploration: 1.0,
            epochs: 10_000,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create config for interactive play (slower expansion, larger budget).
    pub fn for_play() -> Self {
        Self {
            expansion_threshold: 5,
            ..Self::default()
        }
    }

    /// Create a fast, deterministic config for testing.
    pub fn for_testing() -> Self {
        Self {
            expansion_threshold: 1,
            exploration: 1.0,
            epochs: 200,
            seed: Some(42),
        }
    }

    /// Builder pattern: set expansion threshold.
    pub fn with_expansion_threshold(mut self, threshold: u32) -> Self {
        self.expansion_threshold = threshold;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set per-move epoch budget.
    pub fn with_epochs(mut self, epochs: u32) -> Self {
        self.epochs = epochs;
        self
    }

    /// Builder pattern: set RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the parameters describe a usable search.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.expansion_threshold == 0 {
            return Err(SearchError::InvalidConfig(
                "expansion_threshold must be at least 1".into(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be a finite non-negative number, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.expansion_threshold, 2);
        assert!((config.exploration - 1.0).abs() < 1e-9);
        assert_eq!(config.epochs, 10_000);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_expansion_threshold(5)
            .with_exploration(1.4)
            .with_epochs(300)
            .with_seed(7);

        assert_eq!(config.expansion_threshold, 5);
        assert!((config.exploration - 1.4).abs() < 1e-9);
        assert_eq!(config.epochs, 300);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_play_config() {
        let config = MctsConfig::for_play();
        assert_eq!(config.expansion_threshold, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let config = MctsConfig::for_testing().with_expansion_threshold(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("expansion_threshold"));
    }

    #[test]
    fn test_validate_rejects_bad_exploration() {
        for c in [-0.5, f64::NAN, f64::INFINITY] {
            let config = MctsConfig::for_testing().with_exploration(c);
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("exploration"));
        }
    }
}
