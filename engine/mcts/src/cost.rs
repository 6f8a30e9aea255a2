//! Selection cost: the exploration bonus added to a child's mean value.
//!
//! The cost receives the *parent* node and the action leading to the child
//! being scored, so it can normalize by sibling totals.

use std::marker::PhantomData;

use engine_core::GameState;
use thiserror::Error;

use crate::tree::NodeView;

/// Errors raised by a selection cost.
#[derive(Debug, Error)]
pub enum CostError {
    #[error("Cost computation failed: {0}")]
    Failed(String),

    #[error("No child for action {0}")]
    UnknownAction(String),
}

/// Exploration bonus used during selection.
///
/// The selection score of a child is `mean_value(child) + cost(parent, action)`.
pub trait SelectCost<S: GameState>: Send + Sync {
    fn cost(&self, parent: NodeView<'_, S>, action: &S::Action) -> Result<f64, CostError>;
}

/// Upper-confidence-bound bonus:
/// `exploration * sqrt(ln(N) / n)` where `N` is the total visit count over
/// the parent's children and `n` the visit count of the scored child.
///
/// The parent's own visit count is not used: the root is never a selection
/// target, so its count does not track how often it was searched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UcbCost {
    pub exploration: f64,
}

impl UcbCost {
    pub fn new(exploration: f64) -> Self {
        Self { exploration }
    }
}

impl Default for UcbCost {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<S: GameState> SelectCost<S> for UcbCost {
    fn cost(&self, parent: NodeView<'_, S>, action: &S::Action) -> Result<f64, CostError> {
        let child = parent
            .child(action)
            .ok_or_else(|| CostError::UnknownAction(format!("{:?}", action)))?;

        let visits = child.visit_count();
        if visits == 0 {
            return Ok(f64::INFINITY);
        }

        let total = parent.child_visits_total() as f64;
        let log_total = total.ln().max(0.0);
        Ok(self.exploration * (log_total / f64::from(visits)).sqrt())
    }
}

/// Selection cost backed by a closure.
pub struct FnCost<S, F> {
    f: F,
    _state: PhantomData<fn(&S)>,
}

impl<S, F> FnCost<S, F>
where
    S: GameState,
    F: Fn(NodeView<'_, S>, &S::Action) -> Result<f64, CostError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _state: PhantomData,
        }
    }
}

impl<S, F> std::fmt::Debug for FnCost<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCost").finish_non_exhaustive()
    }
}

impl<S, F> SelectCost<S> for FnCost<S, F>
where
    S: GameState,
    F: Fn(NodeView<'_, S>, &S::Action) -> Result<f64, CostError> + Send + Sync,
{
    fn cost(&self, parent: NodeView<'_, S>, action: &S::Action) -> Result<f64, CostError> {
        (self.f)(parent, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MctsTree;
    use engine_core::Winner;

    #[derive(Debug, Clone, PartialEq)]
    struct Fork(u8);

    impl GameState for Fork {
        type Action = u8;

        fn actions(&self) -> Vec<u8> {
            vec![0, 1, 2]
        }

        fn updated(&self, action: &u8) -> Self {
            Fork(self.0 * 3 + action + 1)
        }

        fn finished(&self) -> bool {
            false
        }

        fn winner(&self) -> Option<Winner> {
            None
        }
    }

    fn tree_with_visits(visits: [u32; 3]) -> MctsTree<Fork> {
        let mut tree = MctsTree::new(Fork(0));
        tree.expand(tree.root()).unwrap();
        let children: Vec<_> = tree.get(tree.root()).children.clone();
        for ((_, id), n) in children.into_iter().zip(visits) {
            tree.get_mut(id).visit_count = n;
        }
        tree
    }

    #[test]
    fn test_ucb_bonus() {
        let tree = tree_with_visits([1, 3, 6]);
        let cost = UcbCost::new(1.4);
        let root = tree.view(tree.root());

        // N = 10 across the children
        let expected = 1.4 * ((10f64).ln() / 3.0).sqrt();
        let bonus = cost.cost(root, &1).unwrap();
        assert!((bonus - expected).abs() < 1e-9);

        // Less visited children get a larger bonus
        assert!(cost.cost(root, &0).unwrap() > cost.cost(root, &2).unwrap());
    }

    #[test]
    fn test_ucb_unvisited_child_is_infinite() {
        let tree = tree_with_visits([0, 2, 2]);
        let cost = UcbCost::default();

        assert_eq!(cost.cost(tree.view(tree.root()), &0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_ucb_single_visit_has_no_bonus() {
        // ln(1) = 0
        let tree = tree_with_visits([1, 0, 0]);
        let cost = UcbCost::new(2.0);

        assert_eq!(cost.cost(tree.view(tree.root()), &0).unwrap(), 0.0);
    }

    #[test]
    fn test_ucb_unknown_action() {
        let tree = tree_with_visits([1, 1, 1]);
        let err = UcbCost::default()
            .cost(tree.view(tree.root()), &9)
            .unwrap_err();
        assert!(matches!(err, CostError::UnknownAction(_)));
    }

    #[test]
    fn test_fn_cost_sees_siblings() {
        let tree = tree_with_visits([2, 3, 5]);
        let cost = FnCost::new(|parent: NodeView<'_, Fork>, _action: &u8| {
            Ok(parent.child_visits_total() as f64)
        });

        assert_eq!(cost.cost(tree.view(tree.root()), &0).unwrap(), 10.0);
    }
}
