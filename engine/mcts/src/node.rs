//! MCTS tree node representation.
//!
//! Each node holds the game state reached by taking an action from the parent.
//! Nodes store the visit statistics used for selection and move choice.

use engine_core::GameState;

/// Index into the node arena. Using a newtype for type safety.
///
/// Ids are only valid until the root advances: the arena is compacted and
/// renumbered, so an old id may point past the end or at an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S: GameState> {
    /// Parent node index (NONE for root). Never an ownership relation.
    pub parent: NodeId,

    /// Game state snapshot at this node
    pub state: S,

    /// Number of times this node was chosen by its parent's selection
    pub visit_count: u32,

    /// Sum of scores backed up through this node.
    /// Mean value = value_sum / visit_count
    pub value_sum: f64,

    /// Children: (action, NodeId) pairs in the order `actions()` produced them.
    /// Empty until node is expanded.
    pub children: Vec<(S::Action, NodeId)>,

    /// Set once by expansion, never cleared
    pub expanded: bool,
}

impl<S: GameState> MctsNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Self {
        Self::new_child(NodeId::NONE, state)
    }

    /// Create a new, unvisited child node.
    pub fn new_child(parent: NodeId, state: S) -> Self {
        Self {
            parent,
            state,
            visit_count: 0,
            value_sum: 0.0,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Mean value = value_sum / visit_count.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f64
        }
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node is the current root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Look up the child reached by `action`.
    pub fn child(&self, action: &S::Action) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, id)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Winner;

    #[derive(Debug, Clone, PartialEq)]
    struct Stub(u8);

    impl GameState for Stub {
        type Action = u8;

        fn actions(&self) -> Vec<u8> {
            vec![0, 1]
        }

        fn updated(&self, action: &u8) -> Self {
            Stub(self.0 + action)
        }

        fn finished(&self) -> bool {
            false
        }

        fn winner(&self) -> Option<Winner> {
            None
        }
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(Stub(3));

        assert!(node.parent.is_none());
        assert!(node.is_root());
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.value_sum, 0.0);
        assert!(!node.is_expanded());
        assert!(node.children.is_empty());
        assert_eq!(node.state, Stub(3));
    }

    #[test]
    fn test_mean_value() {
        let mut node = MctsNode::new_root(Stub(0));

        // Unvisited
        assert!(node.mean_value().abs() < 1e-9);

        // After visits
        node.visit_count = 4;
        node.value_sum = -2.0;
        assert!((node.mean_value() + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_child_lookup() {
        let mut node = MctsNode::new_root(Stub(0));
        node.children.push((0, NodeId(1)));
        node.children.push((1, NodeId(2)));

        assert_eq!(node.child(&1), Some(NodeId(2)));
        assert_eq!(node.child(&7), None);
        assert!(node.has_children());
    }
}
