//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! Parent links are plain indices, so the tree has a single owner and no
//! reference cycles. Advancing the root copies the retained subtree into a
//! fresh arena and drops everything else.

use std::collections::VecDeque;

use engine_core::GameState;
use rand::seq::{IteratorRandom, SliceRandom};
use rand_chacha::ChaCha20Rng;

use crate::cost::SelectCost;
use crate::node::{MctsNode, NodeId};
use crate::search::SearchError;

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct MctsTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S>>,

    /// Root node index (always 0 after construction or advancement)
    root: NodeId,
}

impl<S: GameState> MctsTree<S> {
    /// Create a new tree holding a single unexpanded root.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID. Panics if `id` is not in the tree.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Whether `id` names a node currently in the arena.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.is_some() && id.index() < self.nodes.len()
    }

    fn check(&self, id: NodeId) -> Result<(), SearchError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(SearchError::InvalidState(format!(
                "node {} is not in the tree",
                id.0
            )))
        }
    }

    /// Read-only view of a node, as handed to selection costs.
    #[inline]
    pub fn view(&self, id: NodeId) -> NodeView<'_, S> {
        NodeView { tree: self, id }
    }

    fn allocate(&mut self, node: MctsNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<S>] {
        &self.nodes
    }

    /// Whether the search should expand `id` when it reaches it.
    ///
    /// Only childless, unexpanded, unfinished nodes qualify. The root always
    /// does; any other node once it has been selected more than `threshold`
    /// times.
    ///
    /// The comparison is strict: a node needs `threshold + 1` selections, not
    /// `threshold`. A child is selected once in the epoch that creates it, so
    /// with `threshold = 1` a single epoch expands only the root and leaves
    /// every fresh child a leaf.
    pub fn is_expandable(&self, id: NodeId, threshold: u32) -> bool {
        let node = self.get(id);
        if node.has_children() || node.is_expanded() || node.state.finished() {
            return false;
        }
        node.is_root() || node.visit_count > threshold
    }

    /// Expand a node by adding one child per legal action.
    /// Returns the number of children created.
    pub fn expand(&mut self, id: NodeId) -> Result<usize, SearchError> {
        let node = self.get(id);
        if node.is_expanded() {
            return Err(SearchError::InvalidState(format!(
                "node {} is already expanded",
                id.0
            )));
        }

        let children: Vec<_> = node
            .state
            .actions()
            .into_iter()
            .map(|action| {
                let state = node.state.updated(&action);
                (action, MctsNode::new_child(id, state))
            })
            .collect();

        let mut links = Vec::with_capacity(children.len());
        for (action, child) in children {
            links.push((action, self.allocate(child)));
        }

        let count = links.len();
        let node = self.get_mut(id);
        node.children = links;
        node.expanded = true;
        Ok(count)
    }

    /// Pick a child of `id` to descend into and count the visit.
    ///
    /// Unvisited children come first, chosen uniformly. Once every child has
    /// been visited the score is `mean_value + cost`, ties broken uniformly.
    pub fn select<C>(
        &mut self,
        id: NodeId,
        cost: &C,
        rng: &mut ChaCha20Rng,
    ) -> Result<NodeId, SearchError>
    where
        C: SelectCost<S> + ?Sized,
    {
        self.check(id)?;
        let node = self.get(id);
        if !node.has_children() {
            return Err(SearchError::InvalidState(format!(
                "cannot select from childless node {}",
                id.0
            )));
        }

        let unvisited = node
            .children
            .iter()
            .map(|(_, child)| *child)
            .filter(|child| self.get(*child).visit_count == 0)
            .choose(rng);

        let chosen = match unvisited {
            Some(child) => child,
            None => {
                let parent = self.view(id);
                let mut best = Vec::new();
                let mut best_score = f64::NEG_INFINITY;

                for (action, child) in &node.children {
                    let score = self.get(*child).mean_value() + cost.cost(parent, action)?;
                    if score > best_score {
                        best_score = score;
                        best.clear();
                        best.push(*child);
                    } else if score == best_score {
                        best.push(*child);
                    }
                }

                *best.choose(rng).ok_or_else(|| {
                    SearchError::InvalidState(format!(
                        "no comparable selection score below node {}",
                        id.0
                    ))
                })?
            }
        };

        self.get_mut(chosen).visit_count += 1;
        Ok(chosen)
    }

    /// Add `score` to the value sum of `id` and every ancestor.
    /// Visit counts are left alone.
    pub fn backup(&mut self, id: NodeId, score: f64) -> Result<(), SearchError> {
        self.check(id)?;
        let mut current = id;
        while current.is_some() {
            let node = self.get_mut(current);
            node.value_sum += score;
            current = node.parent;
        }
        Ok(())
    }

    /// Make `new_root` the root and release every node outside its subtree.
    ///
    /// The retained subtree is renumbered in breadth-first order, so the new
    /// root is `NodeId(0)` and the arena holds nothing else. Ids taken
    /// before the call are stale afterwards.
    pub fn advance_root(&mut self, new_root: NodeId) -> Result<(), SearchError> {
        self.check(new_root)?;

        let mut old: Vec<Option<MctsNode<S>>> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(Some)
            .collect();
        let mut nodes = Vec::new();
        let mut queue = VecDeque::from([(new_root, NodeId::NONE)]);
        let mut next_id = 1u32;

        while let Some((old_id, parent)) = queue.pop_front() {
            let Some(mut node) = old[old_id.index()].take() else {
                continue;
            };
            let new_id = NodeId(nodes.len() as u32);
            node.parent = parent;
            for (_, child) in node.children.iter_mut() {
                queue.push_back((*child, new_id));
                *child = NodeId(next_id);
                next_id += 1;
            }
            nodes.push(node);
        }

        self.nodes = nodes;
        self.root = NodeId(0);
        Ok(())
    }

    /// Root child with the largest value sum; the first one wins ties.
    pub fn best_action_by_value(&self) -> Option<(S::Action, NodeId)> {
        let mut best: Option<(&S::Action, NodeId, f64)> = None;
        for (action, id) in &self.get(self.root).children {
            let value = self.get(*id).value_sum;
            if best.map_or(true, |(_, _, v)| value > v) {
                best = Some((action, *id, value));
            }
        }
        best.map(|(action, id, _)| (action.clone(), id))
    }

    /// Root child with the most visits; the first one wins ties.
    pub fn best_action_by_visits(&self) -> Option<(S::Action, u32)> {
        let mut best: Option<(&S::Action, u32)> = None;
        for (action, id) in &self.get(self.root).children {
            let visits = self.get(*id).visit_count;
            if best.map_or(true, |(_, v)| visits > v) {
                best = Some((action, visits));
            }
        }
        best.map(|(action, visits)| (action.clone(), visits))
    }

    /// Per-child statistics of the root, in action order.
    pub fn root_statistics(&self) -> Vec<ChildStats<S::Action>> {
        self.get(self.root)
            .children
            .iter()
            .map(|(action, id)| {
                let child = self.get(*id);
                ChildStats {
                    action: action.clone(),
                    visit_count: child.visit_count,
                    value_sum: child.value_sum,
                    mean_value: child.mean_value(),
                }
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.value_sum,
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}

/// Search statistics of one root child.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<A> {
    pub action: A,
    pub visit_count: u32,
    pub value_sum: f64,
    pub mean_value: f64,
}

/// Borrowed, read-only handle on a node and its neighbourhood.
pub struct NodeView<'a, S: GameState> {
    tree: &'a MctsTree<S>,
    id: NodeId,
}

impl<S: GameState> Clone for NodeView<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: GameState> Copy for NodeView<'_, S> {}

impl<S: GameState> std::fmt::Debug for NodeView<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeView")
            .field("id", &self.id)
            .field("visit_count", &self.visit_count())
            .field("value_sum", &self.value_sum())
            .finish()
    }
}

impl<'a, S: GameState> NodeView<'a, S> {
    #[inline]
    fn node(&self) -> &'a MctsNode<S> {
        self.tree.get(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn visit_count(&self) -> u32 {
        self.node().visit_count
    }

    pub fn value_sum(&self) -> f64 {
        self.node().value_sum
    }

    pub fn mean_value(&self) -> f64 {
        self.node().mean_value()
    }

    pub fn state(&self) -> &'a S {
        &self.node().state
    }

    pub fn parent(&self) -> Option<NodeView<'a, S>> {
        let parent = self.node().parent;
        parent.is_some().then(|| self.tree.view(parent))
    }

    pub fn children(&self) -> impl Iterator<Item = (&'a S::Action, NodeView<'a, S>)> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |(action, id)| (action, tree.view(*id)))
    }

    pub fn child(&self, action: &S::Action) -> Option<NodeView<'a, S>> {
        self.node().child(action).map(|id| self.tree.view(id))
    }

    /// Sum of the children's visit counts.
    pub fn child_visits_total(&self) -> u64 {
        self.node()
            .children
            .iter()
            .map(|(_, id)| u64::from(self.tree.get(*id).visit_count))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{CostError, FnCost, UcbCost};
    use engine_core::Winner;
    use rand::SeedableRng;

    /// Counts down to zero; `width` actions per ply, each subtracting 1.
    #[derive(Debug, Clone, PartialEq)]
    struct Countdown {
        left: u8,
        width: u8,
    }

    impl GameState for Countdown {
        type Action = u8;

        fn actions(&self) -> Vec<u8> {
            if self.left == 0 {
                Vec::new()
            } else {
                (0..self.width).collect()
            }
        }

        fn updated(&self, _action: &u8) -> Self {
            Self {
                left: self.left - 1,
                width: self.width,
            }
        }

        fn finished(&self) -> bool {
            self.left == 0
        }

        fn winner(&self) -> Option<Winner> {
            self.finished().then_some(Winner::Draw)
        }
    }

    fn tree(left: u8, width: u8) -> MctsTree<Countdown> {
        MctsTree::new(Countdown { left, width })
    }

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    #[test]
    fn test_new_tree() {
        let tree = tree(3, 2);

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId(0));
        assert!(tree.get(tree.root()).parent.is_none());
    }

    #[test]
    fn test_expand_creates_one_child_per_action() {
        let mut tree = tree(3, 3);
        let root = tree.root();

        assert_eq!(tree.expand(root).unwrap(), 3);
        assert_eq!(tree.len(), 4);

        let node = tree.get(root);
        assert!(node.is_expanded());
        for (action, child) in &node.children {
            let child = tree.get(*child);
            assert_eq!(child.parent, root);
            assert_eq!(child.state, node.state.updated(action));
            assert_eq!(child.visit_count, 0);
            assert_eq!(child.value_sum, 0.0);
            assert!(!child.is_expanded());
        }
        let actions: Vec<u8> = node.children.iter().map(|(a, _)| *a).collect();
        assert_eq!(actions, vec![0, 1, 2]);
    }

    #[test]
    fn test_expand_twice_fails() {
        let mut tree = tree(3, 2);
        tree.expand(tree.root()).unwrap();

        let err = tree.expand(tree.root()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidState(_)));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_expand_terminal_marks_expanded_without_children() {
        let mut tree = tree(0, 2);

        assert_eq!(tree.expand(tree.root()).unwrap(), 0);
        assert!(tree.get(tree.root()).is_expanded());
        assert!(!tree.get(tree.root()).has_children());
    }

    #[test]
    fn test_is_expandable() {
        let mut tree = tree(3, 2);
        let root = tree.root();

        // Fresh root is expandable regardless of visits
        assert!(tree.is_expandable(root, 5));
        tree.expand(root).unwrap();
        assert!(!tree.is_expandable(root, 5));

        let child = tree.get(root).children[0].1;
        tree.get_mut(child).visit_count = 1;
        assert!(!tree.is_expandable(child, 1));
        tree.get_mut(child).visit_count = 2;
        assert!(tree.is_expandable(child, 1));

        // Finished nodes never expand
        let mut done = self::tree(0, 2);
        done.get_mut(NodeId(0)).visit_count = 10;
        assert!(!done.is_expandable(NodeId(0), 1));
    }

    #[test]
    fn test_select_childless_fails() {
        let mut tree = tree(3, 2);
        let err = tree
            .select(tree.root(), &UcbCost::default(), &mut rng())
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidState(_)));
    }

    #[test]
    fn test_select_visits_every_child_first() {
        let mut tree = tree(3, 4);
        let root = tree.root();
        tree.expand(root).unwrap();
        let mut rng = rng();

        let mut picked = Vec::new();
        for _ in 0..4 {
            picked.push(tree.select(root, &UcbCost::default(), &mut rng).unwrap());
        }
        picked.sort_by_key(|id| id.0);
        picked.dedup();

        assert_eq!(picked.len(), 4);
        for (_, child) in &tree.get(root).children {
            assert_eq!(tree.get(*child).visit_count, 1);
        }
    }

    #[test]
    fn test_select_prefers_higher_score() {
        let mut tree = tree(3, 2);
        let root = tree.root();
        tree.expand(root).unwrap();
        let (a, b) = (tree.get(root).children[0].1, tree.get(root).children[1].1);

        tree.get_mut(a).visit_count = 4;
        tree.get_mut(a).value_sum = 4.0;
        tree.get_mut(b).visit_count = 4;
        tree.get_mut(b).value_sum = -4.0;

        // Zero exploration: pure exploitation
        let chosen = tree.select(root, &UcbCost::new(0.0), &mut rng()).unwrap();
        assert_eq!(chosen, a);
        assert_eq!(tree.get(a).visit_count, 5);
        assert_eq!(tree.get(b).visit_count, 4);
    }

    #[test]
    fn test_select_breaks_ties_randomly() {
        let mut tree = tree(3, 2);
        let root = tree.root();
        tree.expand(root).unwrap();
        let children: Vec<NodeId> = tree.get(root).children.iter().map(|(_, id)| *id).collect();
        for id in &children {
            tree.get_mut(*id).visit_count = 1;
        }

        let flat = FnCost::new(|_parent: NodeView<'_, Countdown>, _action: &u8| Ok(0.0));
        let mut rng = rng();
        let mut hits = [0u32; 2];
        for _ in 0..200 {
            let chosen = tree.select(root, &flat, &mut rng).unwrap();
            hits[children.iter().position(|id| *id == chosen).unwrap()] += 1;
            // Keep counts level so every round is a tie
            for id in &children {
                tree.get_mut(*id).visit_count = 1;
            }
        }

        assert!(hits[0] > 50 && hits[1] > 50, "hits = {:?}", hits);
    }

    #[test]
    fn test_select_propagates_cost_error() {
        let mut tree = tree(3, 2);
        let root = tree.root();
        tree.expand(root).unwrap();
        for (_, id) in tree.get(root).children.clone() {
            tree.get_mut(id).visit_count = 1;
        }

        let failing = FnCost::new(|_parent: NodeView<'_, Countdown>, _action: &u8| {
            Err(CostError::Failed("boom".into()))
        });
        let err = tree.select(root, &failing, &mut rng()).unwrap_err();
        assert!(matches!(err, SearchError::Cost(_)));
    }

    #[test]
    fn test_backup_touches_only_ancestors() {
        let mut tree = tree(3, 2);
        let root = tree.root();
        tree.expand(root).unwrap();
        let (left, right) = (tree.get(root).children[0].1, tree.get(root).children[1].1);
        tree.expand(left).unwrap();
        let grandchild = tree.get(left).children[1].1;

        tree.backup(grandchild, 0.5).unwrap();

        assert_eq!(tree.get(grandchild).value_sum, 0.5);
        assert_eq!(tree.get(left).value_sum, 0.5);
        assert_eq!(tree.get(root).value_sum, 0.5);
        assert_eq!(tree.get(right).value_sum, 0.0);
        assert_eq!(tree.get(tree.get(left).children[0].1).value_sum, 0.0);
        assert!(tree.arena().iter().all(|n| n.visit_count == 0));
    }

    #[test]
    fn test_advance_root_compacts_arena() {
        let mut tree = tree(4, 2);
        let root = tree.root();
        tree.expand(root).unwrap();
        let (keep, drop) = (tree.get(root).children[0].1, tree.get(root).children[1].1);
        tree.expand(keep).unwrap();
        tree.expand(drop).unwrap();
        let grandchild = tree.get(keep).children[1].1;
        tree.expand(grandchild).unwrap();
        tree.get_mut(grandchild).value_sum = 3.0;
        assert_eq!(tree.len(), 9);

        let kept_state = tree.get(keep).state.clone();
        tree.advance_root(keep).unwrap();

        // keep + its 2 children + grandchild's 2 children
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.root(), NodeId(0));
        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert_eq!(root.state, kept_state);

        let moved = root.children[1].1;
        assert_eq!(tree.get(moved).value_sum, 3.0);
        assert_eq!(tree.get(moved).children.len(), 2);
        for (id, node) in tree.arena().iter().enumerate().skip(1) {
            let parent = tree.get(node.parent);
            assert!(parent.children.iter().any(|(_, c)| c.0 as usize == id));
        }
    }

    #[test]
    fn test_advance_root_rejects_unknown_node() {
        let mut tree = tree(2, 2);
        assert!(tree.advance_root(NodeId(7)).is_err());
        assert!(tree.advance_root(NodeId::NONE).is_err());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_best_action_by_value_first_wins_ties() {
        let mut tree = tree(3, 3);
        let root = tree.root();
        tree.expand(root).unwrap();
        let ids: Vec<NodeId> = tree.get(root).children.iter().map(|(_, id)| *id).collect();
        tree.get_mut(ids[0]).value_sum = 1.0;
        tree.get_mut(ids[1]).value_sum = 2.0;
        tree.get_mut(ids[2]).value_sum = 2.0;

        assert_eq!(tree.best_action_by_value(), Some((1, ids[1])));
    }

    #[test]
    fn test_stale_ids_rejected_after_advance() {
        let mut tree = tree(3, 2);
        let root = tree.root();
        tree.expand(root).unwrap();
        let (keep, drop) = (tree.get(root).children[0].1, tree.get(root).children[1].1);
        tree.expand(drop).unwrap();
        let stale = tree.get(drop).children[1].1;
        assert_eq!(stale, NodeId(4));

        tree.advance_root(keep).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(stale));
        assert!(!tree.contains(NodeId::NONE));
        assert!(tree.contains(tree.root()));

        let err = tree.backup(stale, 1.0).unwrap_err();
        assert!(matches!(err, SearchError::InvalidState(_)));
        let err = tree
            .select(stale, &UcbCost::new(1.0), &mut rng())
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidState(_)));
        assert_eq!(tree.get(tree.root()).value_sum, 0.0);
    }

    #[test]
    fn test_value_sum_and_mean_value_pick_different_children() {
        let mut tree = tree(3, 2);
        let root = tree.root();
        tree.expand(root).unwrap();
        let (many, few) = (tree.get(root).children[0].1, tree.get(root).children[1].1);
        // many: sum 3.0 over 10 visits (mean 0.3), few: sum 2.0 over 2 (mean 1.0)
        tree.get_mut(many).visit_count = 10;
        tree.get_mut(many).value_sum = 3.0;
        tree.get_mut(few).visit_count = 2;
        tree.get_mut(few).value_sum = 2.0;

        assert_eq!(tree.best_action_by_value(), Some((0, many)));
        let chosen = tree.select(root, &UcbCost::new(0.0), &mut rng()).unwrap();
        assert_eq!(chosen, few);
    }

    #[test]
    fn test_best_action_by_visits() {
        let mut tree = tree(3, 3);
        let root = tree.root();
        assert!(tree.best_action_by_visits().is_none());

        tree.expand(root).unwrap();
        let ids: Vec<NodeId> = tree.get(root).children.iter().map(|(_, id)| *id).collect();
        tree.get_mut(ids[2]).visit_count = 9;

        assert_eq!(tree.best_action_by_visits(), Some((2, 9)));
    }

    #[test]
    fn test_root_statistics() {
        let mut tree = tree(3, 2);
        let root = tree.root();
        tree.expand(root).unwrap();
        let first = tree.get(root).children[0].1;
        tree.get_mut(first).visit_count = 2;
        tree.get_mut(first).value_sum = 1.0;

        let stats = tree.root_statistics();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].action, 0);
        assert_eq!(stats[0].visit_count, 2);
        assert!((stats[0].mean_value - 0.5).abs() < 1e-9);
        assert_eq!(stats[1].visit_count, 0);
    }

    #[test]
    fn test_node_view() {
        let mut tree = tree(3, 2);
        let root = tree.root();
        tree.expand(root).unwrap();
        let first = tree.get(root).children[0].1;
        tree.get_mut(first).visit_count = 3;

        let view = tree.view(root);
        assert!(view.parent().is_none());
        assert_eq!(view.children().count(), 2);
        assert_eq!(view.child_visits_total(), 3);

        let child = view.child(&0).unwrap();
        assert_eq!(child.id(), first);
        assert_eq!(child.visit_count(), 3);
        assert_eq!(child.parent().map(|p| p.id()), Some(root));
        assert_eq!(child.state().left, 2);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = tree(3, 2);
        tree.expand(tree.root()).unwrap();
        let first = tree.get(tree.root()).children[0].1;
        tree.expand(first).unwrap();

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 5);
        assert_eq!(stats.max_depth, 2);
    }
}
