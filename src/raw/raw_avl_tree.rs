use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{AvlNode, Side};

/// The AVL engine backing `AvlSet`.
pub(crate) struct RawAvlTree<K> {
    /// Arena owning every node; links between nodes are handles into it.
    nodes: Arena<AvlNode<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of live keys. Always equals the root's subtree size.
    len: usize,
}

/// Outcome of a root-to-leaf descent.
pub(crate) enum SearchResult {
    /// The key is held by `node`, which sits at `depth`.
    Found { node: Handle, depth: usize },
    /// The key is absent. `parent` is the empty slot a new leaf would fill, and `depth` is
    /// the depth of the last node examined (0 for an empty tree).
    NotFound { parent: Option<(Handle, Side)>, depth: usize },
}

/// The four restructuring shapes, named after the path from the unbalanced node to its
/// taller grandchild.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Rotation {
    LeftLeft,
    LeftRight,
    RightLeft,
    RightRight,
}

impl Rotation {
    /// Picks the shape from the heavy side of `z` and the balance factor of its taller child.
    /// A balanced child takes the single rotation.
    fn select(heavy: Side, child_balance: i32) -> Self {
        match heavy {
            Side::Left if child_balance >= 0 => Rotation::LeftLeft,
            Side::Left => Rotation::LeftRight,
            Side::Right if child_balance <= 0 => Rotation::RightRight,
            Side::Right => Rotation::RightLeft,
        }
    }
}

impl<K> RawAvlTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Height of the root, or `None` for an empty tree.
    pub(crate) fn height(&self) -> Option<usize> {
        self.root.map(|root| usize::from(self.node(root).height()))
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &AvlNode<K> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut AvlNode<K> {
        self.nodes.get_mut(handle)
    }

    /// Height of a possibly absent subtree; an empty subtree is -1.
    #[inline]
    fn height_of(&self, link: Option<Handle>) -> i32 {
        link.map_or(-1, |handle| i32::from(self.node(handle).height()))
    }

    #[inline]
    fn size_of(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |handle| self.node(handle).size())
    }

    /// `height(left) - height(right)`.
    fn balance_factor(&self, handle: Handle) -> i32 {
        let node = self.node(handle);
        self.height_of(node.left()) - self.height_of(node.right())
    }

    /// Recomputes height and size of `handle` from its children.
    fn update(&mut self, handle: Handle) {
        let node = self.node(handle);
        let (left, right) = (node.left(), node.right());
        // Non-negative: the larger of two heights that are each at least -1, plus one.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let height = (1 + self.height_of(left).max(self.height_of(right))) as u8;
        let size = 1 + self.size_of(left) + self.size_of(right);
        self.node_mut(handle).set_metrics(height, size);
    }

    /// Counts parent links from `handle` up to the root.
    pub(crate) fn depth_of(&self, handle: Handle) -> usize {
        let mut depth = 0;
        let mut current = handle;
        while let Some(parent) = self.node(current).parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Follows `side` links from `handle` as far as they go.
    pub(crate) fn extreme(&self, handle: Handle, side: Side) -> Handle {
        let mut current = handle;
        while let Some(next) = self.node(current).child(side) {
            current = next;
        }
        current
    }

    pub(crate) fn first_handle(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    pub(crate) fn last_handle(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// In-order neighbour of `handle`: the successor for `Side::Right`, the predecessor for
    /// `Side::Left`.
    pub(crate) fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = handle;
        while let Some(parent) = self.node(current).parent() {
            if self.node(parent).child(side) != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// The parent slot holding `handle`, or `None` if it is the root.
    fn slot_of(&self, handle: Handle) -> Option<(Handle, Side)> {
        let parent = self.node(handle).parent()?;
        let side = self
            .node(parent)
            .side_of(handle)
            .expect("`RawAvlTree::slot_of()` - parent does not link back to child!");
        Some((parent, side))
    }

    /// Puts `child` into `slot` (the root slot when `None`) and points it back at its parent.
    fn relink(&mut self, slot: Option<(Handle, Side)>, child: Option<Handle>) {
        match slot {
            Some((parent, side)) => self.node_mut(parent).set_child(side, child),
            None => self.root = child,
        }
        if let Some(child) = child {
            self.node_mut(child).set_parent(slot.map(|(parent, _)| parent));
        }
    }

    /// Single rotation lifting the child of `z` on the `heavy` side into `z`'s place.
    ///
    /// The lifted child's inner subtree moves across to `z`. Returns the new subtree root.
    fn rotate(&mut self, z: Handle, heavy: Side) -> Handle {
        let y = self
            .node(z)
            .child(heavy)
            .expect("`RawAvlTree::rotate()` - heavy side has no child!");
        let inner = self.node(y).child(heavy.opposite());
        let slot = self.slot_of(z);

        self.node_mut(z).set_child(heavy, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(z));
        }

        self.relink(slot, Some(y));
        self.node_mut(y).set_child(heavy.opposite(), Some(z));
        self.node_mut(z).set_parent(Some(y));

        self.update(z);
        self.update(y);
        y
    }

    /// Restores balance at `z`, whose balance factor has magnitude 2. Returns the new root of
    /// the restructured subtree.
    fn restructure(&mut self, z: Handle, phase: &'static str) -> Handle {
        let heavy = if self.balance_factor(z) > 0 { Side::Left } else { Side::Right };
        let y = self
            .node(z)
            .child(heavy)
            .expect("`RawAvlTree::restructure()` - heavy side has no child!");
        let rotation = Rotation::select(heavy, self.balance_factor(y));
        trace!(?rotation, phase, "restructuring subtree");

        match rotation {
            Rotation::LeftLeft => self.rotate(z, Side::Left),
            Rotation::RightRight => self.rotate(z, Side::Right),
            Rotation::LeftRight => {
                self.rotate(y, Side::Right);
                self.rotate(z, Side::Left)
            }
            Rotation::RightLeft => {
                self.rotate(y, Side::Left);
                self.rotate(z, Side::Right)
            }
        }
    }

    /// Walks from the new leaf's parent to the root, updating metrics. The first node found
    /// out of balance is restructured; a single restructuring restores the whole path.
    fn rebalance_after_insert(&mut self, leaf: Handle) {
        let mut restructured = false;
        let mut current = self.node(leaf).parent();

        while let Some(handle) = current {
            self.update(handle);
            let top = if !restructured && self.balance_factor(handle).abs() >= 2 {
                restructured = true;
                self.restructure(handle, "insert")
            } else {
                handle
            };
            current = self.node(top).parent();
        }
    }

    /// Walks from `start` to the root, updating metrics and restructuring every node found
    /// out of balance. Unlike insertion, several restructurings may be needed.
    fn rebalance_after_erase(&mut self, start: Option<Handle>) {
        let mut rotations = 0_usize;
        let mut current = start;

        while let Some(handle) = current {
            self.update(handle);
            let top = if self.balance_factor(handle).abs() >= 2 {
                rotations += 1;
                self.restructure(handle, "erase")
            } else {
                handle
            };
            current = self.node(top).parent();
        }

        if rotations > 1 {
            debug!(rotations, "erase restructured more than one subtree");
        }
    }

    /// Consumes the tree, returning its keys in ascending order.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<K> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first_handle();
        while let Some(handle) = current {
            order.push(handle);
            current = self.step(handle, Side::Right);
        }

        let keys = order.into_iter().map(|handle| self.nodes.take(handle).key).collect();
        self.root = None;
        self.len = 0;
        keys
    }
}

impl<K: Ord> RawAvlTree<K> {
    /// Descends from the root comparing `key` at each node.
    pub(crate) fn search<Q>(&self, key: &Q) -> SearchResult
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut slot = None;
        let mut depth = 0;

        while let Some(handle) = current {
            let node = self.node(handle);
            let side = match key.cmp(node.key.borrow()) {
                Ordering::Equal => return SearchResult::Found { node: handle, depth },
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            slot = Some((handle, side));
            current = node.child(side);
            if current.is_some() {
                depth += 1;
            }
        }

        SearchResult::NotFound { parent: slot, depth }
    }

    /// Depth of the node holding `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.search(key) {
            SearchResult::Found { depth, .. } => Some(depth),
            SearchResult::NotFound { .. } => None,
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.search(key) {
            SearchResult::Found { node, .. } => Some(&self.node(node).key),
            SearchResult::NotFound { .. } => None,
        }
    }

    /// The extreme key on `side` of the subtree rooted at the node holding `key`, with its
    /// depth measured from the tree's root.
    pub(crate) fn subtree_extreme<Q>(&self, key: &Q, side: Side) -> Option<(&K, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let SearchResult::Found { node, .. } = self.search(key) else {
            return None;
        };
        let extreme = self.extreme(node, side);
        Some((&self.node(extreme).key, self.depth_of(extreme)))
    }

    /// Inserts `key` as a new leaf and rebalances. Returns the depth of the new node after
    /// rebalancing, or `None` if the key was already present.
    pub(crate) fn insert(&mut self, key: K) -> Option<usize> {
        let slot = match self.search(&key) {
            SearchResult::Found { .. } => return None,
            SearchResult::NotFound { parent, .. } => parent,
        };

        let leaf = self.nodes.alloc(AvlNode::leaf(key, None));
        self.relink(slot, Some(leaf));
        self.len += 1;

        self.rebalance_after_insert(leaf);
        debug_assert_eq!(self.size_of(self.root), self.len);
        Some(self.depth_of(leaf))
    }

    /// Removes `key`. Returns the removed key and the depth its node held before any
    /// restructuring, or `None` if the key is absent.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let SearchResult::Found { node, depth } = self.search(key) else {
            return None;
        };

        let (left, right) = (self.node(node).left(), self.node(node).right());
        let (removed, rebalance_from) = match (left, right) {
            (Some(_), Some(right)) => {
                trace!(shape = "two_children", depth, "erasing node");
                // The successor has no left child; its right child takes its slot.
                let successor = self.extreme(right, Side::Left);
                let slot = self.slot_of(successor);
                let orphan = self.node(successor).right();
                self.relink(slot, orphan);

                let successor = self.nodes.take(successor);
                let successor_parent = successor.parent();
                let removed = mem::replace(&mut self.node_mut(node).key, successor.key);
                (removed, successor_parent)
            }
            (child, None) | (None, child) => {
                let shape = if child.is_some() { "one_child" } else { "leaf" };
                trace!(shape, depth, "erasing node");
                let slot = self.slot_of(node);
                self.relink(slot, child);
                (self.nodes.take(node).key, slot.map(|(parent, _)| parent))
            }
        };

        self.len -= 1;
        self.rebalance_after_erase(rebalance_from);
        debug_assert_eq!(self.size_of(self.root), self.len);
        Some((removed, depth))
    }

    /// Number of keys strictly less than `key`, summing left-subtree sizes along the
    /// search path.
    pub(crate) fn count_less<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut less = 0;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.node(handle);
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return less + self.size_of(node.left()),
                Ordering::Greater => {
                    less += self.size_of(node.left()) + 1;
                    current = node.right();
                }
            }
        }
        less
    }

    /// The key at zero-based `position` in ascending order.
    pub(crate) fn select(&self, position: usize) -> Option<&K> {
        if position >= self.len {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = position;
        loop {
            let node = self.node(current);
            let left = self.size_of(node.left());
            match remaining.cmp(&left) {
                Ordering::Less => current = node.left()?,
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => {
                    remaining -= left + 1;
                    current = node.right()?;
                }
            }
        }
    }
}

impl<K: Clone> Clone for RawAvlTree<K> {
    /// Copies every node into a fresh, compacted arena with the same shape.
    fn clone(&self) -> Self {
        let mut nodes = Arena::with_capacity(self.len);
        let root = self.root.map(|source_root| {
            let target_root = nodes.alloc(self.node(source_root).detached_clone(None));
            let mut pending: SmallVec<[(Handle, Handle); 32]> = smallvec![(source_root, target_root)];

            while let Some((source, target)) = pending.pop() {
                for side in [Side::Left, Side::Right] {
                    if let Some(source_child) = self.node(source).child(side) {
                        let target_child = nodes.alloc(self.node(source_child).detached_clone(Some(target)));
                        nodes.get_mut(target).set_child(side, Some(target_child));
                        pending.push((source_child, target_child));
                    }
                }
            }
            target_root
        });

        Self {
            nodes,
            root,
            len: self.len,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::uninlined_format_args, clippy::cast_possible_wrap)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use core::fmt::Debug;
    use proptest::prelude::*;

    impl<K: Ord + Debug> RawAvlTree<K> {
        /// Checks ordering, balance, height, size and parent links of every node, plus the
        /// element count. Panics listing every violation found.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            let Some(root) = self.root else {
                assert_eq!(self.len, 0, "empty tree should have len 0");
                assert_eq!(self.nodes.len(), 0, "empty tree should hold no nodes");
                return;
            };

            if self.node(root).parent().is_some() {
                errors.push(String::from("root has a parent"));
            }
            let (_, size) = self.validate_node(root, None, None, &mut errors);
            if size != self.len {
                errors.push(format!("len mismatch: len={}, counted={}", self.len, size));
            }
            if self.nodes.len() != self.len {
                errors.push(format!("arena holds {} nodes for len {}", self.nodes.len(), self.len));
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        /// Returns the recomputed `(height, size)` of the subtree at `handle`.
        fn validate_node(
            &self,
            handle: Handle,
            lower: Option<&K>,
            upper: Option<&K>,
            errors: &mut Vec<String>,
        ) -> (i32, usize) {
            let node = self.node(handle);

            if lower.is_some_and(|lower| node.key <= *lower) || upper.is_some_and(|upper| node.key >= *upper) {
                errors.push(format!("{:?} is outside ({:?}, {:?})", node.key, lower, upper));
            }

            let mut child_metrics = [(-1, 0); 2];
            for (index, side) in [Side::Left, Side::Right].into_iter().enumerate() {
                if let Some(child) = node.child(side) {
                    if self.node(child).parent() != Some(handle) {
                        errors.push(format!("{:?} child of {:?} does not point back", side, node.key));
                    }
                    let (lower, upper) = match side {
                        Side::Left => (lower, Some(&node.key)),
                        Side::Right => (Some(&node.key), upper),
                    };
                    child_metrics[index] = self.validate_node(child, lower, upper, errors);
                }
            }

            let [(left_height, left_size), (right_height, right_size)] = child_metrics;
            let height = 1 + left_height.max(right_height);
            let size = 1 + left_size + right_size;

            if (left_height - right_height).abs() > 1 {
                errors.push(format!("{:?} has balance factor {}", node.key, left_height - right_height));
            }
            if i32::from(node.height()) != height {
                errors.push(format!("{:?} stores height {}, actual {}", node.key, node.height(), height));
            }
            if node.size() != size {
                errors.push(format!("{:?} stores size {}, actual {}", node.key, node.size(), size));
            }

            (height, size)
        }

        /// Keys in pre-order, for asserting exact shapes.
        fn preorder(&self) -> Vec<&K> {
            let mut keys = Vec::new();
            let mut pending: Vec<Handle> = self.root.into_iter().collect();
            while let Some(handle) = pending.pop() {
                let node = self.node(handle);
                keys.push(&node.key);
                pending.extend(node.right());
                pending.extend(node.left());
            }
            keys
        }
    }

    fn tree_from(keys: &[i32]) -> RawAvlTree<i32> {
        let mut tree = RawAvlTree::new();
        for &key in keys {
            tree.insert(key);
            tree.validate_invariants();
        }
        tree
    }

    #[test]
    fn rotation_selection() {
        assert_eq!(Rotation::select(Side::Left, 1), Rotation::LeftLeft);
        assert_eq!(Rotation::select(Side::Left, 0), Rotation::LeftLeft);
        assert_eq!(Rotation::select(Side::Left, -1), Rotation::LeftRight);
        assert_eq!(Rotation::select(Side::Right, -1), Rotation::RightRight);
        assert_eq!(Rotation::select(Side::Right, 0), Rotation::RightRight);
        assert_eq!(Rotation::select(Side::Right, 1), Rotation::RightLeft);
    }

    #[test]
    fn each_insert_rotation_case_yields_the_middle_key_as_root() {
        for keys in [[3, 2, 1], [1, 2, 3], [3, 1, 2], [1, 3, 2]] {
            let tree = tree_from(&keys);
            assert_eq!(tree.preorder(), vec![&2, &1, &3], "inserting {:?}", keys);
            assert_eq!(tree.height(), Some(1));
        }
    }

    #[test]
    fn double_rotation_moves_grandchild_subtrees() {
        // 50 has left child 20, whose right child 40 is the taller grandchild.
        let mut tree = tree_from(&[50, 20, 60, 10, 40, 70, 30, 45]);
        // Removing 70 leaves 50 left-heavy with a right-heavy left child.
        tree.remove(&70);
        tree.validate_invariants();
        assert_eq!(tree.preorder(), vec![&40, &20, &10, &30, &50, &45, &60]);
    }

    #[test]
    fn insert_reports_depth_after_rebalancing() {
        let mut tree = RawAvlTree::new();
        assert_eq!(tree.insert(1), Some(0));
        assert_eq!(tree.insert(2), Some(1));
        assert_eq!(tree.insert(3), Some(1));
        assert_eq!(tree.insert(2), None);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn search_reports_depth_of_last_node_on_miss() {
        let tree = tree_from(&[20, 10, 30, 5]);
        assert!(matches!(tree.search(&5), SearchResult::Found { depth: 2, .. }));
        assert!(matches!(tree.search(&4), SearchResult::NotFound { depth: 2, parent: Some((_, Side::Left)) }));
        assert!(matches!(tree.search(&35), SearchResult::NotFound { depth: 1, parent: Some((_, Side::Right)) }));

        let empty: RawAvlTree<i32> = RawAvlTree::new();
        assert!(matches!(empty.search(&1), SearchResult::NotFound { depth: 0, parent: None }));
    }

    #[test]
    fn erase_leaf() {
        let mut tree = tree_from(&[2, 1, 3]);
        assert_eq!(tree.remove(&3), Some((3, 1)));
        tree.validate_invariants();
        assert_eq!(tree.preorder(), vec![&2, &1]);
    }

    #[test]
    fn erase_node_with_one_child() {
        let mut tree = tree_from(&[2, 1, 3, 4]);
        assert_eq!(tree.remove(&3), Some((3, 1)));
        tree.validate_invariants();
        assert_eq!(tree.preorder(), vec![&2, &1, &4]);
    }

    #[test]
    fn erase_node_with_two_children_takes_successor_key() {
        let mut tree = tree_from(&[20, 10, 30, 25, 40]);
        assert_eq!(tree.remove(&20), Some((20, 0)));
        tree.validate_invariants();
        assert_eq!(tree.preorder(), vec![&25, &10, &30, &40]);
    }

    #[test]
    fn erase_last_key_empties_tree() {
        let mut tree = tree_from(&[7]);
        assert_eq!(tree.remove(&7), Some((7, 0)));
        tree.validate_invariants();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), None);
        assert_eq!(tree.remove(&7), None);
    }

    #[test]
    fn erase_rebalances_all_the_way_to_the_root() {
        // Fibonacci-shaped tree: removing the shallowest leaf on the short side forces a
        // restructuring at two levels.
        let mut tree = tree_from(&[8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1]);
        assert_eq!(tree.height(), Some(4));
        assert_eq!(tree.remove(&12), Some((12, 2)));
        tree.validate_invariants();
        assert_eq!(tree.height(), Some(3));
        assert_eq!(tree.find(&5), Some(0));
    }

    #[test]
    fn neighbours_walk_parent_links() {
        let tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        let mut forward = Vec::new();
        let mut current = tree.first_handle();
        while let Some(handle) = current {
            forward.push(tree.node(handle).key);
            current = tree.step(handle, Side::Right);
        }
        assert_eq!(forward, vec![1, 2, 3, 4, 5, 6, 7]);

        let mut backward = Vec::new();
        let mut current = tree.last_handle();
        while let Some(handle) = current {
            backward.push(tree.node(handle).key);
            current = tree.step(handle, Side::Left);
        }
        assert_eq!(backward, vec![7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn clone_is_compacted_and_shape_preserving() {
        let mut tree = tree_from(&[10, 5, 15, 3, 7, 12, 20, 1]);
        tree.remove(&7);
        tree.remove(&12);

        let copy = tree.clone();
        copy.validate_invariants();
        assert_eq!(copy.preorder(), tree.preorder());
        assert_eq!(copy.nodes.len(), copy.len());

        tree.insert(100);
        assert_eq!(copy.find(&100), None);
    }

    #[test]
    fn into_sorted_vec_drains_in_order() {
        let tree = tree_from(&[5, 1, 4, 2, 3]);
        assert_eq!(tree.into_sorted_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0i32..1000).prop_map(Op::Insert),
            2 => (0i32..1000).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut tree: RawAvlTree<i32> = RawAvlTree::new();
            let mut model = alloc::collections::BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        prop_assert_eq!(tree.insert(key).is_some(), model.insert(key));
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(tree.remove(&key).map(|(removed, _)| removed), model.take(&key));
                    }
                }
                tree.validate_invariants();
            }
        }

        #[test]
        fn depth_matches_parent_walk(keys in prop::collection::vec(0i32..500, 1..200)) {
            let mut tree = RawAvlTree::new();
            for &key in &keys {
                if let Some(depth) = tree.insert(key) {
                    prop_assert_eq!(tree.find(&key), Some(depth));
                }
            }
            for key in &keys {
                let SearchResult::Found { node, depth } = tree.search(key) else {
                    panic!("inserted key {} is missing", key);
                };
                prop_assert_eq!(tree.depth_of(node), depth);
            }
        }

        #[test]
        fn count_less_and_select_agree_with_sorted_order(keys in prop::collection::vec(0i32..500, 1..200)) {
            let tree = tree_from(&keys);
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            sorted.dedup();

            for (position, key) in sorted.iter().enumerate() {
                prop_assert_eq!(tree.count_less(key), position);
                prop_assert_eq!(tree.select(position), Some(key));
            }
            prop_assert_eq!(tree.select(sorted.len()), None);
            for probe in -1..=501 {
                let expected = sorted.iter().filter(|&&key| key < probe).count();
                prop_assert_eq!(tree.count_less(&probe), expected);
            }
        }
    }
}
