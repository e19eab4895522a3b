use super::handle::Handle;

/// Which child slot of a node a link occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree node augmented with its subtree height and size.
///
/// `parent` is a back-reference only; the arena owns the node.
pub(crate) struct AvlNode<K> {
    pub(crate) key: K,
    // Edges on the longest downward path; a leaf is 0.
    height: u8,
    // Nodes in the subtree rooted here, including this one.
    size: usize,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K> AvlNode<K> {
    /// A detached leaf.
    pub(crate) const fn leaf(key: K, parent: Option<Handle>) -> Self {
        Self {
            key,
            height: 0,
            size: 1,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    /// Stores the augmentation computed from the children.
    pub(crate) fn set_metrics(&mut self, height: u8, size: usize) {
        self.height = height;
        self.size = size;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns the side on which `child` hangs, if it is a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Copies key and augmentation under a new parent, without children.
    pub(crate) fn detached_clone(&self, parent: Option<Handle>) -> Self
    where
        K: Clone,
    {
        Self {
            key: self.key.clone(),
            height: self.height,
            size: self.size,
            parent,
            left: None,
            right: None,
        }
    }
}
