use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use alloc::vec;

use crate::error::{Error, Result};
use crate::raw::{Handle, RawAvlTree, Side};

mod capacity;
mod order_statistic;

/// An ordered set of unique keys backed by an AVL tree.
///
/// Every node carries its subtree height, which keeps the tree within the AVL height bound
/// under any sequence of insertions and erasures, and its subtree size, which answers rank
/// and position queries in logarithmic time.
///
/// Besides the usual set operations, mutations and lookups report the *depth* of the node
/// involved: the number of edges from the root, with the root at depth 0.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the set.
///
/// # Examples
///
/// ```
/// use avl_set::{AvlSet, Error};
///
/// let mut set = AvlSet::new();
/// assert_eq!(set.insert(1), Ok(0));
/// assert_eq!(set.insert(2), Ok(1));
/// // Inserting 3 rotates 2 up to the root; 3 lands at depth 1.
/// assert_eq!(set.insert(3), Ok(1));
/// assert_eq!(set.insert(3), Err(Error::DuplicateKey));
///
/// assert_eq!(set.find(&2), Ok(0));
/// assert_eq!(set.erase(&2), Ok(0));
/// assert_eq!(set.find(&2), Err(Error::KeyNotFound));
/// assert_eq!(set.len(), 2);
/// ```
pub struct AvlSet<K> {
    raw: RawAvlTree<K>,
}

/// Alternative name for [`AvlSet`].
pub type BalancedOrderedSet<K> = AvlSet<K>;

/// The smallest or largest key of a subtree, and its depth in the whole set.
///
/// Returned by [`AvlSet::minimum`] and [`AvlSet::maximum`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Extremum<'a, K> {
    pub key: &'a K,
    /// Edges from the root of the set to the node holding `key`.
    pub depth: usize,
}

/// An iterator over the keys of an `AvlSet` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`AvlSet`].
///
/// [`iter`]: AvlSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K: 'a> {
    tree: &'a RawAvlTree<K>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the keys of an `AvlSet` in ascending order.
pub struct IntoIter<K> {
    inner: vec::IntoIter<K>,
}

impl<K> AvlSet<K> {
    /// Makes a new, empty `AvlSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let set: AvlSet<i32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlSet { raw: RawAvlTree::new() }
    }

    /// Returns the number of keys in the set. O(1).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no keys. O(1).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Height of the tree in edges: 0 for a single key, `None` when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let set: AvlSet<u32> = (0..7).collect();
    /// assert_eq!(set.height(), Some(2));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height()
    }

    /// Gets an iterator over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let set = AvlSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            tree: &self.raw,
            front: self.raw.first_handle(),
            back: self.raw.last_handle(),
            remaining: self.raw.len(),
        }
    }

    /// Returns the smallest key in the set, if any.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.raw.first_handle().map(|handle| &self.raw.node(handle).key)
    }

    /// Returns the largest key in the set, if any.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.raw.last_handle().map(|handle| &self.raw.node(handle).key)
    }
}

impl<K: Ord> AvlSet<K> {
    /// Returns the depth of the node holding `key`.
    ///
    /// A key at the root has depth 0; an absent key is reported as
    /// [`Error::KeyNotFound`], never as a depth. O(log n).
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is not in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::{AvlSet, Error};
    ///
    /// let set = AvlSet::from([10, 5, 15]);
    /// assert_eq!(set.find(&10), Ok(0));
    /// assert_eq!(set.find(&15), Ok(1));
    /// assert_eq!(set.find(&42), Err(Error::KeyNotFound));
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if the set contains `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).is_some()
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Adds `key` to the set and returns the depth at which it ends up once the tree has
    /// been rebalanced. O(log n).
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if the set already holds `key`; the set is left unchanged and
    /// `key` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::{AvlSet, Error};
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.insert(38), Ok(0));
    /// assert_eq!(set.insert(58), Ok(1));
    /// assert_eq!(set.insert(38), Err(Error::DuplicateKey));
    /// ```
    pub fn insert(&mut self, key: K) -> Result<usize> {
        self.raw.insert(key).ok_or(Error::DuplicateKey)
    }

    /// Removes `key` from the set and returns the depth its node held before the tree was
    /// restructured. O(log n).
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is not in the set, including when the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::{AvlSet, Error};
    ///
    /// let mut set = AvlSet::from([10, 5, 15]);
    /// assert_eq!(set.erase(&10), Ok(0));
    /// assert_eq!(set.find(&15), Ok(0));
    /// assert_eq!(set.find(&5), Ok(1));
    /// assert_eq!(set.erase(&10), Err(Error::KeyNotFound));
    /// ```
    pub fn erase<Q>(&mut self, key: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).map(|(_, depth)| depth).ok_or(Error::KeyNotFound)
    }

    /// Removes and returns the key equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let mut set = AvlSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).map(|(removed, _)| removed)
    }

    /// Treats the node holding `key` as the root of a subtree and returns that subtree's
    /// smallest key, with its depth measured from the root of the whole set.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no node holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::{AvlSet, Extremum};
    ///
    /// let set = AvlSet::from([20, 10, 30, 25, 40]);
    /// assert_eq!(set.minimum(&30), Ok(Extremum { key: &25, depth: 2 }));
    /// assert_eq!(set.minimum(&20), Ok(Extremum { key: &10, depth: 1 }));
    /// ```
    pub fn minimum<Q>(&self, key: &Q) -> Result<Extremum<'_, K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.subtree_extreme(key, Side::Left)
    }

    /// Treats the node holding `key` as the root of a subtree and returns that subtree's
    /// largest key, with its depth measured from the root of the whole set.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no node holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::{AvlSet, Error, Extremum};
    ///
    /// let set = AvlSet::from([20, 10, 30, 25, 40]);
    /// assert_eq!(set.maximum(&20), Ok(Extremum { key: &40, depth: 2 }));
    /// assert_eq!(set.maximum(&99), Err(Error::KeyNotFound));
    /// ```
    pub fn maximum<Q>(&self, key: &Q) -> Result<Extremum<'_, K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.subtree_extreme(key, Side::Right)
    }

    fn subtree_extreme<Q>(&self, key: &Q, side: Side) -> Result<Extremum<'_, K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw
            .subtree_extreme(key, side)
            .map(|(key, depth)| Extremum { key, depth })
            .ok_or(Error::KeyNotFound)
    }
}

impl<K: Clone> Clone for AvlSet<K> {
    /// Deep copy: the clone owns new nodes with the same keys in the same shape.
    fn clone(&self) -> Self {
        AvlSet { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Default for AvlSet<K> {
    fn default() -> Self {
        AvlSet::new()
    }
}

impl<K: PartialEq> PartialEq for AvlSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for AvlSet<K> {}

impl<K: Hash> Hash for AvlSet<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for key in self {
            key.hash(state);
        }
    }
}

/// Duplicates in the input are skipped.
impl<K: Ord> FromIterator<K> for AvlSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord> Extend<K> for AvlSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            // Already-present keys are ignored, as in `BTreeSet`.
            let _ = self.insert(key);
        }
    }
}

impl<'a, K: 'a + Ord + Copy> Extend<&'a K> for AvlSet<K> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for AvlSet<K> {
    /// Inserts the keys in array order, so the resulting shape depends on that order.
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K> IntoIterator for AvlSet<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> IntoIter<K> {
        IntoIter {
            inner: self.raw.into_sorted_vec().into_iter(),
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlSet<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.front?;
        self.remaining -= 1;
        self.front = tree.step(handle, Side::Right);
        Some(&tree.node(handle).key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.back?;
        self.remaining -= 1;
        self.back = tree.step(handle, Side::Left);
        Some(&tree.node(handle).key)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K: fmt::Debug> fmt::Debug for IntoIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
