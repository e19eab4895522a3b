use super::AvlSet;
use crate::raw::RawAvlTree;

impl<K> AvlSet<K> {
    /// Creates an empty set whose node arena has room for at least `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let set: AvlSet<i32> = AvlSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlSet {
            raw: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns how many keys the set can hold before its node arena reallocates.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
