use core::borrow::Borrow;
use core::ops::Index;

use super::AvlSet;
use crate::{Position, RankReport};

impl<K: Ord> AvlSet<K> {
    /// Reports the rank of `key`: one more than the number of keys in the set strictly less
    /// than it. The key need not be present; its depth is reported when it is.
    ///
    /// # Complexity
    ///
    /// O(log n), using the subtree sizes kept on every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::{AvlSet, RankReport};
    ///
    /// let set = AvlSet::from([38, 58, 31, 27]);
    /// assert_eq!(set.rank(&38), RankReport { depth: Some(0), rank: 3 });
    /// assert_eq!(set.rank(&1), RankReport { depth: None, rank: 1 });
    /// assert_eq!(set.rank(&100), RankReport { depth: None, rank: 5 });
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> RankReport
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        RankReport {
            depth: self.raw.find(key),
            rank: self.raw.count_less(key) + 1,
        }
    }

    /// Returns how many keys in the set are strictly less than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn count_less<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count_less(key)
    }

    /// Returns the key at zero-based `position` in ascending order, or `None` if `position`
    /// is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_set::AvlSet;
    ///
    /// let set = AvlSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_position(1), Some(&20));
    /// assert_eq!(set.get_by_position(3), None);
    /// ```
    #[must_use]
    pub fn get_by_position(&self, position: usize) -> Option<&K> {
        self.raw.select(position)
    }
}

/// Indexes into the set by ascending position.
///
/// # Panics
///
/// Panics if the position is out of bounds.
impl<K: Ord> Index<Position> for AvlSet<K> {
    type Output = K;

    fn index(&self, position: Position) -> &Self::Output {
        self.get_by_position(position.0).expect("position out of bounds")
    }
}
