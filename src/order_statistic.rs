/// A zero-based position in the ascending order of a set.
///
/// Used to index a set by order, e.g. `set[Position(0)]` for the smallest key.
///
/// # Examples
///
/// ```
/// use avl_set::{AvlSet, Position};
///
/// let set = AvlSet::from([30, 10, 20]);
/// assert_eq!(set[Position(0)], 10);
/// assert_eq!(set[Position(2)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position(pub usize);

/// Answer to a rank query.
///
/// `rank` is one more than the number of keys in the set strictly less than the queried key,
/// whether or not that key is present. `depth` is the queried key's depth, or `None` when it
/// is absent.
///
/// # Examples
///
/// ```
/// use avl_set::{AvlSet, RankReport};
///
/// let set = AvlSet::from([10, 20, 30]);
/// assert_eq!(set.rank(&20), RankReport { depth: Some(0), rank: 2 });
/// assert_eq!(set.rank(&25), RankReport { depth: None, rank: 3 });
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RankReport {
    /// Depth of the node holding the key; `None` if the key is not in the set.
    pub depth: Option<usize>,
    /// `1 + |{x in set : x < key}|`.
    pub rank: usize,
}

impl RankReport {
    /// Returns true if the queried key is in the set.
    #[must_use]
    pub const fn is_member(&self) -> bool {
        self.depth.is_some()
    }
}
