/// Why a set operation left the set unchanged.
///
/// Every failing operation reports one of these and performs no mutation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// [`insert`](crate::AvlSet::insert) was given a key the set already holds.
    #[error("key is already present in the set")]
    DuplicateKey,
    /// The queried key is not in the set. Erasing from or querying an empty set reports this
    /// as well.
    #[error("key is not present in the set")]
    KeyNotFound,
}

/// Result alias for set operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(Error::DuplicateKey.to_string(), "key is already present in the set");
        assert_eq!(Error::KeyNotFound.to_string(), "key is not present in the set");
    }

    #[test]
    fn is_a_core_error() {
        fn assert_error<E: core::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&Error::KeyNotFound);
    }
}
