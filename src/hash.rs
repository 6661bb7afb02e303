//! Seeded hash families for the rows of a [`CountMinSketch`].
//!
//! A sketch of depth `d` needs `d` statistically independent views of the
//! same key. Each view is a [`RowHasher`], which is nothing but a seed (the
//! row index) handed to a [`HashFamily`]. Row hashers carry no mutable
//! state, so a sketch can rebuild them from its depth at any time and the
//! rebuilt functions behave identically to the originals.
//!
//! [`CountMinSketch`]: struct.CountMinSketch.html
//! [`RowHasher`]: struct.RowHasher.html
//! [`HashFamily`]: trait.HashFamily.html
use core::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

/// `HashFamily` maps a `(seed, key)` pair to a 64-bit hash.
///
/// Implementations must be pure: the same seed and key always produce the
/// same value, on every call and on every instance configured the same way.
/// Randomly keyed builders such as `std::collections::hash_map::RandomState`
/// break this and must not be used.
pub trait HashFamily<K: ?Sized> {
    /// hash the key under the given seed
    fn hash_with_seed(&self, seed: u32, key: &K) -> u64;
}

impl<K: ?Sized, F> HashFamily<K> for F
where
    F: Fn(u32, &K) -> u64,
{
    #[inline]
    fn hash_with_seed(&self, seed: u32, key: &K) -> u64 {
        self(seed, key)
    }
}

/// `SeededHashFamily` builds a hash family out of any deterministic
/// [`BuildHasher`] by feeding the seed into the hasher before the key.
///
/// [`BuildHasher`]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
#[derive(Copy, Clone, Debug, Default)]
pub struct SeededHashFamily<S = BuildHasherDefault<DefaultHasher>> {
    builder: S,
}

impl<S> SeededHashFamily<S> {
    /// Create a hash family using the given hash builder
    pub const fn with_hasher(builder: S) -> Self {
        Self { builder }
    }

    /// Returns the underlying hash builder
    pub fn hasher(&self) -> &S {
        &self.builder
    }
}

impl<K: Hash + ?Sized, S: BuildHasher> HashFamily<K> for SeededHashFamily<S> {
    #[inline]
    fn hash_with_seed(&self, seed: u32, key: &K) -> u64 {
        let mut h = self.builder.build_hasher();
        h.write_u32(seed);
        key.hash(&mut h);
        h.finish()
    }
}

/// `DefaultHashFamily` seeds the std SipHasher with fixed keys, which is
/// deterministic across instances and threads.
pub type DefaultHashFamily = SeededHashFamily<BuildHasherDefault<DefaultHasher>>;

/// `RowHasher` is the hash function of a single sketch row.
///
/// The seed is the row index, so row `i` of every sketch using the same
/// family hashes keys identically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowHasher {
    seed: u32,
}

impl RowHasher {
    /// Create the hasher for row `seed`
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Returns the seed (row index) of this hasher
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// `bucket` returns the index in `[0, width)` the key falls into for this row.
    ///
    /// `width` must be non-zero.
    #[inline]
    pub fn bucket<K, H>(&self, family: &H, key: &K, width: u32) -> usize
    where
        K: ?Sized,
        H: HashFamily<K>,
    {
        (family.hash_with_seed(self.seed, key) % u64::from(width)) as usize
    }

    /// `derive` regenerates the hashers of a sketch with the given depth.
    pub(crate) fn derive(depth: u32) -> Vec<RowHasher> {
        (0..depth).map(RowHasher::new).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::hash::BuildHasherDefault;
    use fnv::FnvBuildHasher;
    use rustc_hash::FxHasher;

    #[test]
    fn test_seeded_family_is_deterministic() {
        let a = DefaultHashFamily::default();
        let b = DefaultHashFamily::default();
        for seed in 0..8 {
            assert_eq!(
                a.hash_with_seed(seed, "bustub"),
                b.hash_with_seed(seed, "bustub")
            );
        }
    }

    #[test]
    fn test_seeds_give_distinct_views() {
        let family = SeededHashFamily::with_hasher(FnvBuildHasher::default());
        let hashes: Vec<u64> = (0..4)
            .map(|seed| family.hash_with_seed(seed, &42u64))
            .collect();
        for i in 0..hashes.len() {
            for j in (i + 1)..hashes.len() {
                assert_ne!(hashes[i], hashes[j]);
            }
        }
    }

    #[test]
    fn test_closure_family() {
        let family = |seed: u32, key: &u64| *key ^ u64::from(seed);
        assert_eq!(family.hash_with_seed(1, &6u64), 7);
        assert_eq!(RowHasher::new(1).bucket(&family, &6u64, 4), 3);
    }

    #[test]
    fn test_bucket_in_range() {
        let family = SeededHashFamily::with_hasher(BuildHasherDefault::<FxHasher>::default());
        for row in RowHasher::derive(5) {
            for key in 0..1000u32 {
                assert!(row.bucket(&family, &key, 13) < 13);
            }
        }
    }

    #[test]
    fn test_derive() {
        let rows = RowHasher::derive(3);
        assert_eq!(
            rows,
            vec![RowHasher::new(0), RowHasher::new(1), RowHasher::new(2)]
        );
        assert!(RowHasher::derive(0).is_empty());
        assert_eq!(rows[2].seed(), 2);
    }
}
