//! This mod implements a concurrent Count-Min sketch with 32-bit counters.
//!
//! Every sketch owns a `width x depth` counter matrix behind its own
//! read-write lock. Inserts and point queries share the lock and touch the
//! counters atomically, while `clear` and `merge` take it exclusively.
mod builder;
mod matrix;

pub use builder::{suggest_depth, suggest_width, CountMinSketchBuilder};

use crate::error::CountMinError;
use crate::hash::{DefaultHashFamily, HashFamily, RowHasher};
use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;
use matrix::CounterMatrix;
use parking_lot::RwLock;

/// `CountMinSketch` estimates the frequency of keys in a stream.
///
/// Estimates never undercount: `count(k)` is at least the number of times
/// `k` was inserted, and exceeds it only when other keys collide with `k`
/// in every row.
///
/// All operations take `&self` and may be called from many threads at once.
///
/// # Example
/// ```rust
/// use countmin::CountMinSketch;
///
/// let sketch: CountMinSketch<str> = CountMinSketch::new(1024, 4).unwrap();
///
/// sketch.insert("apple");
/// sketch.insert("apple");
/// sketch.insert("banana");
///
/// assert!(sketch.count("apple") >= 2);
/// assert!(sketch.count("banana") >= 1);
///
/// sketch.clear();
/// assert_eq!(sketch.count("apple"), 0);
/// ```
pub struct CountMinSketch<K: ?Sized, H = DefaultHashFamily> {
    matrix: RwLock<CounterMatrix>,
    hashers: Vec<RowHasher>,
    family: H,
    marker: PhantomData<fn(&K)>,
}

impl<K: ?Sized> CountMinSketch<K> {
    /// Creates a sketch with `width` buckets per row and `depth` rows, using
    /// the [`DefaultHashFamily`].
    ///
    /// Returns [`CountMinError::InvalidDimensions`] if either is zero, or if
    /// `width * depth` counters cannot be allocated on this target.
    ///
    /// [`DefaultHashFamily`]: type.DefaultHashFamily.html
    /// [`CountMinError::InvalidDimensions`]: enum.CountMinError.html#variant.InvalidDimensions
    pub fn new(width: u32, depth: u32) -> Result<Self, CountMinError> {
        Self::with_hash_family(width, depth, DefaultHashFamily::default())
    }
}

impl<K: ?Sized, H> CountMinSketch<K, H> {
    /// Creates a sketch hashing keys with a custom [`HashFamily`].
    ///
    /// [`HashFamily`]: trait.HashFamily.html
    pub fn with_hash_family(width: u32, depth: u32, family: H) -> Result<Self, CountMinError> {
        let matrix = match CounterMatrix::new(width, depth) {
            Some(matrix) if width != 0 && depth != 0 => matrix,
            _ => {
                debug!(width, depth, "rejected count-min sketch dimensions");
                return Err(CountMinError::InvalidDimensions { width, depth });
            }
        };

        debug!(width, depth, "created count-min sketch");
        Ok(Self {
            matrix: RwLock::new(matrix),
            hashers: RowHasher::derive(depth),
            family,
            marker: PhantomData,
        })
    }

    /// Returns the number of buckets per row
    pub fn width(&self) -> u32 {
        self.matrix.read().width()
    }

    /// Returns the number of rows
    pub fn depth(&self) -> u32 {
        self.matrix.read().depth()
    }

    /// Returns true if the sketch was emptied by [`take`].
    ///
    /// [`take`]: #method.take
    pub fn is_empty(&self) -> bool {
        self.matrix.read().shape() == (0, 0)
    }

    /// Returns the hash family
    pub fn hash_family(&self) -> &H {
        &self.family
    }

    /// Returns the hash function of every row, in row order
    pub fn row_hashers(&self) -> &[RowHasher] {
        &self.hashers
    }

    /// `clear` zeroes all counters.
    pub fn clear(&self) {
        self.matrix.write().clear();
        trace!("cleared count-min sketch");
    }

    /// `merge` adds the counters of `other` into `self`, so `self` estimates
    /// the union of both streams. `other` is left unchanged.
    ///
    /// Both sketches are locked for the whole call: `self` exclusively,
    /// `other` shared, so concurrent inserts into either one wait for the
    /// merge to finish. Merging a sketch into itself doubles every counter.
    ///
    /// Returns [`CountMinError::DimensionMismatch`] without touching `self`
    /// if the shapes differ.
    ///
    /// # Example
    /// ```rust
    /// use countmin::CountMinSketch;
    ///
    /// let a: CountMinSketch<u64> = CountMinSketch::new(256, 4).unwrap();
    /// let b: CountMinSketch<u64> = CountMinSketch::new(256, 4).unwrap();
    /// a.insert(&1);
    /// b.insert(&1);
    /// b.insert(&2);
    ///
    /// a.merge(&b).unwrap();
    /// assert!(a.count(&1) >= 2);
    /// assert!(a.count(&2) >= 1);
    ///
    /// let c: CountMinSketch<u64> = CountMinSketch::new(128, 4).unwrap();
    /// assert!(a.merge(&c).is_err());
    /// ```
    ///
    /// [`CountMinError::DimensionMismatch`]: enum.CountMinError.html#variant.DimensionMismatch
    pub fn merge(&self, other: &Self) -> Result<(), CountMinError> {
        if core::ptr::eq(self, other) {
            self.matrix.write().double();
            trace!("merged count-min sketch into itself");
            return Ok(());
        }

        // Locks are always taken in ascending address order.
        let (mut dst, src) = if (self as *const Self) < (other as *const Self) {
            let dst = self.matrix.write();
            (dst, other.matrix.read())
        } else {
            let src = other.matrix.read();
            (self.matrix.write(), src)
        };

        if dst.shape() != src.shape() {
            debug!(
                expected = ?dst.shape(),
                found = ?src.shape(),
                "rejected count-min sketch merge"
            );
            return Err(CountMinError::DimensionMismatch {
                expected: dst.shape(),
                found: src.shape(),
            });
        }

        dst.merge_from(&src);
        trace!("merged count-min sketch");
        Ok(())
    }

    /// `take` moves the counters out into a new sketch without copying them.
    ///
    /// The new sketch rebuilds its row hashers from the row indices and so
    /// reports exactly what `self` reported. `self` is left as an empty
    /// 0x0 sketch: inserts and clears are no-ops, every count is 0, and it
    /// only merges with another empty sketch.
    ///
    /// # Example
    /// ```rust
    /// use countmin::CountMinSketch;
    ///
    /// let mut s: CountMinSketch<str> = CountMinSketch::new(64, 2).unwrap();
    /// s.insert("k");
    ///
    /// let t = s.take();
    /// assert_eq!(t.count("k"), 1);
    /// assert!(s.is_empty());
    /// assert_eq!(s.count("k"), 0);
    /// ```
    pub fn take(&mut self) -> Self
    where
        H: Clone,
    {
        let matrix = core::mem::replace(self.matrix.get_mut(), CounterMatrix::empty());
        self.hashers.clear();

        let depth = matrix.depth();
        trace!(width = matrix.width(), depth, "moved count-min sketch");
        Self {
            matrix: RwLock::new(matrix),
            hashers: RowHasher::derive(depth),
            family: self.family.clone(),
            marker: PhantomData,
        }
    }
}

impl<K: ?Sized, H: HashFamily<K>> CountMinSketch<K, H> {
    /// `insert` increments the counter of `key` in every row.
    ///
    /// Counters saturate at `u32::MAX`.
    pub fn insert(&self, key: &K) {
        let matrix = self.matrix.read();
        let width = matrix.width();
        self.hashers.iter().enumerate().for_each(|(row, h)| {
            matrix.increment(h.bucket(&self.family, key, width), row);
        });
    }

    /// `count` returns the estimated frequency of `key`, the minimum of its
    /// counters across all rows.
    pub fn count(&self, key: &K) -> u32 {
        let matrix = self.matrix.read();
        self.estimate(&matrix, key)
    }

    /// `top_k` estimates every candidate and returns the `k` largest,
    /// sorted by descending estimate. Candidates with equal estimates keep
    /// their input order.
    ///
    /// The sketch does not remember keys, so only the given candidates are
    /// ranked. All estimates are read under one lock, so a concurrent
    /// `clear` or `merge` is seen either by every candidate or by none.
    ///
    /// # Example
    /// ```rust
    /// use countmin::CountMinSketch;
    ///
    /// let sketch: CountMinSketch<&str> = CountMinSketch::new(4096, 4).unwrap();
    /// (0..5).for_each(|_| sketch.insert(&"a"));
    /// sketch.insert(&"b");
    /// (0..9).for_each(|_| sketch.insert(&"c"));
    ///
    /// assert_eq!(sketch.top_k(2, &["a", "b", "c"]), vec![("c", 9), ("a", 5)]);
    /// ```
    pub fn top_k(&self, k: u16, candidates: &[K]) -> Vec<(K, u32)>
    where
        K: Clone,
    {
        if k == 0 {
            return Vec::new();
        }

        let matrix = self.matrix.read();
        let mut ranked: Vec<(usize, u32)> = candidates
            .iter()
            .enumerate()
            .map(|(idx, c)| (idx, self.estimate(&matrix, c)))
            .collect();
        drop(matrix);

        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k as usize);
        ranked
            .into_iter()
            .map(|(idx, est)| (candidates[idx].clone(), est))
            .collect()
    }

    fn estimate(&self, matrix: &CounterMatrix, key: &K) -> u32 {
        let width = matrix.width();
        self.hashers
            .iter()
            .enumerate()
            .map(|(row, h)| matrix.get(h.bucket(&self.family, key, width), row))
            .min()
            .unwrap_or(0)
    }
}

impl<K: ?Sized, H: Clone> Clone for CountMinSketch<K, H> {
    fn clone(&self) -> Self {
        let matrix = self.matrix.read().snapshot();
        let depth = matrix.depth();
        Self {
            matrix: RwLock::new(matrix),
            hashers: RowHasher::derive(depth),
            family: self.family.clone(),
            marker: PhantomData,
        }
    }
}

impl<K: ?Sized, H> Debug for CountMinSketch<K, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let matrix = self.matrix.read();
        f.debug_struct("CountMinSketch")
            .field("width", &matrix.width())
            .field("depth", &matrix.depth())
            .field("counters", &*matrix)
            .finish()
    }
}
