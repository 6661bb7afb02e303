//! This mod implements the counter matrix backing a Count-Min sketch.
//!
//! All `width * depth` counters live in one contiguous buffer, addressed as
//! `bucket * depth + row`.
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicU32, Ordering};

pub(crate) struct CounterMatrix {
    counters: Box<[AtomicU32]>,
    width: u32,
    depth: u32,
}

impl CounterMatrix {
    /// Returns `None` if `width * depth` counters cannot be addressed in
    /// one allocation on this target.
    pub(crate) fn new(width: u32, depth: u32) -> Option<Self> {
        let len = (width as usize).checked_mul(depth as usize)?;
        len.checked_mul(core::mem::size_of::<AtomicU32>())
            .filter(|bytes| *bytes <= isize::MAX as usize)?;
        Some(Self {
            counters: (0..len).map(|_| AtomicU32::new(0)).collect(),
            width,
            depth,
        })
    }

    /// The 0x0 matrix left behind after ownership has been transferred.
    pub(crate) fn empty() -> Self {
        Self {
            counters: Vec::new().into_boxed_slice(),
            width: 0,
            depth: 0,
        }
    }

    #[inline]
    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub(crate) fn shape(&self) -> (u32, u32) {
        (self.width, self.depth)
    }

    #[inline]
    fn offset(&self, bucket: usize, row: usize) -> usize {
        bucket * self.depth as usize + row
    }

    #[inline]
    pub(crate) fn get(&self, bucket: usize, row: usize) -> u32 {
        self.counters[self.offset(bucket, row)].load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn increment(&self, bucket: usize, row: usize) {
        // saturate instead of wrapping, a wrapped counter would undercount
        let _ = self.counters[self.offset(bucket, row)].fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |v| v.checked_add(1),
        );
    }

    /// Adds `other` element-wise. Shapes must already match.
    pub(crate) fn merge_from(&mut self, other: &CounterMatrix) {
        debug_assert_eq!(self.shape(), other.shape());
        self.counters
            .iter_mut()
            .zip(other.counters.iter())
            .for_each(|(dst, src)| {
                let v = dst.get_mut();
                *v = v.saturating_add(src.load(Ordering::Relaxed));
            })
    }

    /// Adds the matrix to itself.
    pub(crate) fn double(&mut self) {
        self.counters.iter_mut().for_each(|c| {
            let v = c.get_mut();
            *v = v.saturating_add(*v);
        })
    }

    pub(crate) fn clear(&mut self) {
        // zero each counter
        self.counters.iter_mut().for_each(|c| *c.get_mut() = 0)
    }

    /// Copies every counter into a freshly allocated matrix.
    pub(crate) fn snapshot(&self) -> Self {
        Self {
            counters: self
                .counters
                .iter()
                .map(|c| AtomicU32::new(c.load(Ordering::Relaxed)))
                .collect(),
            width: self.width,
            depth: self.depth,
        }
    }
}

impl Debug for CounterMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut s = String::new();
        for row in 0..self.depth as usize {
            for bucket in 0..self.width as usize {
                s.push_str(&format!("{:02} ", self.get(bucket, row)));
            }
            s.push('\n');
        }
        write!(f, "{}", s)
    }
}
