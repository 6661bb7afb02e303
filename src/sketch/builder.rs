use crate::error::CountMinError;
use crate::hash::DefaultHashFamily;
use crate::sketch::CountMinSketch;
use core::f64::consts::E;
use core::marker::PhantomData;

/// `suggest_width` returns the number of buckets per row that keeps the
/// overcount of any key under `epsilon * N` (`N` being the number of inserts)
/// with the probability given by the depth.
///
/// `epsilon` must be in range `(0.0, 1.0)`.
///
/// # Example
/// ```rust
/// use countmin::suggest_width;
///
/// assert_eq!(suggest_width(0.01).unwrap(), 272);
/// assert!(suggest_width(0.0).is_err());
/// ```
pub fn suggest_width(epsilon: f64) -> Result<u32, CountMinError> {
    if !(epsilon > 0.0 && epsilon < 1.0) {
        return Err(CountMinError::InvalidErrorBound(epsilon));
    }

    let width = (E / epsilon).ceil();
    if width > u32::MAX as f64 {
        return Err(CountMinError::InvalidErrorBound(epsilon));
    }
    Ok(width as u32)
}

/// `suggest_depth` returns the number of rows needed for the error bound of
/// the width to hold with probability `confidence`.
///
/// `confidence` must be in range `(0.0, 1.0)`.
///
/// # Example
/// ```rust
/// use countmin::suggest_depth;
///
/// assert_eq!(suggest_depth(0.99).unwrap(), 5);
/// assert!(suggest_depth(1.0).is_err());
/// ```
pub fn suggest_depth(confidence: f64) -> Result<u32, CountMinError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(CountMinError::InvalidConfidence(confidence));
    }

    let depth = (1.0 / (1.0 - confidence)).ln().ceil();
    Ok((depth as u32).max(1))
}

/// `CountMinSketchBuilder` is used to help build a [`CountMinSketch`] with custom configurations.
///
/// Dimensions can be given directly or derived from an error bound and a
/// confidence. When both are set, the error bound and confidence win.
///
/// # Example
/// ```rust
/// use countmin::{CountMinSketch, CountMinSketchBuilder, SeededHashFamily};
/// use std::collections::hash_map::DefaultHasher;
/// use std::hash::BuildHasherDefault;
///
/// let sketch: CountMinSketch<u64, _> = CountMinSketchBuilder::from_error_bounds(0.01, 0.99)
///     .set_hash_family(SeededHashFamily::with_hasher(
///         BuildHasherDefault::<DefaultHasher>::default(),
///     ))
///     .finalize()
///     .unwrap();
///
/// assert_eq!(sketch.width(), 272);
/// assert_eq!(sketch.depth(), 5);
/// ```
///
/// [`CountMinSketch`]: struct.CountMinSketch.html
pub struct CountMinSketchBuilder<K: ?Sized, H = DefaultHashFamily> {
    width: u32,
    depth: u32,
    error_bound: Option<f64>,
    confidence: Option<f64>,
    family: H,
    marker: PhantomData<fn(&K)>,
}

impl<K: ?Sized, H: Default> Default for CountMinSketchBuilder<K, H> {
    fn default() -> Self {
        Self::with_hash_family(H::default())
    }
}

impl<K: ?Sized> CountMinSketchBuilder<K> {
    /// The constructor of CountMinSketchBuilder
    pub fn new(width: u32, depth: u32) -> Self {
        Self::default().set_width(width).set_depth(depth)
    }

    /// Construct a CountMinSketchBuilder sized from a relative error bound and a confidence
    pub fn from_error_bounds(epsilon: f64, confidence: f64) -> Self {
        Self::default()
            .set_error_bound(epsilon)
            .set_confidence(confidence)
    }
}

impl<K: ?Sized, H> CountMinSketchBuilder<K, H> {
    /// Construct a CountMinSketchBuilder using the custom hash family.
    pub fn with_hash_family(family: H) -> Self {
        Self {
            width: 0,
            depth: 0,
            error_bound: None,
            confidence: None,
            family,
            marker: PhantomData,
        }
    }

    /// Set the number of buckets per row
    pub fn set_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the number of rows
    pub fn set_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Derive the width from a relative error bound
    pub fn set_error_bound(mut self, epsilon: f64) -> Self {
        self.error_bound = Some(epsilon);
        self
    }

    /// Derive the depth from a confidence
    pub fn set_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Set the hash family
    pub fn set_hash_family<NH>(self, family: NH) -> CountMinSketchBuilder<K, NH> {
        CountMinSketchBuilder {
            width: self.width,
            depth: self.depth,
            error_bound: self.error_bound,
            confidence: self.confidence,
            family,
            marker: self.marker,
        }
    }

    /// Finalize the builder to [`CountMinSketch`]
    ///
    /// [`CountMinSketch`]: struct.CountMinSketch.html
    pub fn finalize(self) -> Result<CountMinSketch<K, H>, CountMinError> {
        let width = match self.error_bound {
            Some(epsilon) => suggest_width(epsilon)?,
            None => self.width,
        };
        let depth = match self.confidence {
            Some(confidence) => suggest_depth(confidence)?,
            None => self.depth,
        };
        CountMinSketch::with_hash_family(width, depth, self.family)
    }
}
