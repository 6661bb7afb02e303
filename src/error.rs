use core::fmt::{Display, Formatter};

/// `CountMinError` contains the errors of [`CountMinSketch`].
///
/// [`CountMinSketch`]: struct.CountMinSketch.html
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CountMinError {
    /// Width or depth of zero, or a `width * depth` matrix too large to
    /// allocate, given at construction
    InvalidDimensions {
        /// requested width
        width: u32,
        /// requested depth
        depth: u32,
    },
    /// Merge between sketches of different `(width, depth)`
    DimensionMismatch {
        /// shape of the receiving sketch
        expected: (u32, u32),
        /// shape of the sketch being merged in
        found: (u32, u32),
    },
    /// Relative error bound outside of `(0.0, 1.0)`
    InvalidErrorBound(f64),
    /// Confidence outside of `(0.0, 1.0)`
    InvalidConfidence(f64),
}

impl Display for CountMinError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CountMinError::InvalidDimensions { width, depth } => write!(
                f,
                "invalid count-min sketch dimensions: width {}, depth {} \
                 (both must be non-zero and the matrix must fit in memory)",
                *width, *depth
            ),
            CountMinError::DimensionMismatch { expected, found } => write!(
                f,
                "count-min sketch dimension mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            CountMinError::InvalidErrorBound(v) => write!(
                f,
                "invalid error bound: {}, which should be in range (0.0, 1.0)",
                *v
            ),
            CountMinError::InvalidConfidence(v) => write!(
                f,
                "invalid confidence: {}, which should be in range (0.0, 1.0)",
                *v
            ),
        }
    }
}

impl std::error::Error for CountMinError {}
