//! A concurrent [Count-Min sketch] for estimating key frequencies with
//! sub-linear memory.
//!
//! The sketch never undercounts: the estimate of a key is at least the
//! number of times it was inserted, and overcounts only through hash
//! collisions. This makes it a fit for cache admission (TinyLFU), heavy
//! hitter detection and approximate query answering.
//!
//! ```rust
//! use countmin::CountMinSketch;
//!
//! let sketch: CountMinSketch<&str> = CountMinSketch::new(2048, 4).unwrap();
//! for key in ["a", "b", "a", "c", "a", "b"] {
//!     sketch.insert(&key);
//! }
//!
//! assert!(sketch.count(&"a") >= 3);
//! assert_eq!(sketch.top_k(1, &["a", "b", "c"]), vec![("a", 3)]);
//! ```
//!
//! ## Features
//! - `tracing`: emit [`tracing`] events when sketches are created, merged,
//!   cleared or moved.
//!
//! ## Acknowledgments
//! - Graham Cormode and S. Muthukrishnan -- [An Improved Data Stream Summary][cm-paper]
//!
//! [Count-Min sketch]: https://en.wikipedia.org/wiki/Count%E2%80%93min_sketch
//! [`tracing`]: https://docs.rs/tracing
//! [cm-paper]: http://dimacs.rutgers.edu/~graham/pubs/papers/cm-full.pdf
#![deny(missing_docs)]

#[macro_use]
mod macros;

mod error;
mod hash;
mod sketch;

pub use error::CountMinError;
pub use hash::{DefaultHashFamily, HashFamily, RowHasher, SeededHashFamily};
pub use sketch::{suggest_depth, suggest_width, CountMinSketch, CountMinSketchBuilder};
