// Structured logging through `tracing` when the feature is enabled,
// otherwise the macros expand to nothing and the arguments are not evaluated.
cfg_if::cfg_if! {
    if #[cfg(feature = "tracing")] {
        macro_rules! debug {
            ($($arg:tt)*) => {
                tracing::debug!($($arg)*)
            }
        }

        macro_rules! trace {
            ($($arg:tt)*) => {
                tracing::trace!($($arg)*)
            }
        }
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }

        macro_rules! trace {
            ($($arg:tt)*) => {{}};
        }
    }
}
