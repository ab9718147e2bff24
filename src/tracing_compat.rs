//! Tracing compatibility layer for the crate's internal diagnostics.
//!
//! - **With `tracing-integration`**: re-exports the `tracing` macros.
//! - **Without it**: no-op macros that expand to nothing.
//!
//! Only combine and deferred-resolution decisions are logged, at `trace`
//! and `debug` level. `map` and `flat_map` never log.
//!
//! ```toml
//! railway = { version = "0.1", features = ["tracing-integration"] }
//! ```

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    //! No-op implementations when tracing is disabled.

    /// No-op trace-level logging macro.
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __railway_trace {
        ($($arg:tt)*) => {};
    }

    /// No-op debug-level logging macro.
    #[macro_export]
    #[doc(hidden)]
    macro_rules! __railway_debug {
        ($($arg:tt)*) => {};
    }

    pub use crate::{__railway_debug as debug, __railway_trace as trace};
}

#[cfg(not(feature = "tracing-integration"))]
pub use noop::*;
