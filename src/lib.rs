//! Railway: two-track outcome combinators for Rust.
//!
//! # Overview
//!
//! A computation either stays on the success track carrying a value, or is
//! diverted to the failure track carrying an error. Once on the failure
//! track it stays there until something explicitly recovers. Every
//! combinator in this crate transforms one track and passes the other
//! through untouched.
//!
//! # Core Guarantees
//!
//! - **Two tracks only**: an [`Outcome`] is exactly one of `Success` or `Failure`
//! - **Short-circuit**: transforms for the inactive track are never called
//! - **First failure wins**: `combine` reports the earliest failure by position
//! - **Deferred transparency**: a deferred combinator on a ready outcome
//!   behaves exactly like its synchronous counterpart
//!
//! # Module Structure
//!
//! - [`types`]: [`Outcome`], [`Named`], [`Either`]
//! - [`combinator`]: synchronous `map`, `flat_map`, `combine`, `unwrap` and
//!   their curried forms
//! - [`deferred`]: the same combinators over pending outcomes
//! - [`config`]: resolve order for deferred `combine`
//! - [`error`]: configuration errors
//!
//! # Example
//! ```
//! use railway::combinator::curried::{flat_map, map};
//! use railway::{combine, failure, success, unwrap, Outcome};
//!
//! fn parse_port(s: &str) -> Outcome<u16, String> {
//!     s.parse::<u16>().map_err(|e| format!("{s}: {e}")).into()
//! }
//!
//! let config = combine((parse_port("8080"), success::<&str, String>("localhost")))
//!     .pipe(map(|(port, host): (u16, &str)| format!("{host}:{port}")))
//!     .pipe(flat_map(|addr: String| {
//!         if addr.starts_with("localhost") { success(addr) } else { failure("remote".into()) }
//!     }));
//!
//! let shown = unwrap().on_failure(|e: String| format!("error: {e}")).apply(config);
//! assert_eq!(shown, "localhost:8080");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

pub mod combinator;
pub mod config;
pub mod deferred;
pub mod error;
pub mod tracing_compat;
pub mod types;

#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

// Re-exports for convenient access to core types
pub use combinator::{
    combine, combine_fns, combine_iter, combine_named_fns, combine_thunks, flat_map,
    flat_map_error, map, map_error, unwrap, Combine, CombineShape, Unwrap,
};
pub use config::{CombineConfig, ResolveOrder};
pub use error::ConfigError;
pub use types::{failure, success, Either, Named, Outcome};
