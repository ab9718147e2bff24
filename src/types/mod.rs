//! Core types for railway pipelines.
//!
//! - [`outcome`]: Two-valued success/failure type and its constructors
//! - [`either`]: Untagged union used when the two sides of an outcome differ
//! - [`named`]: Insertion-ordered map used by the named forms of `combine`

pub mod either;
pub mod named;
pub mod outcome;

pub use either::Either;
pub use named::Named;
pub use outcome::{failure, success, Outcome};
