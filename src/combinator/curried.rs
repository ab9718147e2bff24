//! Curried entry points for pipeline composition.
//!
//! Each function takes only the transform and returns a unary function
//! awaiting the outcome. Combine with [`Outcome::pipe`] to read pipelines
//! left to right:
//!
//! ```
//! use railway::combinator::curried::{flat_map, map, map_error};
//! use railway::{failure, success, Outcome};
//!
//! let checked: Outcome<i32, String> = success::<i32, &str>(10)
//!     .pipe(map(|v: i32| v - 20))
//!     .pipe(flat_map(|v: i32| if v < 0 { failure("negative") } else { success(v) }))
//!     .pipe(map_error(|e: &str| e.to_uppercase()));
//!
//! assert_eq!(checked, failure("NEGATIVE".to_string()));
//! ```

use crate::types::outcome::Outcome;

/// Curried [`flat_map`](super::flat_map).
pub fn flat_map<T, U, E, F>(transform: F) -> impl FnOnce(Outcome<T, E>) -> Outcome<U, E>
where
    F: FnOnce(T) -> Outcome<U, E>,
{
    move |outcome| super::chain::flat_map(transform, outcome)
}

/// Curried [`flat_map_error`](super::flat_map_error).
pub fn flat_map_error<T, E, E2, F>(transform: F) -> impl FnOnce(Outcome<T, E>) -> Outcome<T, E2>
where
    F: FnOnce(E) -> Outcome<T, E2>,
{
    move |outcome| super::chain::flat_map_error(transform, outcome)
}

/// Curried [`map`](super::map).
pub fn map<T, U, E, F>(transform: F) -> impl FnOnce(Outcome<T, E>) -> Outcome<U, E>
where
    F: FnOnce(T) -> U,
{
    move |outcome| super::chain::map(transform, outcome)
}

/// Curried [`map_error`](super::map_error).
pub fn map_error<T, E, E2, F>(transform: F) -> impl FnOnce(Outcome<T, E>) -> Outcome<T, E2>
where
    F: FnOnce(E) -> E2,
{
    move |outcome| super::chain::map_error(transform, outcome)
}
