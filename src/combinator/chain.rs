//! Single-track combinators: `flat_map`, `flat_map_error`, `map`, `map_error`.
//!
//! # Semantics
//!
//! ```text
//! flat_map(f, Success(v))       = f(v)
//! flat_map(f, Failure(e))       = Failure(e)        // f never called
//! flat_map_error(g, Success(v)) = Success(v)        // g never called
//! flat_map_error(g, Failure(e)) = g(e)
//!
//! map(f, o)       = flat_map(|v| Success(f(v)), o)
//! map_error(g, o) = flat_map_error(|e| Failure(g(e)), o)
//! ```
//!
//! # Algebraic Laws
//!
//! - Identity: `map(id, o) == o`
//! - Left identity: `flat_map(f, success(v)) == f(v)`
//! - Right identity: `flat_map(success, o) == o`
//! - Associativity: `flat_map(g, flat_map(f, o)) == flat_map(|v| flat_map(g, f(v)), o)`
//!
//! Transforms are caller code. A panicking transform unwinds through the
//! combinator untouched.

use crate::types::outcome::{failure, success, Outcome};

/// Chains an outcome-returning step onto the success track.
///
/// # Example
/// ```
/// use railway::combinator::flat_map;
/// use railway::{failure, success, Outcome};
///
/// fn half(v: i32) -> Outcome<i32, String> {
///     if v % 2 == 0 { success(v / 2) } else { failure(format!("{v} is odd")) }
/// }
///
/// assert_eq!(flat_map(half, success(8)), success(4));
/// assert_eq!(flat_map(half, success(3)), failure("3 is odd".to_string()));
/// ```
pub fn flat_map<T, U, E, F>(transform: F, outcome: Outcome<T, E>) -> Outcome<U, E>
where
    F: FnOnce(T) -> Outcome<U, E>,
{
    match outcome {
        Outcome::Success(v) => transform(v),
        Outcome::Failure(e) => Outcome::Failure(e),
    }
}

/// Chains an outcome-returning step onto the failure track.
///
/// The transform may recover (return `Success`) or replace the failure.
pub fn flat_map_error<T, E, E2, F>(transform: F, outcome: Outcome<T, E>) -> Outcome<T, E2>
where
    F: FnOnce(E) -> Outcome<T, E2>,
{
    match outcome {
        Outcome::Success(v) => Outcome::Success(v),
        Outcome::Failure(e) => transform(e),
    }
}

/// Transforms the success payload, leaving failures untouched.
pub fn map<T, U, E, F>(transform: F, outcome: Outcome<T, E>) -> Outcome<U, E>
where
    F: FnOnce(T) -> U,
{
    flat_map(|v| success(transform(v)), outcome)
}

/// Transforms the failure payload, leaving successes untouched.
pub fn map_error<T, E, E2, F>(transform: F, outcome: Outcome<T, E>) -> Outcome<T, E2>
where
    F: FnOnce(E) -> E2,
{
    flat_map_error(|e| failure(transform(e)), outcome)
}
