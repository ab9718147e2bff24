//! Two-valued outcome type for railway-oriented pipelines.
//!
//! An [`Outcome`] is exactly one of:
//!
//! - `Success(T)`: the operation produced a value
//! - `Failure(E)`: the operation reported an error payload
//!
//! The failure payload is opaque to this crate. Combinators route it
//! through pipelines untouched; they never build, inspect, or swallow it.
//!
//! # Railway Model
//!
//! ```text
//! success ──map──▶ success ──flat_map──▶ success ──▶ ...
//!                                 │
//! failure ────────────────────────┴──────▶ failure ──▶ ...
//! ```
//!
//! Once a value switches onto the failure track it stays there until a
//! failure-side combinator (`map_error`, `flat_map_error`) moves it back.

use core::fmt;
use std::future::{ready, IntoFuture, Ready};

use super::either::Either;
use crate::combinator::chain;

/// The outcome of an operation: a success payload or a failure payload.
///
/// Values are immutable once built; every combinator consumes its input
/// and returns a new `Outcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use = "an Outcome may carry a failure that should be handled"]
pub enum Outcome<T, E> {
    /// The operation succeeded with a value.
    Success(T),
    /// The operation failed with an error payload.
    Failure(E),
}

/// Builds a successful outcome.
///
/// The failure type is left open and is inferred from the surrounding
/// pipeline.
///
/// # Example
/// ```
/// use railway::{success, Outcome};
///
/// let o: Outcome<i32, String> = success(7);
/// assert_eq!(o, Outcome::Success(7));
/// ```
pub const fn success<T, E>(value: T) -> Outcome<T, E> {
    Outcome::Success(value)
}

/// Builds a failed outcome.
///
/// # Example
/// ```
/// use railway::{failure, Outcome};
///
/// let o: Outcome<i32, &str> = failure("boom");
/// assert!(o.is_failure());
/// ```
pub const fn failure<T, E>(value: E) -> Outcome<T, E> {
    Outcome::Failure(value)
}

impl<T, E> Outcome<T, E> {
    /// Returns true if this outcome is `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if this outcome is `Failure`.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Borrows the payloads.
    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Success(v) => Outcome::Success(v),
            Self::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Returns the success payload, discarding a failure.
    #[must_use]
    pub fn into_success(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure payload, discarding a success.
    #[must_use]
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(e) => Some(e),
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(e) => Err(e),
        }
    }

    /// Extracts whichever payload is present as an [`Either`].
    ///
    /// This is the untyped counterpart of [`unwrap`](crate::unwrap) for
    /// outcomes whose two sides have different types.
    #[must_use]
    pub fn into_either(self) -> Either<T, E> {
        match self {
            Self::Success(v) => Either::Left(v),
            Self::Failure(e) => Either::Right(e),
        }
    }

    /// Collapses the outcome into one value using a projection per side.
    pub fn fold<U, S, F>(self, on_success: S, on_failure: F) -> U
    where
        S: FnOnce(T) -> U,
        F: FnOnce(E) -> U,
    {
        match self {
            Self::Success(v) => on_success(v),
            Self::Failure(e) => on_failure(e),
        }
    }

    /// Transforms the success payload. See [`map`](crate::combinator::map).
    pub fn map<U, F>(self, transform: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        chain::map(transform, self)
    }

    /// Chains an outcome-returning step. See [`flat_map`](crate::combinator::flat_map).
    pub fn flat_map<U, F>(self, transform: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        chain::flat_map(transform, self)
    }

    /// Transforms the failure payload. See [`map_error`](crate::combinator::map_error).
    pub fn map_error<E2, F>(self, transform: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        chain::map_error(transform, self)
    }

    /// Recovers from, or replaces, a failure.
    /// See [`flat_map_error`](crate::combinator::flat_map_error).
    pub fn flat_map_error<E2, F>(self, transform: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> Outcome<T, E2>,
    {
        chain::flat_map_error(transform, self)
    }

    /// Widens the failure type so steps with a broader error can be chained.
    ///
    /// # Example
    /// ```
    /// use railway::{failure, Outcome};
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum AppError { Parse(u8) }
    /// impl From<u8> for AppError {
    ///     fn from(code: u8) -> Self { Self::Parse(code) }
    /// }
    ///
    /// let narrow: Outcome<i32, u8> = failure(3);
    /// let wide: Outcome<i32, AppError> = narrow.widen_failure();
    /// assert_eq!(wide, Outcome::Failure(AppError::Parse(3)));
    /// ```
    pub fn widen_failure<E2>(self) -> Outcome<T, E2>
    where
        E: Into<E2>,
    {
        self.map_error(Into::into)
    }

    /// Widens the success type; the mirror of [`widen_failure`](Self::widen_failure).
    pub fn widen_success<T2>(self) -> Outcome<T2, E>
    where
        T: Into<T2>,
    {
        self.map(Into::into)
    }

    /// Feeds this outcome to a unary function.
    ///
    /// Pairs with the curried combinators to write pipelines left to right.
    ///
    /// # Example
    /// ```
    /// use railway::combinator::curried;
    /// use railway::{success, Outcome};
    ///
    /// let o: Outcome<i32, &str> = success(20)
    ///     .pipe(curried::map(|v: i32| v + 1))
    ///     .pipe(curried::map(|v: i32| v * 2));
    /// assert_eq!(o, success(42));
    /// ```
    pub fn pipe<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Outcome<T, T> {
    /// Returns the payload of an outcome whose two sides share a type.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Success(v) | Self::Failure(v) => v,
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Success(v),
            Err(e) => Self::Failure(e),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}

/// An outcome is already resolved; awaiting it yields it back.
///
/// This lets every deferred combinator accept immediate outcomes and
/// futures of outcomes interchangeably.
impl<T, E> IntoFuture for Outcome<T, E> {
    type Output = Self;
    type IntoFuture = Ready<Self>;

    fn into_future(self) -> Self::IntoFuture {
        ready(self)
    }
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Outcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(v) => write!(f, "success: {v}"),
            Self::Failure(e) => write!(f, "failure: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Constructor and Predicate Tests
    // =========================================================================

    #[test]
    fn constructors_tag_the_variant() {
        let ok: Outcome<i32, &str> = success(42);
        let err: Outcome<i32, &str> = failure("error");

        assert_eq!(ok, Outcome::Success(42));
        assert_eq!(err, Outcome::Failure("error"));
    }

    #[test]
    fn constructors_accept_unit_payloads() {
        let ok: Outcome<(), ()> = success(());
        let err: Outcome<(), ()> = failure(());

        assert!(ok.is_success());
        assert!(err.is_failure());
    }

    #[test]
    fn predicates_are_exclusive() {
        let ok: Outcome<i32, &str> = success(1);
        let err: Outcome<i32, &str> = failure("e");

        assert!(ok.is_success() && !ok.is_failure());
        assert!(err.is_failure() && !err.is_success());
    }

    // =========================================================================
    // Extraction Tests
    // =========================================================================

    #[test]
    fn into_success_and_failure() {
        let ok: Outcome<i32, &str> = success(1);
        let err: Outcome<i32, &str> = failure("e");

        assert_eq!(ok.into_success(), Some(1));
        assert_eq!(ok.into_failure(), None);
        assert_eq!(err.into_success(), None);
        assert_eq!(err.into_failure(), Some("e"));
    }

    #[test]
    fn as_ref_borrows_payload() {
        let ok: Outcome<String, String> = success("hello".to_string());
        assert_eq!(ok.as_ref().map(String::len), success(5));
        // Original still usable.
        assert!(ok.is_success());
    }

    #[test]
    fn into_inner_for_same_typed_sides() {
        let ok: Outcome<i32, i32> = success(1);
        let err: Outcome<i32, i32> = failure(2);
        assert_eq!(ok.into_inner(), 1);
        assert_eq!(err.into_inner(), 2);
    }

    #[test]
    fn into_either_keeps_side() {
        let ok: Outcome<i32, &str> = success(1);
        let err: Outcome<i32, &str> = failure("e");
        assert_eq!(ok.into_either(), Either::Left(1));
        assert_eq!(err.into_either(), Either::Right("e"));
    }

    #[test]
    fn fold_picks_matching_projection() {
        let ok: Outcome<i32, &str> = success(2);
        let err: Outcome<i32, &str> = failure("four");

        assert_eq!(ok.fold(|v: i32| v as usize * 10, str::len), 20);
        assert_eq!(err.fold(|v| v as usize, str::len), 4);
    }

    // =========================================================================
    // Widening Tests
    // =========================================================================

    #[test]
    fn widen_failure_converts_error() {
        let narrow: Outcome<i32, u8> = failure(7);
        let wide: Outcome<i32, u32> = narrow.widen_failure();
        assert_eq!(wide, failure(7u32));
    }

    #[test]
    fn widen_success_converts_value() {
        let narrow: Outcome<u8, &str> = success(7);
        let wide: Outcome<u64, &str> = narrow.widen_success();
        assert_eq!(wide, success(7u64));
    }

    // =========================================================================
    // Conversion Tests
    // =========================================================================

    #[test]
    fn from_result_round_trip() {
        let ok: Outcome<i32, &str> = Outcome::from(Ok(1));
        let err: Outcome<i32, &str> = Outcome::from(Err("e"));
        assert_eq!(ok, success(1));
        assert_eq!(err, failure("e"));

        let back: Result<i32, &str> = ok.into();
        assert_eq!(back, Ok(1));
        assert_eq!(err.into_result(), Err("e"));
    }

    #[test]
    fn pipe_applies_function() {
        let o: Outcome<i32, &str> = success(1);
        assert!(o.pipe(|x| x.is_success()));
    }

    #[test]
    fn awaiting_an_outcome_yields_it() {
        let o: Outcome<i32, &str> = success(3);
        let resolved = futures_lite::future::block_on(async move { o.await });
        assert_eq!(resolved, success(3));
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[test]
    fn display_names_the_track() {
        let ok: Outcome<i32, &str> = success(1);
        let err: Outcome<i32, &str> = failure("bad input");
        assert_eq!(format!("{ok}"), "success: 1");
        assert_eq!(format!("{err}"), "failure: bad input");
    }
}
