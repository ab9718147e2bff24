//! Deferred combinators over pending outcomes.
//!
//! Each combinator accepts anything implementing
//! [`IntoFuture<Output = Outcome<T, E>>`](IntoFuture): a future, an `async`
//! block, or an [`Outcome`] itself (which converts into an already-ready
//! future). It waits for the outcome, then applies the matching synchronous
//! combinator from [`crate::combinator`]. The deferred forms therefore obey
//! the same laws as the synchronous ones:
//!
//! ```text
//! deferred::map(f, ready(r)).await  ==  combinator::map(f, r)
//! ```
//!
//! Transforms passed to [`flat_map`] and [`flat_map_error`] may return an
//! outcome or a future of one; [`map_async`] and [`map_error_async`] take
//! transforms returning a future of a plain payload.
//!
//! The crate does not ship an executor. Await the returned futures inside
//! whatever runtime you use, or drive them with a simple `block_on`.
//!
//! # Example
//! ```
//! use railway::deferred::{self, curried};
//! use railway::{failure, success, Outcome};
//!
//! async fn lookup(id: u32) -> Outcome<String, String> {
//!     if id == 7 { success("seven".into()) } else { failure(format!("no user {id}")) }
//! }
//!
//! let pending = deferred::flat_map(lookup, success::<u32, String>(7));
//! let name = curried::map(|s: String| s.len())(pending);
//! assert_eq!(futures_lite::future::block_on(name), success(5));
//! ```

pub mod combine;
pub mod curried;
pub mod future;

use std::future::IntoFuture;

pub use combine::{
    combine, combine_fns, combine_fns_with, combine_named_fns, combine_named_fns_with,
    combine_thunks, combine_thunks_with, combine_with, DeferredCombine, DeferredCombineFns,
    DeferredCombineThunks, LocalBoxFuture,
};
pub use future::{FlatMap, FlatMapError, Map, MapAsync, MapError, MapErrorAsync, Unwrapped};

use crate::combinator::Unwrap;
use crate::types::outcome::Outcome;

/// Waits for `pending`, then chains an outcome-returning step on success.
///
/// `transform` may return an [`Outcome`] or any future resolving to one.
/// It is never called when `pending` resolves to a failure.
pub fn flat_map<P, F, R, T, U, E>(transform: F, pending: P) -> FlatMap<P::IntoFuture, F, R::IntoFuture>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(T) -> R,
    R: IntoFuture<Output = Outcome<U, E>>,
{
    FlatMap::new(pending.into_future(), transform)
}

/// Waits for `pending`, then chains an outcome-returning step on failure.
pub fn flat_map_error<P, F, R, T, E, E2>(
    transform: F,
    pending: P,
) -> FlatMapError<P::IntoFuture, F, R::IntoFuture>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(E) -> R,
    R: IntoFuture<Output = Outcome<T, E2>>,
{
    FlatMapError::new(pending.into_future(), transform)
}

/// Waits for `pending`, then transforms the success payload.
pub fn map<P, F, T, U, E>(transform: F, pending: P) -> Map<P::IntoFuture, F>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(T) -> U,
{
    Map::new(pending.into_future(), transform)
}

/// Waits for `pending`, then transforms the failure payload.
pub fn map_error<P, F, T, E, E2>(transform: F, pending: P) -> MapError<P::IntoFuture, F>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(E) -> E2,
{
    MapError::new(pending.into_future(), transform)
}

/// Waits for `pending`, then transforms the success payload with an
/// asynchronous step.
pub fn map_async<P, F, R, T, E>(transform: F, pending: P) -> MapAsync<P::IntoFuture, F, R::IntoFuture>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(T) -> R,
    R: IntoFuture,
{
    MapAsync::new(pending.into_future(), transform)
}

/// Waits for `pending`, then transforms the failure payload with an
/// asynchronous step.
pub fn map_error_async<P, F, R, T, E>(
    transform: F,
    pending: P,
) -> MapErrorAsync<P::IntoFuture, F, R::IntoFuture>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(E) -> R,
    R: IntoFuture,
{
    MapErrorAsync::new(pending.into_future(), transform)
}

/// Waits for `pending`, then collapses it with `projection`.
///
/// ```
/// use railway::{deferred, failure, unwrap};
///
/// let pending = async { failure::<u8, &str>("offline") };
/// let message = deferred::unwrap(
///     unwrap().on_success(|v: u8| v.to_string()).on_failure(|e: &str| e.to_uppercase()),
///     pending,
/// );
/// assert_eq!(futures_lite::future::block_on(message), "OFFLINE");
/// ```
pub fn unwrap<P, S, F, T, E>(projection: Unwrap<S, F>, pending: P) -> Unwrapped<P::IntoFuture, S, F>
where
    P: IntoFuture<Output = Outcome<T, E>>,
{
    Unwrapped::new(pending.into_future(), projection)
}
