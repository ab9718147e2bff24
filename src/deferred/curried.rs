//! Curried deferred combinators.
//!
//! Each function takes the transform and returns a unary function awaiting
//! the pending outcome, mirroring [`crate::combinator::curried`].

use std::future::IntoFuture;

use super::future::{FlatMap, FlatMapError, Map, MapAsync, MapError, MapErrorAsync, Unwrapped};
use crate::combinator::Unwrap;
use crate::types::outcome::Outcome;

/// Curried [`deferred::flat_map`](super::flat_map).
pub fn flat_map<P, F, R, T, U, E>(transform: F) -> impl FnOnce(P) -> FlatMap<P::IntoFuture, F, R::IntoFuture>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(T) -> R,
    R: IntoFuture<Output = Outcome<U, E>>,
{
    move |pending| super::flat_map(transform, pending)
}

/// Curried [`deferred::flat_map_error`](super::flat_map_error).
pub fn flat_map_error<P, F, R, T, E, E2>(
    transform: F,
) -> impl FnOnce(P) -> FlatMapError<P::IntoFuture, F, R::IntoFuture>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(E) -> R,
    R: IntoFuture<Output = Outcome<T, E2>>,
{
    move |pending| super::flat_map_error(transform, pending)
}

/// Curried [`deferred::map`](super::map).
pub fn map<P, F, T, U, E>(transform: F) -> impl FnOnce(P) -> Map<P::IntoFuture, F>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(T) -> U,
{
    move |pending| super::map(transform, pending)
}

/// Curried [`deferred::map_error`](super::map_error).
pub fn map_error<P, F, T, E, E2>(transform: F) -> impl FnOnce(P) -> MapError<P::IntoFuture, F>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(E) -> E2,
{
    move |pending| super::map_error(transform, pending)
}

/// Curried [`deferred::map_async`](super::map_async).
pub fn map_async<P, F, R, T, E>(transform: F) -> impl FnOnce(P) -> MapAsync<P::IntoFuture, F, R::IntoFuture>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(T) -> R,
    R: IntoFuture,
{
    move |pending| super::map_async(transform, pending)
}

/// Curried [`deferred::map_error_async`](super::map_error_async).
pub fn map_error_async<P, F, R, T, E>(
    transform: F,
) -> impl FnOnce(P) -> MapErrorAsync<P::IntoFuture, F, R::IntoFuture>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    F: FnOnce(E) -> R,
    R: IntoFuture,
{
    move |pending| super::map_error_async(transform, pending)
}

/// Curried [`deferred::unwrap`](super::unwrap).
pub fn unwrap<P, S, F, T, E>(projection: Unwrap<S, F>) -> impl FnOnce(P) -> Unwrapped<P::IntoFuture, S, F>
where
    P: IntoFuture<Output = Outcome<T, E>>,
{
    move |pending| super::unwrap(projection, pending)
}
