//! Future types returned by the deferred combinators.
//!
//! Every deferred combinator returns a named future so that curried forms
//! can hand back a concrete type. Each one resolves its input, hands the
//! resolved outcome to the matching synchronous combinator, and, for the
//! `flat_*` and `*_async` variants, awaits the follow-up the transform
//! produced.
//!
//! All futures here panic if polled again after returning `Poll::Ready`.

use core::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use pin_project::pin_project;

use crate::combinator::{chain, Project, Unwrap};
use crate::types::either::Either;
use crate::types::outcome::Outcome;

const POLLED_AFTER_COMPLETION: &str = "deferred combinator polled after completion";

/// Resolve one future, then apply a one-shot step to its output.
#[pin_project(project = ThenProj, project_replace = ThenOwn)]
enum Then<Fut, F> {
    Pending {
        #[pin]
        pending: Fut,
        step: F,
    },
    Done,
}

impl<Fut: Future, F> Then<Fut, F> {
    fn new(pending: Fut, step: F) -> Self {
        Self::Pending { pending, step }
    }

    fn poll_with<Out>(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        apply: impl FnOnce(Fut::Output, F) -> Out,
    ) -> Poll<Out> {
        let input = match self.as_mut().project() {
            ThenProj::Pending { pending, .. } => ready!(pending.poll(cx)),
            ThenProj::Done => panic!("{POLLED_AFTER_COMPLETION}"),
        };
        match self.project_replace(Self::Done) {
            ThenOwn::Pending { step, .. } => Poll::Ready(apply(input, step)),
            ThenOwn::Done => unreachable!("state checked before replace"),
        }
    }
}

/// Resolve one future, route its output to either a final value or a
/// follow-up future, then finish the follow-up.
#[pin_project(project = StagedProj, project_replace = StagedOwn)]
enum Staged<Fut, F, Next> {
    First {
        #[pin]
        pending: Fut,
        transform: F,
    },
    Second {
        #[pin]
        next: Next,
    },
    Done,
}

impl<Fut: Future, F, Next: Future> Staged<Fut, F, Next> {
    fn new(pending: Fut, transform: F) -> Self {
        Self::First { pending, transform }
    }

    fn poll_with<Out>(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        route: impl FnOnce(Fut::Output, F) -> Either<Out, Next>,
        finish: impl FnOnce(Next::Output) -> Out,
    ) -> Poll<Out> {
        if let StagedProj::First { pending, .. } = self.as_mut().project() {
            let input = ready!(pending.poll(cx));
            let transform = match self.as_mut().project_replace(Self::Done) {
                StagedOwn::First { transform, .. } => transform,
                StagedOwn::Second { .. } | StagedOwn::Done => {
                    unreachable!("state checked before replace")
                }
            };
            match route(input, transform) {
                Either::Left(out) => return Poll::Ready(out),
                Either::Right(next) => self.set(Self::Second { next }),
            }
        }

        match self.as_mut().project() {
            StagedProj::Second { next } => {
                let output = ready!(next.poll(cx));
                self.set(Self::Done);
                Poll::Ready(finish(output))
            }
            StagedProj::Done => panic!("{POLLED_AFTER_COMPLETION}"),
            StagedProj::First { .. } => unreachable!("first stage resolved above"),
        }
    }
}

macro_rules! impl_debug {
    ($($name:ident < $($param:ident),+ >),+ $(,)?) => {$(
        impl<$($param),+> fmt::Debug for $name<$($param),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    )+};
}

/// Future for [`deferred::map`](super::map).
#[pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Map<Fut, F> {
    #[pin]
    inner: Then<Fut, F>,
}

impl<Fut: Future, F> Map<Fut, F> {
    pub(crate) fn new(pending: Fut, transform: F) -> Self {
        Self {
            inner: Then::new(pending, transform),
        }
    }
}

impl<Fut, F, T, U, E> Future for Map<Fut, F>
where
    Fut: Future<Output = Outcome<T, E>>,
    F: FnOnce(T) -> U,
{
    type Output = Outcome<U, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project()
            .inner
            .poll_with(cx, |outcome, transform| chain::map(transform, outcome))
    }
}

/// Future for [`deferred::map_error`](super::map_error).
#[pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct MapError<Fut, F> {
    #[pin]
    inner: Then<Fut, F>,
}

impl<Fut: Future, F> MapError<Fut, F> {
    pub(crate) fn new(pending: Fut, transform: F) -> Self {
        Self {
            inner: Then::new(pending, transform),
        }
    }
}

impl<Fut, F, T, E, E2> Future for MapError<Fut, F>
where
    Fut: Future<Output = Outcome<T, E>>,
    F: FnOnce(E) -> E2,
{
    type Output = Outcome<T, E2>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project()
            .inner
            .poll_with(cx, |outcome, transform| chain::map_error(transform, outcome))
    }
}

/// Future for [`deferred::unwrap`](super::unwrap).
#[pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Unwrapped<Fut, S, F> {
    #[pin]
    inner: Then<Fut, Unwrap<S, F>>,
}

impl<Fut: Future, S, F> Unwrapped<Fut, S, F> {
    pub(crate) fn new(pending: Fut, projection: Unwrap<S, F>) -> Self {
        Self {
            inner: Then::new(pending, projection),
        }
    }
}

impl<Fut, S, F, T, E, U> Future for Unwrapped<Fut, S, F>
where
    Fut: Future<Output = Outcome<T, E>>,
    S: Project<T, Output = U>,
    F: Project<E, Output = U>,
{
    type Output = U;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<U> {
        self.project()
            .inner
            .poll_with(cx, |outcome, projection| projection.apply(outcome))
    }
}

/// Future for [`deferred::flat_map`](super::flat_map).
///
/// `Next` is the future the transform's return value converts into.
#[pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct FlatMap<Fut, F, Next> {
    #[pin]
    inner: Staged<Fut, F, Next>,
}

impl<Fut: Future, F, Next: Future> FlatMap<Fut, F, Next> {
    pub(crate) fn new(pending: Fut, transform: F) -> Self {
        Self {
            inner: Staged::new(pending, transform),
        }
    }
}

impl<Fut, F, R, Next, T, U, E> Future for FlatMap<Fut, F, Next>
where
    Fut: Future<Output = Outcome<T, E>>,
    F: FnOnce(T) -> R,
    R: IntoFuture<Output = Outcome<U, E>, IntoFuture = Next>,
    Next: Future<Output = Outcome<U, E>>,
{
    type Output = Outcome<U, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().inner.poll_with(
            cx,
            |outcome, transform| match chain::map(transform, outcome) {
                Outcome::Success(next) => Either::Right(next.into_future()),
                Outcome::Failure(e) => Either::Left(Outcome::Failure(e)),
            },
            |resolved| resolved,
        )
    }
}

/// Future for [`deferred::flat_map_error`](super::flat_map_error).
#[pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct FlatMapError<Fut, F, Next> {
    #[pin]
    inner: Staged<Fut, F, Next>,
}

impl<Fut: Future, F, Next: Future> FlatMapError<Fut, F, Next> {
    pub(crate) fn new(pending: Fut, transform: F) -> Self {
        Self {
            inner: Staged::new(pending, transform),
        }
    }
}

impl<Fut, F, R, Next, T, E, E2> Future for FlatMapError<Fut, F, Next>
where
    Fut: Future<Output = Outcome<T, E>>,
    F: FnOnce(E) -> R,
    R: IntoFuture<Output = Outcome<T, E2>, IntoFuture = Next>,
    Next: Future<Output = Outcome<T, E2>>,
{
    type Output = Outcome<T, E2>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().inner.poll_with(
            cx,
            |outcome, transform| match chain::map_error(transform, outcome) {
                Outcome::Success(v) => Either::Left(Outcome::Success(v)),
                Outcome::Failure(next) => Either::Right(next.into_future()),
            },
            |resolved| resolved,
        )
    }
}

/// Future for [`deferred::map_async`](super::map_async).
#[pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct MapAsync<Fut, F, Next> {
    #[pin]
    inner: Staged<Fut, F, Next>,
}

impl<Fut: Future, F, Next: Future> MapAsync<Fut, F, Next> {
    pub(crate) fn new(pending: Fut, transform: F) -> Self {
        Self {
            inner: Staged::new(pending, transform),
        }
    }
}

impl<Fut, F, R, Next, T, U, E> Future for MapAsync<Fut, F, Next>
where
    Fut: Future<Output = Outcome<T, E>>,
    F: FnOnce(T) -> R,
    R: IntoFuture<Output = U, IntoFuture = Next>,
    Next: Future<Output = U>,
{
    type Output = Outcome<U, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().inner.poll_with(
            cx,
            |outcome, transform| match chain::map(transform, outcome) {
                Outcome::Success(next) => Either::Right(next.into_future()),
                Outcome::Failure(e) => Either::Left(Outcome::Failure(e)),
            },
            Outcome::Success,
        )
    }
}

/// Future for [`deferred::map_error_async`](super::map_error_async).
#[pin_project]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct MapErrorAsync<Fut, F, Next> {
    #[pin]
    inner: Staged<Fut, F, Next>,
}

impl<Fut: Future, F, Next: Future> MapErrorAsync<Fut, F, Next> {
    pub(crate) fn new(pending: Fut, transform: F) -> Self {
        Self {
            inner: Staged::new(pending, transform),
        }
    }
}

impl<Fut, F, R, Next, T, E, E2> Future for MapErrorAsync<Fut, F, Next>
where
    Fut: Future<Output = Outcome<T, E>>,
    F: FnOnce(E) -> R,
    R: IntoFuture<Output = E2, IntoFuture = Next>,
    Next: Future<Output = E2>,
{
    type Output = Outcome<T, E2>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().inner.poll_with(
            cx,
            |outcome, transform| match chain::map_error(transform, outcome) {
                Outcome::Success(v) => Either::Left(Outcome::Success(v)),
                Outcome::Failure(next) => Either::Right(next.into_future()),
            },
            Outcome::Failure,
        )
    }
}

impl_debug!(
    Map<Fut, F>,
    MapError<Fut, F>,
    Unwrapped<Fut, S, F>,
    FlatMap<Fut, F, Next>,
    FlatMapError<Fut, F, Next>,
    MapAsync<Fut, F, Next>,
    MapErrorAsync<Fut, F, Next>,
);
