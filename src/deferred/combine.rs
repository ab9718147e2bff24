//! Deferred combine: merge several pending outcomes into one.
//!
//! Inputs are anything that converts into a future resolving to an
//! [`Outcome`], so plain outcomes and futures mix freely. The combined
//! outcome follows the synchronous [`combine`](crate::combine) rules: every
//! success in input shape, or the failure at the earliest position.
//!
//! # Resolve Order
//!
//! [`ResolveOrder::Sequential`] (the default) awaits inputs one at a time in
//! position order and stops at the first failure; later inputs are never
//! polled. [`ResolveOrder::Concurrent`] polls every input on each wake and
//! decides as soon as the earliest undecided position is known:
//!
//! ```text
//! scan positions 0..n:
//!   Pending  -> wait
//!   Failure  -> done, that failure
//!   Success  -> continue
//! all Success -> done, all payloads
//! ```
//!
//! A later input that fails first in time never wins over an earlier one
//! that fails afterwards. Inputs still pending at decision time are dropped.
//!
//! Function forms call their functions lazily in sequential order; in
//! concurrent order every function is called up front.

use std::collections::BTreeMap;
use std::future::{poll_fn, Future, IntoFuture};
use std::pin::{pin, Pin};
use std::task::{Context, Poll};

use pin_project::pin_project;

use crate::combinator::combine::fold_ordered;
use crate::combinator::CombineShape;
use crate::config::{CombineConfig, ResolveOrder};
use crate::tracing_compat::{debug, trace};
use crate::types::named::Named;
use crate::types::outcome::Outcome;

/// Boxed, non-`Send` future returned by the deferred function forms.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

// ============================================================================
// Slots
// ============================================================================

/// Resolution state of one input, as seen by the decision scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotState {
    Pending,
    Succeeded,
    Failed,
    Taken,
}

/// One input of a concurrent combine: pending, resolved, or taken.
#[pin_project(project = SlotProj, project_replace = SlotOwn)]
pub(crate) enum Slot<Fut: Future> {
    Pending {
        #[pin]
        future: Fut,
    },
    Ready {
        output: Fut::Output,
    },
    Taken,
}

impl<Fut, T, E> Slot<Fut>
where
    Fut: Future<Output = Outcome<T, E>>,
{
    pub(crate) fn new(future: Fut) -> Self {
        Self::Pending { future }
    }

    /// Polls the input if it is still pending and reports its state.
    pub(crate) fn poll_slot(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> SlotState {
        if let SlotProj::Pending { future } = self.as_mut().project() {
            match future.poll(cx) {
                Poll::Ready(output) => self.set(Self::Ready { output }),
                Poll::Pending => return SlotState::Pending,
            }
        }
        match self.project() {
            SlotProj::Ready { output } if output.is_success() => SlotState::Succeeded,
            SlotProj::Ready { .. } => SlotState::Failed,
            SlotProj::Taken => SlotState::Taken,
            SlotProj::Pending { .. } => SlotState::Pending,
        }
    }

    /// Takes the resolved outcome, leaving the slot empty.
    pub(crate) fn take(self: Pin<&mut Self>) -> Option<Outcome<T, E>> {
        match self.project_replace(Self::Taken) {
            SlotOwn::Ready { output } => Some(output),
            SlotOwn::Pending { .. } | SlotOwn::Taken => None,
        }
    }
}

/// Length of the decided prefix, or `None` while an earlier position is
/// still pending.
///
/// The prefix ends at the first failure, or covers every slot when all
/// succeeded.
pub(crate) fn decided_prefix(states: &[SlotState]) -> Option<usize> {
    for (position, state) in states.iter().enumerate() {
        match state {
            SlotState::Pending => return None,
            SlotState::Failed => return Some(position + 1),
            SlotState::Succeeded | SlotState::Taken => {}
        }
    }
    Some(states.len())
}

// ============================================================================
// Ordered join
// ============================================================================

/// Polls a homogeneous list of inputs together and resolves to the decided
/// prefix of their outcomes.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub(crate) struct JoinPrefix<Fut: Future> {
    slots: Vec<Slot<Pin<Box<Fut>>>>,
    states: Vec<SlotState>,
}

impl<Fut, T, E> JoinPrefix<Fut>
where
    Fut: Future<Output = Outcome<T, E>>,
{
    pub(crate) fn new(futures: Vec<Fut>) -> Self {
        let slots: Vec<_> = futures
            .into_iter()
            .map(|f| Slot::new(Box::pin(f)))
            .collect();
        let states = vec![SlotState::Pending; slots.len()];
        Self { slots, states }
    }
}

impl<Fut, T, E> Future for JoinPrefix<Fut>
where
    Fut: Future<Output = Outcome<T, E>>,
{
    type Output = Vec<Outcome<T, E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        for (slot, state) in this.slots.iter_mut().zip(this.states.iter_mut()) {
            if *state == SlotState::Pending {
                *state = Pin::new(slot).poll_slot(cx);
            }
        }

        let Some(len) = decided_prefix(&this.states) else {
            return Poll::Pending;
        };
        let resolved: Vec<_> = this
            .slots
            .iter_mut()
            .take(len)
            .filter_map(|slot| Pin::new(slot).take())
            .collect();
        trace!(
            inputs = this.slots.len(),
            decided = len,
            "concurrent combine decided"
        );
        this.slots.clear();
        Poll::Ready(resolved)
    }
}

/// Resolves inputs in `order` and returns the decided prefix: every outcome
/// up to and including the first failure by position.
pub(crate) async fn resolve_prefix<Fut, T, E>(
    futures: Vec<Fut>,
    order: ResolveOrder,
) -> Vec<Outcome<T, E>>
where
    Fut: Future<Output = Outcome<T, E>>,
{
    match order {
        ResolveOrder::Sequential => {
            let mut resolved = Vec::with_capacity(futures.len());
            for future in futures {
                let outcome = future.await;
                let stop = outcome.is_failure();
                resolved.push(outcome);
                if stop {
                    break;
                }
            }
            resolved
        }
        ResolveOrder::Concurrent => JoinPrefix::new(futures).await,
    }
}

// ============================================================================
// Traits
// ============================================================================

/// A collection of pending outcomes that can be merged into one.
pub trait DeferredCombine {
    /// The aggregated success payload.
    type Success;
    /// The shared failure payload.
    type Failure;
    /// The input shape this type represents.
    const SHAPE: CombineShape;

    /// Resolves the inputs in the configured order and merges them.
    fn resolve(
        self,
        config: CombineConfig,
    ) -> impl Future<Output = Outcome<Self::Success, Self::Failure>>;
}

/// A tuple of unary functions returning pending outcomes.
pub trait DeferredCombineFns<Args> {
    /// The aggregated success payload.
    type Success;
    /// The shared failure payload.
    type Failure;

    /// Calls each function with its positional argument and merges the
    /// resolved outcomes.
    fn resolve_with(
        self,
        args: Args,
        config: CombineConfig,
    ) -> impl Future<Output = Outcome<Self::Success, Self::Failure>>;
}

/// A tuple of zero-argument functions returning pending outcomes.
pub trait DeferredCombineThunks {
    /// The aggregated success payload.
    type Success;
    /// The shared failure payload.
    type Failure;

    /// Calls each function and merges the resolved outcomes.
    fn resolve_with(
        self,
        config: CombineConfig,
    ) -> impl Future<Output = Outcome<Self::Success, Self::Failure>>;
}

// ============================================================================
// Entry points
// ============================================================================

/// Merges pending outcomes using the default [`CombineConfig`].
///
/// # Example
/// ```
/// use railway::{deferred, success};
///
/// let merged = deferred::combine((success::<i32, &str>(1), async { success(2) }));
/// assert_eq!(futures_lite::future::block_on(merged), success((1, 2)));
/// ```
pub fn combine<C: DeferredCombine>(
    input: C,
) -> impl Future<Output = Outcome<C::Success, C::Failure>> {
    input.resolve(CombineConfig::default())
}

/// Merges pending outcomes with an explicit configuration.
pub fn combine_with<C: DeferredCombine>(
    config: CombineConfig,
    input: C,
) -> impl Future<Output = Outcome<C::Success, C::Failure>> {
    input.resolve(config)
}

/// Combines a tuple of unary functions returning pending outcomes into one
/// function over a tuple of arguments.
pub fn combine_fns<'a, Fs, Args>(
    fns: Fs,
) -> impl FnOnce(Args) -> LocalBoxFuture<'a, Outcome<Fs::Success, Fs::Failure>>
where
    Fs: DeferredCombineFns<Args> + 'a,
    Args: 'a,
{
    combine_fns_with(CombineConfig::default(), fns)
}

/// [`combine_fns`] with an explicit configuration.
pub fn combine_fns_with<'a, Fs, Args>(
    config: CombineConfig,
    fns: Fs,
) -> impl FnOnce(Args) -> LocalBoxFuture<'a, Outcome<Fs::Success, Fs::Failure>>
where
    Fs: DeferredCombineFns<Args> + 'a,
    Args: 'a,
{
    move |args| Box::pin(fns.resolve_with(args, config))
}

/// Combines a tuple of zero-argument functions returning pending outcomes.
pub fn combine_thunks<'a, Fs>(
    fns: Fs,
) -> impl FnOnce() -> LocalBoxFuture<'a, Outcome<Fs::Success, Fs::Failure>>
where
    Fs: DeferredCombineThunks + 'a,
{
    combine_thunks_with(CombineConfig::default(), fns)
}

/// [`combine_thunks`] with an explicit configuration.
pub fn combine_thunks_with<'a, Fs>(
    config: CombineConfig,
    fns: Fs,
) -> impl FnOnce() -> LocalBoxFuture<'a, Outcome<Fs::Success, Fs::Failure>>
where
    Fs: DeferredCombineThunks + 'a,
{
    move || Box::pin(fns.resolve_with(config))
}

/// Combines a named map of functions returning pending outcomes into one
/// function over a named map of arguments.
///
/// Each function receives the argument under its own key, or
/// `A::default()` when the key is absent.
pub fn combine_named_fns<'a, K, A, F, P, T, E>(
    fns: Named<K, F>,
) -> impl FnOnce(Named<K, A>) -> LocalBoxFuture<'a, Outcome<Named<K, T>, E>>
where
    K: PartialEq + 'a,
    A: Default + 'a,
    F: FnOnce(A) -> P + 'a,
    P: IntoFuture<Output = Outcome<T, E>> + 'a,
    T: 'a,
    E: 'a,
{
    combine_named_fns_with(CombineConfig::default(), fns)
}

/// [`combine_named_fns`] with an explicit configuration.
#[cfg_attr(not(feature = "tracing-integration"), allow(unused_variables))]
pub fn combine_named_fns_with<'a, K, A, F, P, T, E>(
    config: CombineConfig,
    fns: Named<K, F>,
) -> impl FnOnce(Named<K, A>) -> LocalBoxFuture<'a, Outcome<Named<K, T>, E>>
where
    K: PartialEq + 'a,
    A: Default + 'a,
    F: FnOnce(A) -> P + 'a,
    P: IntoFuture<Output = Outcome<T, E>> + 'a,
    T: 'a,
    E: 'a,
{
    move |mut args: Named<K, A>| {
        Box::pin(async move {
            debug!(
                order = %config.order,
                shape = ?CombineShape::NamedFunctions,
                inputs = fns.len(),
                "resolving deferred combine"
            );
            match config.order {
                ResolveOrder::Sequential => {
                    let mut collected = Named::with_capacity(fns.len());
                    for (position, (key, f)) in fns.into_iter().enumerate() {
                        let arg = args.remove(&key).unwrap_or_default();
                        match f(arg).await {
                            Outcome::Success(v) => {
                                collected.insert(key, v);
                            }
                            Outcome::Failure(e) => {
                                trace!(
                                    shape = ?CombineShape::NamedFunctions,
                                    position,
                                    "combine short-circuited on failure"
                                );
                                return Outcome::Failure(e);
                            }
                        }
                    }
                    Outcome::Success(collected)
                }
                ResolveOrder::Concurrent => {
                    let pending: Named<K, P::IntoFuture> = fns
                        .into_iter()
                        .map(|(key, f)| {
                            let arg = args.remove(&key).unwrap_or_default();
                            (key, f(arg).into_future())
                        })
                        .collect();
                    resolve_named(CombineShape::NamedFunctions, pending, config.order).await
                }
            }
        }) as LocalBoxFuture<'a, _>
    }
}

async fn resolve_named<K, P, T, E, C>(
    shape: CombineShape,
    input: impl IntoIterator<Item = (K, P)>,
    order: ResolveOrder,
) -> Outcome<C, E>
where
    P: IntoFuture<Output = Outcome<T, E>>,
    C: FromIterator<(K, T)>,
{
    let (keys, pending): (Vec<K>, Vec<P::IntoFuture>) = input
        .into_iter()
        .map(|(key, p)| (key, p.into_future()))
        .unzip();
    let resolved = resolve_prefix(pending, order).await;
    fold_ordered(
        shape,
        keys.into_iter()
            .zip(resolved)
            .map(|(key, outcome)| outcome.map(|v| (key, v))),
    )
}

// ============================================================================
// Sequence impls
// ============================================================================

impl<P, T, E> DeferredCombine for Vec<P>
where
    P: IntoFuture<Output = Outcome<T, E>>,
{
    type Success = Vec<T>;
    type Failure = E;
    const SHAPE: CombineShape = CombineShape::OrderedResults;

    fn resolve(self, config: CombineConfig) -> impl Future<Output = Outcome<Vec<T>, E>> {
        let pending: Vec<P::IntoFuture> = self.into_iter().map(IntoFuture::into_future).collect();
        async move {
            debug!(
                order = %config.order,
                shape = ?Self::SHAPE,
                inputs = pending.len(),
                "resolving deferred combine"
            );
            let resolved = resolve_prefix(pending, config.order).await;
            fold_ordered(Self::SHAPE, resolved)
        }
    }
}

impl<K, P, T, E> DeferredCombine for Named<K, P>
where
    K: PartialEq,
    P: IntoFuture<Output = Outcome<T, E>>,
{
    type Success = Named<K, T>;
    type Failure = E;
    const SHAPE: CombineShape = CombineShape::NamedResults;

    fn resolve(self, config: CombineConfig) -> impl Future<Output = Outcome<Named<K, T>, E>> {
        async move {
            debug!(
                order = %config.order,
                shape = ?Self::SHAPE,
                inputs = self.len(),
                "resolving deferred combine"
            );
            resolve_named(Self::SHAPE, self, config.order).await
        }
    }
}

impl<K, P, T, E> DeferredCombine for BTreeMap<K, P>
where
    K: Ord,
    P: IntoFuture<Output = Outcome<T, E>>,
{
    type Success = BTreeMap<K, T>;
    type Failure = E;
    const SHAPE: CombineShape = CombineShape::NamedResults;

    fn resolve(self, config: CombineConfig) -> impl Future<Output = Outcome<BTreeMap<K, T>, E>> {
        async move {
            debug!(
                order = %config.order,
                shape = ?Self::SHAPE,
                inputs = self.len(),
                "resolving deferred combine"
            );
            resolve_named(Self::SHAPE, self, config.order).await
        }
    }
}

// ============================================================================
// Tuple impls
// ============================================================================

macro_rules! impl_tuple_deferred_combine {
    ($n:expr; $($idx:tt $P:ident $F:ident $A:ident $T:ident $slot:ident),+) => {
        impl<E, $($P, $T),+> DeferredCombine for ($($P,)+)
        where
            $($P: IntoFuture<Output = Outcome<$T, E>>),+
        {
            type Success = ($($T,)+);
            type Failure = E;
            const SHAPE: CombineShape = CombineShape::OrderedResults;

            fn resolve(self, config: CombineConfig) -> impl Future<Output = Outcome<Self::Success, E>> {
                let ($($slot,)+) = self;
                async move {
                    debug!(order = %config.order, shape = ?Self::SHAPE, inputs = $n, "resolving deferred combine");
                    match config.order {
                        ResolveOrder::Sequential => Outcome::Success(($(
                            match $slot.await {
                                Outcome::Success(v) => v,
                                Outcome::Failure(e) => {
                                    trace!(shape = ?Self::SHAPE, position = $idx, "combine short-circuited on failure");
                                    return Outcome::Failure(e);
                                }
                            },
                        )+)),
                        ResolveOrder::Concurrent => {
                            $( let mut $slot = pin!(Slot::new($slot.into_future())); )+
                            poll_fn(|cx| {
                                let states = [$($slot.as_mut().poll_slot(cx)),+];
                                if decided_prefix(&states).is_none() {
                                    return Poll::Pending;
                                }
                                Poll::Ready(Outcome::Success(($(
                                    match $slot.as_mut().take() {
                                        Some(Outcome::Success(v)) => v,
                                        Some(Outcome::Failure(e)) => {
                                            trace!(shape = ?Self::SHAPE, position = $idx, "concurrent combine decided on failure");
                                            return Poll::Ready(Outcome::Failure(e));
                                        }
                                        None => unreachable!("position {} undecided after scan", $idx),
                                    },
                                )+)))
                            })
                            .await
                        }
                    }
                }
            }
        }

        impl<E, $($F, $A, $P, $T),+> DeferredCombineFns<($($A,)+)> for ($($F,)+)
        where
            $($F: FnOnce($A) -> $P, $P: IntoFuture<Output = Outcome<$T, E>>),+
        {
            type Success = ($($T,)+);
            type Failure = E;

            fn resolve_with(
                self,
                args: ($($A,)+),
                config: CombineConfig,
            ) -> impl Future<Output = Outcome<Self::Success, E>> {
                async move {
                    match config.order {
                        ResolveOrder::Sequential => Outcome::Success(($(
                            match (self.$idx)(args.$idx).await {
                                Outcome::Success(v) => v,
                                Outcome::Failure(e) => {
                                    trace!(shape = ?CombineShape::OrderedFunctions, position = $idx, "combine short-circuited on failure");
                                    return Outcome::Failure(e);
                                }
                            },
                        )+)),
                        ResolveOrder::Concurrent => {
                            ($((self.$idx)(args.$idx),)+).resolve(config).await
                        }
                    }
                }
            }
        }

        impl<E, $($F, $P, $T),+> DeferredCombineThunks for ($($F,)+)
        where
            $($F: FnOnce() -> $P, $P: IntoFuture<Output = Outcome<$T, E>>),+
        {
            type Success = ($($T,)+);
            type Failure = E;

            fn resolve_with(self, config: CombineConfig) -> impl Future<Output = Outcome<Self::Success, E>> {
                async move {
                    match config.order {
                        ResolveOrder::Sequential => Outcome::Success(($(
                            match (self.$idx)().await {
                                Outcome::Success(v) => v,
                                Outcome::Failure(e) => {
                                    trace!(shape = ?CombineShape::OrderedFunctions, position = $idx, "combine short-circuited on failure");
                                    return Outcome::Failure(e);
                                }
                            },
                        )+)),
                        ResolveOrder::Concurrent => ($((self.$idx)(),)+).resolve(config).await,
                    }
                }
            }
        }
    };
}

impl_tuple_deferred_combine!(2; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1);
impl_tuple_deferred_combine!(3; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2);
impl_tuple_deferred_combine!(
    4; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2, 3 P3 F3 A3 T3 s3
);
impl_tuple_deferred_combine!(
    5; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2, 3 P3 F3 A3 T3 s3, 4 P4 F4 A4 T4 s4
);
impl_tuple_deferred_combine!(
    6; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2, 3 P3 F3 A3 T3 s3, 4 P4 F4 A4 T4 s4,
    5 P5 F5 A5 T5 s5
);
impl_tuple_deferred_combine!(
    7; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2, 3 P3 F3 A3 T3 s3, 4 P4 F4 A4 T4 s4,
    5 P5 F5 A5 T5 s5, 6 P6 F6 A6 T6 s6
);
impl_tuple_deferred_combine!(
    8; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2, 3 P3 F3 A3 T3 s3, 4 P4 F4 A4 T4 s4,
    5 P5 F5 A5 T5 s5, 6 P6 F6 A6 T6 s6, 7 P7 F7 A7 T7 s7
);
impl_tuple_deferred_combine!(
    9; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2, 3 P3 F3 A3 T3 s3, 4 P4 F4 A4 T4 s4,
    5 P5 F5 A5 T5 s5, 6 P6 F6 A6 T6 s6, 7 P7 F7 A7 T7 s7, 8 P8 F8 A8 T8 s8
);
impl_tuple_deferred_combine!(
    10; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2, 3 P3 F3 A3 T3 s3, 4 P4 F4 A4 T4 s4,
    5 P5 F5 A5 T5 s5, 6 P6 F6 A6 T6 s6, 7 P7 F7 A7 T7 s7, 8 P8 F8 A8 T8 s8, 9 P9 F9 A9 T9 s9
);
impl_tuple_deferred_combine!(
    11; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2, 3 P3 F3 A3 T3 s3, 4 P4 F4 A4 T4 s4,
    5 P5 F5 A5 T5 s5, 6 P6 F6 A6 T6 s6, 7 P7 F7 A7 T7 s7, 8 P8 F8 A8 T8 s8, 9 P9 F9 A9 T9 s9,
    10 P10 F10 A10 T10 s10
);
impl_tuple_deferred_combine!(
    12; 0 P0 F0 A0 T0 s0, 1 P1 F1 A1 T1 s1, 2 P2 F2 A2 T2 s2, 3 P3 F3 A3 T3 s3, 4 P4 F4 A4 T4 s4,
    5 P5 F5 A5 T5 s5, 6 P6 F6 A6 T6 s6, 7 P7 F7 A7 T7 s7, 8 P8 F8 A8 T8 s8, 9 P9 F9 A9 T9 s9,
    10 P10 F10 A10 T10 s10, 11 P11 F11 A11 T11 s11
);
