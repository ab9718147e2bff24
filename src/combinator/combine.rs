//! Combine: merge several outcomes into one.
//!
//! All inputs share a failure type. The combined outcome is either every
//! success payload, collected in input shape, or the first failure by
//! input position (key enumeration order for named inputs).
//!
//! # Input Shapes
//!
//! | Shape | Entry point | Output |
//! |-------|-------------|--------|
//! | [`OrderedResults`](CombineShape::OrderedResults) | [`combine`] on a tuple or `Vec` | `Outcome<(T1, T2, ..), E>` / `Outcome<Vec<T>, E>` |
//! | [`OrderedFunctions`](CombineShape::OrderedFunctions) | [`combine_fns`], [`combine_thunks`] | function returning the above |
//! | [`NamedResults`](CombineShape::NamedResults) | [`combine`] on a [`Named`] or `BTreeMap` | `Outcome<Named<K, T>, E>` |
//! | [`NamedFunctions`](CombineShape::NamedFunctions) | [`combine_named_fns`] | function returning the above |
//!
//! The shape is fixed by the input type, so dispatch happens at compile
//! time; [`Combine::SHAPE`] names it for diagnostics.
//!
//! # Semantics
//!
//! ```text
//! combine([o1, o2, ..., on]):
//!   acc ← []
//!   for oi in [o1, ..., on]:
//!     if oi is Failure(e): return Failure(e)
//!     acc.push(oi.value)
//!   return Success(acc)
//! ```
//!
//! Results are already built when passed in, so short-circuiting only
//! stops the fold. Function forms are lazier: functions after the first
//! failing one are never called.
//!
//! Tuple forms are implemented for 2 through 12 elements. `Vec` and named
//! forms accept any length; an empty input combines to an empty success.

use std::collections::BTreeMap;

use crate::tracing_compat::trace;
use crate::types::named::Named;
use crate::types::outcome::Outcome;

/// The four input shapes `combine` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineShape {
    /// A tuple or sequence of outcomes.
    OrderedResults,
    /// A tuple of functions, each returning an outcome.
    OrderedFunctions,
    /// A named map of outcomes.
    NamedResults,
    /// A named map of functions, each returning an outcome.
    NamedFunctions,
}

/// A collection of outcomes that can be merged into one.
pub trait Combine {
    /// The aggregated success payload.
    type Success;
    /// The shared failure payload.
    type Failure;
    /// The input shape this type represents.
    const SHAPE: CombineShape;

    /// Merges the outcomes: all successes, or the first failure.
    fn combine(self) -> Outcome<Self::Success, Self::Failure>;
}

/// Merges several outcomes into one.
///
/// # Example
/// ```
/// use railway::{combine, failure, named, success, Outcome};
///
/// let all: Outcome<(i32, &str), ()> = combine((success(1), success("two")));
/// assert_eq!(all, success((1, "two")));
///
/// let first: Outcome<Vec<i32>, &str> =
///     combine(vec![success(1), failure("e1"), failure("e2")]);
/// assert_eq!(first, failure("e1"));
///
/// let fields: Outcome<_, &str> = combine(named! { "a" => success(1), "b" => success(2) });
/// assert_eq!(fields, success(named! { "a" => 1, "b" => 2 }));
/// ```
pub fn combine<C: Combine>(input: C) -> Outcome<C::Success, C::Failure> {
    input.combine()
}

/// Merges an iterator of outcomes into any collection of successes.
///
/// Stops pulling from the iterator at the first failure.
pub fn combine_iter<I, T, E, C>(outcomes: I) -> Outcome<C, E>
where
    I: IntoIterator<Item = Outcome<T, E>>,
    C: FromIterator<T>,
{
    fold_ordered(CombineShape::OrderedResults, outcomes)
}

/// Left fold shared by every sequence-backed shape.
#[cfg_attr(not(feature = "tracing-integration"), allow(unused_variables))]
pub(crate) fn fold_ordered<I, T, E, C>(shape: CombineShape, outcomes: I) -> Outcome<C, E>
where
    I: IntoIterator<Item = Outcome<T, E>>,
    C: FromIterator<T>,
{
    let mut first_failure = None;
    let collected: C = outcomes
        .into_iter()
        .enumerate()
        .map_while(|(position, outcome)| match outcome {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(e) => {
                first_failure = Some((position, e));
                None
            }
        })
        .collect();

    match first_failure {
        Some((position, e)) => {
            trace!(shape = ?shape, position, "combine short-circuited on failure");
            Outcome::Failure(e)
        }
        None => Outcome::Success(collected),
    }
}

impl<T, E, C: FromIterator<T>> FromIterator<Outcome<T, E>> for Outcome<C, E> {
    fn from_iter<I: IntoIterator<Item = Outcome<T, E>>>(iter: I) -> Self {
        fold_ordered(CombineShape::OrderedResults, iter)
    }
}

impl<T, E> Combine for Vec<Outcome<T, E>> {
    type Success = Vec<T>;
    type Failure = E;
    const SHAPE: CombineShape = CombineShape::OrderedResults;

    fn combine(self) -> Outcome<Vec<T>, E> {
        fold_ordered(Self::SHAPE, self)
    }
}

impl<K: PartialEq, T, E> Combine for Named<K, Outcome<T, E>> {
    type Success = Named<K, T>;
    type Failure = E;
    const SHAPE: CombineShape = CombineShape::NamedResults;

    fn combine(self) -> Outcome<Named<K, T>, E> {
        fold_ordered(
            Self::SHAPE,
            self.into_iter().map(|(k, o)| o.map(|v| (k, v))),
        )
    }
}

impl<K: Ord, T, E> Combine for BTreeMap<K, Outcome<T, E>> {
    type Success = BTreeMap<K, T>;
    type Failure = E;
    const SHAPE: CombineShape = CombineShape::NamedResults;

    fn combine(self) -> Outcome<BTreeMap<K, T>, E> {
        fold_ordered(
            Self::SHAPE,
            self.into_iter().map(|(k, o)| o.map(|v| (k, v))),
        )
    }
}

/// A tuple of unary functions that can be called positionally and combined.
pub trait CombineFns<Args> {
    /// The aggregated success payload.
    type Success;
    /// The shared failure payload.
    type Failure;

    /// Calls each function with its argument, left to right, stopping at
    /// the first failure.
    fn call_combined(self, args: Args) -> Outcome<Self::Success, Self::Failure>;
}

/// A tuple of zero-argument functions that can be called and combined.
pub trait CombineThunks {
    /// The aggregated success payload.
    type Success;
    /// The shared failure payload.
    type Failure;

    /// Calls each function left to right, stopping at the first failure.
    fn call_combined(self) -> Outcome<Self::Success, Self::Failure>;
}

/// Combines a tuple of unary functions into one function over a tuple of
/// arguments.
///
/// # Example
/// ```
/// use railway::{combine_fns, failure, success, Outcome};
///
/// let parse = |s: &str| -> Outcome<i32, String> {
///     s.parse::<i32>().map_err(|_| format!("bad number: {s}")).into()
/// };
/// let nonempty = |s: &str| -> Outcome<String, String> {
///     if s.is_empty() { failure("empty".into()) } else { success(s.to_string()) }
/// };
///
/// let validate = combine_fns((parse, nonempty));
/// assert_eq!(validate(("7", "ok")), success((7, "ok".to_string())));
/// ```
pub fn combine_fns<Fs, Args>(fns: Fs) -> impl FnOnce(Args) -> Outcome<Fs::Success, Fs::Failure>
where
    Fs: CombineFns<Args>,
{
    move |args| fns.call_combined(args)
}

/// Combines a tuple of zero-argument functions into one.
pub fn combine_thunks<Fs>(fns: Fs) -> impl FnOnce() -> Outcome<Fs::Success, Fs::Failure>
where
    Fs: CombineThunks,
{
    move || fns.call_combined()
}

/// Combines a named map of unary functions into one function over a named
/// map of arguments.
///
/// Each function receives the argument stored under its own key, or
/// `A::default()` when the key is absent. Functions run in key order and
/// stop at the first failure. Arguments under unknown keys are ignored.
pub fn combine_named_fns<K, A, T, E, F>(
    fns: Named<K, F>,
) -> impl FnOnce(Named<K, A>) -> Outcome<Named<K, T>, E>
where
    K: PartialEq,
    A: Default,
    F: FnOnce(A) -> Outcome<T, E>,
{
    move |mut args| {
        let outcomes = fns.into_iter().map(move |(key, f)| {
            let arg = args.remove(&key).unwrap_or_default();
            f(arg).map(|v| (key, v))
        });
        fold_ordered(CombineShape::NamedFunctions, outcomes)
    }
}

macro_rules! impl_tuple_combine {
    ($($idx:tt $F:ident $A:ident $T:ident),+) => {
        impl<E, $($T),+> Combine for ($(Outcome<$T, E>,)+) {
            type Success = ($($T,)+);
            type Failure = E;
            const SHAPE: CombineShape = CombineShape::OrderedResults;

            fn combine(self) -> Outcome<Self::Success, E> {
                Outcome::Success(($(
                    match self.$idx {
                        Outcome::Success(v) => v,
                        Outcome::Failure(e) => {
                            trace!(shape = ?Self::SHAPE, position = $idx, "combine short-circuited on failure");
                            return Outcome::Failure(e);
                        }
                    },
                )+))
            }
        }

        impl<E, $($F, $A, $T),+> CombineFns<($($A,)+)> for ($($F,)+)
        where
            $($F: FnOnce($A) -> Outcome<$T, E>),+
        {
            type Success = ($($T,)+);
            type Failure = E;

            fn call_combined(self, args: ($($A,)+)) -> Outcome<Self::Success, E> {
                Outcome::Success(($(
                    match (self.$idx)(args.$idx) {
                        Outcome::Success(v) => v,
                        Outcome::Failure(e) => {
                            trace!(shape = ?CombineShape::OrderedFunctions, position = $idx, "combine short-circuited on failure");
                            return Outcome::Failure(e);
                        }
                    },
                )+))
            }
        }

        impl<E, $($F, $T),+> CombineThunks for ($($F,)+)
        where
            $($F: FnOnce() -> Outcome<$T, E>),+
        {
            type Success = ($($T,)+);
            type Failure = E;

            fn call_combined(self) -> Outcome<Self::Success, E> {
                Outcome::Success(($(
                    match (self.$idx)() {
                        Outcome::Success(v) => v,
                        Outcome::Failure(e) => {
                            trace!(shape = ?CombineShape::OrderedFunctions, position = $idx, "combine short-circuited on failure");
                            return Outcome::Failure(e);
                        }
                    },
                )+))
            }
        }
    };
}

impl_tuple_combine!(0 F0 A0 T0, 1 F1 A1 T1);
impl_tuple_combine!(0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2);
impl_tuple_combine!(0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2, 3 F3 A3 T3);
impl_tuple_combine!(0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2, 3 F3 A3 T3, 4 F4 A4 T4);
impl_tuple_combine!(0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2, 3 F3 A3 T3, 4 F4 A4 T4, 5 F5 A5 T5);
impl_tuple_combine!(
    0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2, 3 F3 A3 T3, 4 F4 A4 T4, 5 F5 A5 T5, 6 F6 A6 T6
);
impl_tuple_combine!(
    0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2, 3 F3 A3 T3, 4 F4 A4 T4, 5 F5 A5 T5, 6 F6 A6 T6,
    7 F7 A7 T7
);
impl_tuple_combine!(
    0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2, 3 F3 A3 T3, 4 F4 A4 T4, 5 F5 A5 T5, 6 F6 A6 T6,
    7 F7 A7 T7, 8 F8 A8 T8
);
impl_tuple_combine!(
    0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2, 3 F3 A3 T3, 4 F4 A4 T4, 5 F5 A5 T5, 6 F6 A6 T6,
    7 F7 A7 T7, 8 F8 A8 T8, 9 F9 A9 T9
);
impl_tuple_combine!(
    0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2, 3 F3 A3 T3, 4 F4 A4 T4, 5 F5 A5 T5, 6 F6 A6 T6,
    7 F7 A7 T7, 8 F8 A8 T8, 9 F9 A9 T9, 10 F10 A10 T10
);
impl_tuple_combine!(
    0 F0 A0 T0, 1 F1 A1 T1, 2 F2 A2 T2, 3 F3 A3 T3, 4 F4 A4 T4, 5 F5 A5 T5, 6 F6 A6 T6,
    7 F7 A7 T7, 8 F8 A8 T8, 9 F9 A9 T9, 10 F10 A10 T10, 11 F11 A11 T11
);
