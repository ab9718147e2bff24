//! Terminal projection: collapse an outcome into one plain value.
//!
//! [`unwrap`] starts a projection with identity on both sides. Replace
//! either side with [`Unwrap::on_success`] / [`Unwrap::on_failure`], then
//! [`apply`](Unwrap::apply) it or turn it into a unary function with
//! [`into_fn`](Unwrap::into_fn).
//!
//! ```text
//! unwrap().apply(Success(v))                      = v
//! unwrap().on_success(f).apply(Success(v))        = f(v)
//! unwrap().on_failure(g).apply(Failure(e))        = g(e)
//! ```
//!
//! Both sides must land on the same output type. When they cannot (an
//! `Outcome<T, E>` with unrelated `T` and `E` and no projections), use
//! [`Outcome::into_either`](crate::Outcome::into_either) instead.
//!
//! Unlike `Option::unwrap`, this never panics.

use core::fmt;

use crate::types::outcome::Outcome;

/// A projection from one payload type into the unwrap output.
pub trait Project<In> {
    /// The projected type.
    type Output;

    /// Projects the payload.
    fn project(self, input: In) -> Self::Output;
}

/// The identity projection: the payload itself is the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<In> Project<In> for Identity {
    type Output = In;

    fn project(self, input: In) -> In {
        input
    }
}

/// A projection backed by a caller-supplied function.
#[derive(Clone, Copy)]
pub struct Projection<F>(F);

impl<F> fmt::Debug for Projection<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Projection(..)")
    }
}

impl<In, U, F> Project<In> for Projection<F>
where
    F: FnOnce(In) -> U,
{
    type Output = U;

    fn project(self, input: In) -> U {
        (self.0)(input)
    }
}

/// A pair of projections, one per track.
#[derive(Debug, Clone, Copy)]
#[must_use = "an Unwrap does nothing until applied to an outcome"]
pub struct Unwrap<S = Identity, F = Identity> {
    success: S,
    failure: F,
}

/// Starts a projection that returns both payloads unchanged.
///
/// # Example
/// ```
/// use railway::{failure, success, unwrap, Outcome};
///
/// let ok: Outcome<i32, i32> = success(1);
/// assert_eq!(unwrap().apply(ok), 1);
///
/// let err: Outcome<String, &str> = failure("x");
/// let shown = unwrap().on_failure(|e: &str| format!("err:{e}")).apply(err);
/// assert_eq!(shown, "err:x");
/// ```
pub const fn unwrap() -> Unwrap {
    Unwrap {
        success: Identity,
        failure: Identity,
    }
}

impl Default for Unwrap {
    fn default() -> Self {
        unwrap()
    }
}

impl<S, F> Unwrap<S, F> {
    /// Replaces the success-side projection.
    pub fn on_success<G>(self, projection: G) -> Unwrap<Projection<G>, F> {
        Unwrap {
            success: Projection(projection),
            failure: self.failure,
        }
    }

    /// Replaces the failure-side projection.
    pub fn on_failure<G>(self, projection: G) -> Unwrap<S, Projection<G>> {
        Unwrap {
            success: self.success,
            failure: Projection(projection),
        }
    }

    /// Collapses `outcome` using the projection for its track.
    pub fn apply<T, E, U>(self, outcome: Outcome<T, E>) -> U
    where
        S: Project<T, Output = U>,
        F: Project<E, Output = U>,
    {
        match outcome {
            Outcome::Success(v) => self.success.project(v),
            Outcome::Failure(e) => self.failure.project(e),
        }
    }

    /// Turns the projection into a unary function over outcomes.
    pub fn into_fn<T, E, U>(self) -> impl FnOnce(Outcome<T, E>) -> U
    where
        S: Project<T, Output = U>,
        F: Project<E, Output = U>,
    {
        move |outcome| self.apply(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::outcome::{failure, success};

    #[test]
    fn identity_extracts_success() {
        let o: Outcome<i32, i32> = success(1);
        assert_eq!(unwrap().apply(o), 1);
    }

    #[test]
    fn identity_extracts_failure() {
        let o: Outcome<&str, &str> = failure("e");
        assert_eq!(unwrap().apply(o), "e");
    }

    #[test]
    fn failure_projection_formats_error() {
        let o: Outcome<String, &str> = failure("x");
        let out = unwrap().on_failure(|e: &str| format!("err:{e}")).apply(o);
        assert_eq!(out, "err:x");
    }

    #[test]
    fn failure_projection_skipped_on_success() {
        let o: Outcome<String, &str> = success("fine".to_string());
        let out = unwrap()
            .on_failure(|_: &str| -> String { unreachable!("success track") })
            .apply(o);
        assert_eq!(out, "fine");
    }

    #[test]
    fn success_projection_increments() {
        let o: Outcome<i32, i32> = success(1);
        assert_eq!(unwrap().on_success(|v: i32| v + 1).apply(o), 2);
    }

    #[test]
    fn both_projections_to_common_type() {
        let render = || {
            unwrap()
                .on_success(|v: i32| format!("ok {v}"))
                .on_failure(|e: &str| format!("bad {e}"))
        };
        assert_eq!(render().apply(success::<i32, &str>(3)), "ok 3");
        assert_eq!(render().apply(failure::<i32, &str>("input")), "bad input");
    }

    #[test]
    fn into_fn_terminates_pipeline() {
        let to_len = unwrap()
            .on_success(|s: String| s.len())
            .on_failure(|_: ()| 0)
            .into_fn();
        let o: Outcome<String, ()> = success("four".to_string());
        assert_eq!(o.pipe(to_len), 4);
    }
}
