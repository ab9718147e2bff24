//! Algebraic law property tests for railway combinators.
//!
//! # Laws Tested
//!
//! ## Functor Laws
//! - map(id) is identity on both tracks
//! - map(g . f) == map(g) . map(f)
//! - map_error mirrors both laws on the failure track
//!
//! ## Monad Laws
//! - left identity: flat_map(f, success(x)) == f(x)
//! - right identity: flat_map(success, o) == o
//! - associativity of flat_map
//!
//! ## Track Laws
//! - transforms for the inactive track are never called
//! - map never changes the tag
//!
//! ## Combine Laws
//! - combine of all successes collects payloads in order
//! - combine reports the earliest failure by position
//! - tuple and Vec combine agree
//!
//! ## Deferred Laws
//! - deferred combinators over ready inputs equal the synchronous ones
//! - both resolve orders produce the same combined outcome

mod common;

use common::*;
use futures_lite::future::block_on;
use proptest::prelude::*;
use railway::combinator::{self, curried};
use railway::{
    combine, combine_iter, deferred, failure, success, unwrap, CombineConfig, Outcome,
};
use std::cell::Cell;

// ============================================================================
// Arbitrary Implementations for proptest
// ============================================================================

/// Generate arbitrary outcomes with simple payloads.
fn arb_outcome() -> impl Strategy<Value = Outcome<i32, i32>> {
    prop_oneof![
        any::<i32>().prop_map(success),
        any::<i32>().prop_map(failure),
    ]
}

/// Generate a step function: succeeds with an offset or fails with a code.
fn arb_step() -> impl Strategy<Value = (bool, i32)> {
    (any::<bool>(), -1000i32..1000)
}

fn step((ok, k): (bool, i32)) -> impl Fn(i32) -> Outcome<i32, i32> {
    move |v| {
        if ok {
            success(v.wrapping_add(k))
        } else {
            failure(k)
        }
    }
}

/// Generate a list of outcomes paired with a poll delay for each.
fn arb_delayed_outcomes() -> impl Strategy<Value = Vec<(usize, Outcome<i32, i32>)>> {
    prop::collection::vec((0usize..5, arb_outcome()), 0..8)
}

// ============================================================================
// Functor Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(500))]

    /// LAW: map(id) is identity
    #[test]
    fn map_identity(o in arb_outcome()) {
        prop_assert_eq!(combinator::map(|v| v, o), o);
        prop_assert_eq!(combinator::map_error(|e| e, o), o);
    }

    /// LAW: map composes
    #[test]
    fn map_composition(o in arb_outcome(), a in -1000i32..1000, b in -1000i32..1000) {
        let f = move |v: i32| v.wrapping_add(a);
        let g = move |v: i32| v.wrapping_mul(b);
        let composed = combinator::map(|v| g(f(v)), o);
        let chained = combinator::map(g, combinator::map(f, o));
        prop_assert_eq!(composed, chained);
    }

    /// LAW: map never changes the tag
    #[test]
    fn map_preserves_tag(o in arb_outcome(), k in any::<i32>()) {
        prop_assert_eq!(combinator::map(|_| k, o).is_success(), o.is_success());
        prop_assert_eq!(combinator::map_error(|_| k, o).is_failure(), o.is_failure());
    }
}

// ============================================================================
// Monad Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(500))]

    /// LAW: left identity
    #[test]
    fn flat_map_left_identity(x in any::<i32>(), s in arb_step()) {
        prop_assert_eq!(combinator::flat_map(step(s), success(x)), step(s)(x));
    }

    /// LAW: right identity
    #[test]
    fn flat_map_right_identity(o in arb_outcome()) {
        prop_assert_eq!(combinator::flat_map(success, o), o);
    }

    /// LAW: associativity
    #[test]
    fn flat_map_associative(o in arb_outcome(), f in arb_step(), g in arb_step()) {
        let left = combinator::flat_map(step(g), combinator::flat_map(step(f), o));
        let right = combinator::flat_map(|v| combinator::flat_map(step(g), step(f)(v)), o);
        prop_assert_eq!(left, right);
    }

    /// LAW: map is flat_map followed by success
    #[test]
    fn map_is_flat_map_success(o in arb_outcome(), k in any::<i32>()) {
        let f = move |v: i32| v.wrapping_sub(k);
        prop_assert_eq!(
            combinator::map(f, o),
            combinator::flat_map(|v| success(f(v)), o)
        );
    }

    /// LAW: curried forms equal direct forms
    #[test]
    fn curried_equals_direct(o in arb_outcome(), s in arb_step()) {
        prop_assert_eq!(o.pipe(curried::flat_map(step(s))), combinator::flat_map(step(s), o));
        prop_assert_eq!(
            o.pipe(curried::map_error(|e: i32| e ^ 1)),
            combinator::map_error(|e| e ^ 1, o)
        );
    }
}

// ============================================================================
// Track Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(500))]

    /// LAW: transforms for the inactive track never run
    #[test]
    fn inactive_track_never_called(o in arb_outcome()) {
        let calls = Cell::new(0u32);
        let count = |v: i32| {
            calls.set(calls.get() + 1);
            v
        };

        let _ = combinator::map(count, o);
        let _ = combinator::map_error(count, o);
        let _ = combinator::flat_map(|v| success::<i32, i32>(count(v)), o);
        let _ = combinator::flat_map_error(|e| failure::<i32, i32>(count(e)), o);

        // Exactly one side ran for each pair.
        prop_assert_eq!(calls.get(), 2);
    }

    /// LAW: unwrap with identity returns whichever payload is present
    #[test]
    fn unwrap_identity_extracts(o in arb_outcome()) {
        let expected = match o {
            Outcome::Success(v) | Outcome::Failure(v) => v,
        };
        prop_assert_eq!(unwrap().apply(o), expected);
    }
}

// ============================================================================
// Combine Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(500))]

    /// LAW: combine returns the earliest failure or all successes in order
    #[test]
    fn combine_first_failure_or_all(outcomes in prop::collection::vec(arb_outcome(), 0..10)) {
        let expected = outcomes
            .iter()
            .find_map(|o| o.into_failure())
            .map_or_else(
                || success(outcomes.iter().filter_map(|o| o.into_success()).collect::<Vec<_>>()),
                failure,
            );
        prop_assert_eq!(combine(outcomes.clone()), expected.clone());
        prop_assert_eq!(combine_iter::<_, _, _, Vec<i32>>(outcomes), expected);
    }

    /// LAW: tuple combine agrees with Vec combine
    #[test]
    fn tuple_agrees_with_vec(a in arb_outcome(), b in arb_outcome(), c in arb_outcome()) {
        let tuple = combine((a, b, c)).map(|(x, y, z)| vec![x, y, z]);
        prop_assert_eq!(tuple, combine(vec![a, b, c]));
    }
}

// ============================================================================
// Deferred Laws
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(200))]

    /// LAW: deferred transparency over ready inputs
    #[test]
    fn deferred_ready_matches_sync(o in arb_outcome(), s in arb_step(), k in any::<i32>()) {
        prop_assert_eq!(
            block_on(deferred::map(move |v: i32| v ^ k, o)),
            combinator::map(|v| v ^ k, o)
        );
        prop_assert_eq!(
            block_on(deferred::flat_map(step(s), o)),
            combinator::flat_map(step(s), o)
        );
        prop_assert_eq!(
            block_on(deferred::map_error(move |e: i32| e ^ k, o)),
            combinator::map_error(|e| e ^ k, o)
        );
        prop_assert_eq!(
            block_on(deferred::flat_map_error(step(s), o)),
            combinator::flat_map_error(step(s), o)
        );
    }

    /// LAW: async transforms that resolve immediately equal the sync map forms
    #[test]
    fn deferred_async_ready_matches_sync(o in arb_outcome(), k in any::<i32>()) {
        prop_assert_eq!(
            block_on(deferred::map_async(move |v: i32| std::future::ready(v ^ k), o)),
            combinator::map(|v| v ^ k, o)
        );
        prop_assert_eq!(
            block_on(deferred::map_error_async(move |e: i32| std::future::ready(e ^ k), o)),
            combinator::map_error(|e| e ^ k, o)
        );
    }

    /// LAW: deferred unwrap over a ready input equals sync unwrap
    #[test]
    fn deferred_unwrap_matches_sync(o in arb_outcome(), k in any::<i32>()) {
        prop_assert_eq!(block_on(deferred::unwrap(unwrap(), o)), unwrap().apply(o));

        let project = move || {
            unwrap()
                .on_success(move |v: i32| v.wrapping_add(k))
                .on_failure(move |e: i32| e.wrapping_sub(k))
        };
        prop_assert_eq!(block_on(deferred::unwrap(project(), o)), project().apply(o));
    }

    /// LAW: resolve order never changes the combined outcome
    #[test]
    fn resolve_orders_agree(inputs in arb_delayed_outcomes()) {
        let expected = combine(inputs.iter().map(|(_, o)| *o).collect::<Vec<_>>());

        for config in [CombineConfig::sequential(), CombineConfig::concurrent()] {
            let pending: Vec<_> = inputs.iter().map(|(polls, o)| delayed(*polls, *o)).collect();
            let resolved = block_on(deferred::combine_with(config, pending));
            prop_assert_eq!(resolved, expected.clone());
        }
    }
}
