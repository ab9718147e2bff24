//! Synchronous combinators over [`Outcome`](crate::Outcome).
//!
//! - [`flat_map`] / [`flat_map_error`]: chain an outcome-returning step on one track
//! - [`map`] / [`map_error`]: transform the payload on one track
//! - [`unwrap`](mod@unwrap): collapse an outcome into a plain value
//! - [`combine`](mod@combine): merge several outcomes, first failure wins
//! - [`curried`]: transform-first forms returning unary functions
//!
//! Every combinator consumes its input and returns a new outcome. None of
//! them suspend, allocate on the single-outcome path, or catch panics.

pub mod chain;
pub mod combine;
pub mod curried;
pub mod unwrap;

pub use chain::{flat_map, flat_map_error, map, map_error};
pub use combine::{
    combine, combine_fns, combine_iter, combine_named_fns, combine_thunks, Combine, CombineFns,
    CombineShape, CombineThunks,
};
pub use unwrap::{unwrap, Identity, Project, Projection, Unwrap};
