//! Core abstractions for inverting black-box functions.
//!
//! Solvers in `fxinv-solvers` build on two pieces defined here:
//!
//! - [`Evaluate`]: a scalar function known only through evaluation, in
//!   either [`Scalar`] (one value per call) or [`Batched`] (many values per
//!   call) form
//! - [`Observer`]: receives solver events and optionally returns control
//!   actions

mod function;
mod observer;

pub use function::{Batched, Evaluate, Scalar};
pub use observer::Observer;
