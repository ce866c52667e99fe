//! # Lazy async success-or-failure computations
//!
//! This crate provides a deferred, re-runnable asynchronous computation type
//! with an explicit failure channel, so failable async logic reads like
//! straight-line code instead of manual chaining.
//!
//! A computation body interacts with the failure channel through the
//! [`Helpers`] capability (`lift`, `from_future`, `throw`) and propagates
//! short-circuits with `?`. Executing via [`AsyncResult::run`] funnels every
//! failure mode, explicit or not, into the `Err` slot of the resolved
//! `Result`; the run itself never panics.

pub mod fault;
pub mod option;
pub mod result;
pub mod short_circuit;
pub mod step;

pub use fault::Fault;
pub use option::AsyncOption;
pub use result::AsyncResult;
pub use short_circuit::{Abort, Helpers};
pub use step::Step;
