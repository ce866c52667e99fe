//! Short-circuit protocol between a computation body and the driver
//!
//! A body interacts with the failure channel through [`Helpers`], the
//! capability handed to it at execution time. Each helper returns
//! `Result<T, Abort<E>>`; propagating with `?` aborts the rest of the body
//! and delivers the failure to the driver. Code that matches on the `Err`
//! instead of propagating it observes the abort and may handle it, the same
//! way a `catch` around a throwing call would.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

/// Opaque token carrying a failure out of a computation body.
///
/// Only the helpers produce this value and only the driver consumes it.
/// It has no public constructor and no accessor, so a body cannot forge an
/// abort or repack the payload without going back through a helper.
pub struct Abort<E> {
    error: E,
}

impl<E> Abort<E> {
    pub(crate) fn new(error: E) -> Self {
        Self { error }
    }

    pub(crate) fn into_error(self) -> E {
        self.error
    }
}

impl<E> fmt::Debug for Abort<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Abort(..)")
    }
}

/// Capability object passed to a computation body.
///
/// Zero-sized; exists so the failure channel is explicit in the body's
/// signature rather than ambient.
pub struct Helpers<E> {
    _marker: PhantomData<fn(E) -> E>,
}

impl<E> Helpers<E> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Lift a plain `Result` into the body.
    ///
    /// A success yields its payload; a failure yields the abort token, so
    /// `helpers.lift(r)?` short-circuits the remaining body on failure.
    pub fn lift<T>(&self, result: Result<T, E>) -> Result<T, Abort<E>> {
        result.map_err(Abort::new)
    }

    /// Await a future that yields a `Result`, lifting its outcome.
    ///
    /// Behaves like [`lift`](Self::lift) applied to the resolved value. A
    /// panic inside the awaited future unwinds to the driver boundary and is
    /// captured there as an unexpected failure.
    pub async fn from_future<T, F>(&self, future: F) -> Result<T, Abort<E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        self.lift(future.await)
    }

    /// Unconditionally abort the computation with the given failure.
    ///
    /// Returns only the failure arm; `helpers.throw(e)?` never continues.
    pub fn throw<T>(&self, error: E) -> Result<T, Abort<E>> {
        Err(Abort::new(error))
    }
}

impl<E> Clone for Helpers<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Helpers<E> {}
