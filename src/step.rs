//! Continuation input accepted by `and_then` / `or_else`
//!
//! A continuation may hand back an already-computed `Result`, another
//! deferred computation, or a bare future of a `Result`. The three shapes
//! are a closed union rather than a trait, so the accepted forms are visible
//! in the signature.

use crate::result::AsyncResult;
use futures::future::BoxFuture;
use std::future::Future;

/// One step of a chained computation.
pub enum Step<E, A> {
    /// An outcome that is already known.
    Done(Result<A, E>),
    /// A deferred computation to evaluate for the outcome.
    Deferred(AsyncResult<E, A>),
    /// A future that resolves to the outcome.
    Pending(BoxFuture<'static, Result<A, E>>),
}

impl<E, A> Step<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Wrap a bare future of a `Result` as a step.
    ///
    /// Coherence rules out a blanket `From` impl over futures, so this is
    /// the entry point for that shape.
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = Result<A, E>> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }

    pub(crate) async fn resolve(self) -> Result<A, E> {
        match self {
            Self::Done(result) => result,
            Self::Deferred(computation) => computation.eval().await,
            Self::Pending(future) => future.await,
        }
    }
}

impl<E, A> From<Result<A, E>> for Step<E, A> {
    fn from(result: Result<A, E>) -> Self {
        Self::Done(result)
    }
}

impl<E, A> From<AsyncResult<E, A>> for Step<E, A> {
    fn from(computation: AsyncResult<E, A>) -> Self {
        Self::Deferred(computation)
    }
}
