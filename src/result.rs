//! Lazy, re-runnable async computations with an explicit failure channel

use crate::fault::Fault;
use crate::option::AsyncOption;
use crate::short_circuit::{Abort, Helpers};
use crate::step::Step;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::{Future, IntoFuture};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

type Body<E, A> =
    dyn Fn(Helpers<E>) -> BoxFuture<'static, Result<A, Abort<E>>> + Send + Sync;

/// A deferred asynchronous computation that resolves to `Result<A, E>`.
///
/// The body is stored, not invoked, at construction time. Every call to
/// [`run`](Self::run) invokes it afresh, so side effects inside the body
/// repeat on each execution; nothing is memoized. Combinators never touch
/// the stored body either: they wrap it in a new one, and the continuation
/// is not constructed until the receiver has fully resolved.
///
/// Three failure channels funnel into the same `Err` slot of the resolved
/// value: an explicit failure fed through a [`Helpers`] call, a panic raised
/// anywhere inside the body, and a failed sub-operation awaited via
/// [`Helpers::from_future`]. `run` itself never panics.
///
/// ```no_run
/// use async_result::AsyncResult;
///
/// # async fn demo() {
/// let computation: AsyncResult<String, i32> =
///     AsyncResult::new(|h| async move { h.lift(Ok(5)) });
/// assert_eq!(computation.map(|v| v + 1).run().await, Ok(6));
/// # }
/// ```
pub struct AsyncResult<E, A> {
    body: Arc<Body<E, A>>,
}

impl<E, A> Clone for AsyncResult<E, A> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
        }
    }
}

impl<E, A> AsyncResult<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Create a computation from a body closure.
    ///
    /// The body receives the [`Helpers`] capability and resolves to the
    /// success value; failures leave through the helpers (or by panicking).
    pub fn new<F, Fut>(body: F) -> Self
    where
        F: Fn(Helpers<E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<A, Abort<E>>> + Send + 'static,
    {
        Self {
            body: Arc::new(move |helpers| Box::pin(body(helpers))),
        }
    }

    /// Computation that resolves immediately to the given `Result`.
    pub fn lift(result: Result<A, E>) -> Self
    where
        A: Clone + Sync,
        E: Clone + Sync,
    {
        Self::new(move |helpers| {
            let result = result.clone();
            async move { helpers.lift(result) }
        })
    }

    /// Wrap a constructor of futures that yield a `Result` directly.
    ///
    /// `op` is called once per execution, so each run gets a fresh future.
    pub fn from_future<F, Fut>(op: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<A, E>> + Send + 'static,
    {
        Self::new(move |helpers| {
            let future = op();
            async move { helpers.from_future(future).await }
        })
    }

    /// Wrap a constructor of plain futures; resolving is success.
    ///
    /// A panic inside the future is captured by [`run`](Self::run) as an
    /// unexpected failure, the same as anywhere else in a body.
    pub fn lift_future<F, Fut>(op: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::new(move |_helpers| {
            let future = op();
            async move { Ok(future.await) }
        })
    }

    /// Execute the computation.
    ///
    /// Invokes the stored body afresh and resolves to its outcome, in
    /// priority order: a short-circuit raised through a helper resolves to
    /// that failure; a panic anywhere inside the body resolves to
    /// `Err(E::from(Fault))`; otherwise the body's value resolves as `Ok`.
    ///
    /// The returned future never panics; every failure mode is delivered
    /// through the resolved `Err`.
    pub async fn run(&self) -> Result<A, E>
    where
        E: From<Fault>,
    {
        log::trace!("starting execution");
        match AssertUnwindSafe(self.eval()).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => {
                let fault = Fault::from_panic(payload);
                log::debug!("captured panic as failure: {fault}");
                Err(E::from(fault))
            }
        }
    }

    // Driver without the unwind boundary. Combinators evaluate the receiver
    // through this so a panic surfaces once, at the outermost `run`.
    pub(crate) fn eval(&self) -> BoxFuture<'static, Result<A, E>> {
        let body = Arc::clone(&self.body);
        // The body closure is invoked inside the future so that a
        // synchronous panic during future construction still lands within
        // the driver's unwind boundary.
        Box::pin(async move {
            match (body)(Helpers::new()).await {
                Ok(value) => Ok(value),
                Err(abort) => Err(abort.into_error()),
            }
        })
    }

    /// Transform the success value; a failure passes through untouched and
    /// `f` is not invoked.
    pub fn map<B, F>(&self, f: F) -> AsyncResult<E, B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let receiver = self.clone();
        let f = Arc::new(f);
        AsyncResult::new(move |helpers| {
            let receiver = receiver.clone();
            let f = Arc::clone(&f);
            async move { helpers.lift(receiver.eval().await.map(|value| (*f)(value))) }
        })
    }

    /// [`map`](Self::map) with an asynchronous transform; `f`'s future is
    /// awaited before the computation resolves.
    pub fn map_async<B, F, Fut>(&self, f: F) -> AsyncResult<E, B>
    where
        B: Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = B> + Send + 'static,
    {
        let receiver = self.clone();
        let f = Arc::new(f);
        AsyncResult::new(move |helpers| {
            let receiver = receiver.clone();
            let f = Arc::clone(&f);
            async move {
                match receiver.eval().await {
                    Ok(value) => Ok((*f)(value).await),
                    Err(error) => helpers.throw(error),
                }
            }
        })
    }

    /// Transform the failure value; a success passes through untouched.
    pub fn map_err<E2, F>(&self, f: F) -> AsyncResult<E2, A>
    where
        E2: Send + 'static,
        F: Fn(E) -> E2 + Send + Sync + 'static,
    {
        let receiver = self.clone();
        let f = Arc::new(f);
        AsyncResult::new(move |helpers| {
            let receiver = receiver.clone();
            let f = Arc::clone(&f);
            async move { helpers.lift(receiver.eval().await.map_err(|error| (*f)(error))) }
        })
    }

    /// Sequence a continuation after a success, adopting its outcome.
    ///
    /// The continuation may return any [`Step`] shape: a plain `Result`, an
    /// `AsyncResult`, or a future built with [`Step::future`]. On failure
    /// the continuation is never invoked.
    pub fn and_then<B, F, S>(&self, f: F) -> AsyncResult<E, B>
    where
        B: Send + 'static,
        F: Fn(A) -> S + Send + Sync + 'static,
        S: Into<Step<E, B>>,
    {
        let receiver = self.clone();
        let f = Arc::new(f);
        AsyncResult::new(move |helpers| {
            let receiver = receiver.clone();
            let f = Arc::clone(&f);
            async move {
                match receiver.eval().await {
                    Ok(value) => {
                        let step: Step<E, B> = (*f)(value).into();
                        helpers.lift(step.resolve().await)
                    }
                    Err(error) => helpers.throw(error),
                }
            }
        })
    }

    /// Recover a failure into a new computation; a success passes through.
    pub fn or_else<E2, F, S>(&self, f: F) -> AsyncResult<E2, A>
    where
        E2: Send + 'static,
        F: Fn(E) -> S + Send + Sync + 'static,
        S: Into<Step<E2, A>>,
    {
        let receiver = self.clone();
        let f = Arc::new(f);
        AsyncResult::new(move |helpers| {
            let receiver = receiver.clone();
            let f = Arc::clone(&f);
            async move {
                match receiver.eval().await {
                    Ok(value) => Ok(value),
                    Err(error) => {
                        let step: Step<E2, A> = (*f)(error).into();
                        helpers.lift(step.resolve().await)
                    }
                }
            }
        })
    }

    /// Exchange the success and failure roles.
    pub fn swap(&self) -> AsyncResult<A, E> {
        let receiver = self.clone();
        AsyncResult::new(move |helpers| {
            let receiver = receiver.clone();
            async move {
                match receiver.eval().await {
                    Ok(value) => helpers.throw(value),
                    Err(error) => Ok(error),
                }
            }
        })
    }

    /// Project onto [`AsyncOption`]: success becomes `Some`, any failure
    /// (including captured panics) becomes `None` and its payload is
    /// discarded.
    pub fn to_option(&self) -> AsyncOption<A>
    where
        E: From<Fault>,
    {
        let receiver = self.clone();
        AsyncOption::new(move || {
            let receiver = receiver.clone();
            async move { receiver.run().await.ok() }
        })
    }
}

/// Awaiting an `AsyncResult` directly is equivalent to awaiting
/// [`run`](AsyncResult::run).
impl<E, A> IntoFuture for AsyncResult<E, A>
where
    E: From<Fault> + Send + 'static,
    A: Send + 'static,
{
    type Output = Result<A, E>;
    type IntoFuture = BoxFuture<'static, Result<A, E>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.run().await })
    }
}
