//! Lazy async computations over an optional value

use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

type Body<A> = dyn Fn() -> BoxFuture<'static, Option<A>> + Send + Sync;

/// A deferred asynchronous computation that resolves to `Option<A>`.
///
/// Same laziness contract as [`AsyncResult`](crate::AsyncResult): the body
/// is stored at construction and invoked afresh on every
/// [`run`](Self::run). There is no failure channel; absence carries no
/// payload.
pub struct AsyncOption<A> {
    body: Arc<Body<A>>,
}

impl<A> Clone for AsyncOption<A> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
        }
    }
}

impl<A> AsyncOption<A>
where
    A: Send + 'static,
{
    /// Create a computation from a body closure.
    pub fn new<F, Fut>(body: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<A>> + Send + 'static,
    {
        Self {
            body: Arc::new(move || Box::pin(body())),
        }
    }

    /// Computation that resolves immediately to the given `Option`.
    pub fn lift(option: Option<A>) -> Self
    where
        A: Clone + Sync,
    {
        Self::new(move || {
            let option = option.clone();
            async move { option }
        })
    }

    /// Execute the computation, invoking the stored body afresh.
    pub async fn run(&self) -> Option<A> {
        (self.body)().await
    }

    /// Transform the present value; absence passes through and `f` is not
    /// invoked.
    pub fn map<B, F>(&self, f: F) -> AsyncOption<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let receiver = self.clone();
        let f = Arc::new(f);
        AsyncOption::new(move || {
            let receiver = receiver.clone();
            let f = Arc::clone(&f);
            async move { receiver.run().await.map(|value| (*f)(value)) }
        })
    }
}
