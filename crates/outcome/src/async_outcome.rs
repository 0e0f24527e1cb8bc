// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;
use std::future::{Future, IntoFuture};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, OnceLock};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::{Conclusion, Error, Outcome, catch, telemetry};

type Completion<T> = Shared<BoxFuture<'static, Outcome<T>>>;

struct Inner<T> {
    completion: Completion<T>,
    settled: OnceLock<Outcome<T>>,
}

/// An [`Outcome`] that is produced by a deferred computation.
///
/// The computation runs at most once no matter how many callers wait for it. Handles are cheap to
/// clone and all of them observe the same settled outcome.
///
/// A panic inside the computation settles the outcome as failed with one exceptional [`Error`].
/// A misuse panic carrying an [`OutcomeError`](crate::OutcomeError) is not captured. It escapes
/// from the join or await that drives the computation.
///
/// The outcome can be awaited through [`IntoFuture`] or [`wait`](Self::wait). The synchronous
/// accessors, including the [`Conclusion`] implementation, block the current thread until the
/// computation has settled. Blocking on a computation that needs the current single-threaded
/// runtime to make progress never completes, so prefer awaiting inside async code.
///
/// # Examples
///
/// ```rust
/// use outcome::{AsyncOutcome, Conclusion};
///
/// let outcome = AsyncOutcome::from_future(async { 21 * 2 });
///
/// assert!(outcome.is_success());
/// assert_eq!(outcome.value(), &42);
/// ```
pub struct AsyncOutcome<T = ()> {
    inner: Arc<Inner<T>>,
}

impl AsyncOutcome<()> {
    /// Returns an already settled successful valueless outcome.
    #[must_use]
    pub fn completed() -> Self {
        Self::from_outcome(Outcome::success())
    }
}

impl<T> AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wraps an already settled outcome.
    #[must_use]
    pub fn from_outcome(outcome: Outcome<T>) -> Self {
        Self {
            inner: Arc::new(Inner {
                completion: futures::future::ready(outcome.clone()).boxed().shared(),
                settled: OnceLock::from(outcome),
            }),
        }
    }

    /// Wraps an already available value as a successful outcome.
    #[must_use]
    pub fn from_value(value: T) -> Self {
        Self::from_outcome(Outcome::ok(value))
    }

    /// Runs `future` as the computation, succeeding with its output.
    #[must_use]
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::from_outcome_future(future.map(Outcome::ok))
    }

    /// Runs `future` as the computation, settling with the outcome it produces.
    #[must_use]
    pub fn from_outcome_future<F>(future: F) -> Self
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        let completion = AssertUnwindSafe(future)
            .catch_unwind()
            .map(|result| {
                result.unwrap_or_else(|payload| {
                    let exception = catch::into_exception(payload);
                    telemetry::async_panicked(&exception);
                    Outcome::fail(Error::exceptional(exception))
                })
            })
            .boxed()
            .shared();

        Self {
            inner: Arc::new(Inner {
                completion,
                settled: OnceLock::new(),
            }),
        }
    }

    /// Runs a fallible `future` as the computation, turning `Err` into an exceptional failure.
    #[must_use]
    pub fn from_fallible_future<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Self::from_outcome_future(future.map(|result| match result {
            Ok(value) => Outcome::ok(value),
            Err(error) => Outcome::fail(Error::exceptional(error)),
        }))
    }

    /// Returns `true` if the computation has settled. Never blocks.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.inner.settled.get().is_some() || self.inner.completion.peek().is_some()
    }

    /// Blocks until the computation has settled and returns the outcome.
    pub fn join(&self) -> &Outcome<T> {
        self.inner
            .settled
            .get_or_init(|| futures::executor::block_on(self.inner.completion.clone()))
    }

    /// Returns a future resolving to the settled outcome.
    pub fn wait(&self) -> impl Future<Output = Outcome<T>> + Send + use<T> {
        self.inner.completion.clone()
    }

    /// Blocks until the computation has settled and returns its value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is failed.
    #[track_caller]
    #[must_use]
    pub fn value(&self) -> &T {
        self.join().value()
    }

    /// Blocks until the computation has settled and returns its value, or `None` on failure.
    #[must_use]
    pub fn as_value(&self) -> Option<&T> {
        self.join().as_value()
    }

    /// Blocks until the computation has settled and returns a copy of its value, or
    /// `T::default()` on failure.
    #[must_use]
    pub fn value_or_default(&self) -> T
    where
        T: Default,
    {
        self.as_value().cloned().unwrap_or_default()
    }

    /// Blocks until the computation has settled and returns a copy of the outcome.
    pub fn into_outcome(self) -> Outcome<T> {
        self.join().clone()
    }
}

impl<T> Clone for AsyncOutcome<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Conclusion for AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn is_success(&self) -> bool {
        self.join().is_success()
    }

    fn errors(&self) -> &[Error] {
        self.join().errors()
    }
}

impl<T> From<Outcome<T>> for AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(outcome: Outcome<T>) -> Self {
        Self::from_outcome(outcome)
    }
}

impl<T> IntoFuture for AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = Outcome<T>;
    type IntoFuture = Shared<BoxFuture<'static, Outcome<T>>>;

    fn into_future(self) -> Self::IntoFuture {
        self.inner.completion.clone()
    }
}

impl<T> fmt::Debug for AsyncOutcome<T>
where
    T: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settled = self.inner.settled.get().or_else(|| self.inner.completion.peek());
        f.debug_struct("AsyncOutcome").field("settled", &settled).finish()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use static_assertions::assert_impl_all;
    use tracing_subscriber::util::SubscriberInitExt;

    use super::*;
    use crate::testing::{LogCapture, misuse_of};
    use crate::{ConclusionExt, ErrorKind, OutcomeError, Panicked};

    assert_impl_all!(AsyncOutcome<i32>: Send, Sync, Clone, fmt::Debug);

    #[test]
    fn settled_constructors() {
        let outcome = AsyncOutcome::completed();
        assert!(outcome.is_completed());
        assert!(outcome.is_success());
        assert_eq!(outcome.into_outcome(), Outcome::success());

        let outcome = AsyncOutcome::from_value(5);
        assert!(outcome.is_completed());
        assert_eq!(outcome.value(), &5);

        let outcome = AsyncOutcome::<i32>::from(Outcome::fail("bad"));
        assert!(outcome.is_failed());
        assert_eq!(outcome.errors(), [Error::new("bad")]);
        assert_eq!(outcome.as_value(), None);
        assert_eq!(outcome.value_or_default(), 0);
        assert_eq!(AsyncOutcome::from_value(4).value_or_default(), 4);
    }

    #[test]
    fn taps_observe_settled_status() {
        let mut seen = Vec::new();

        let outcome = AsyncOutcome::from_future(async { 3 })
            .on_fail(|_| seen.push("fail"))
            .on_success(|| seen.push("success"));
        assert!(outcome.is_completed());

        let _ = AsyncOutcome::<i32>::from_outcome_future(async { Outcome::fail("down") })
            .on_success(|| seen.push("success"))
            .on_fail(|errors| {
                assert_eq!(errors[0].message(), "down");
                seen.push("fail");
            });

        assert_eq!(seen, ["success", "fail"]);
    }

    #[test]
    fn lazy_until_joined() {
        let outcome = AsyncOutcome::from_future(async { 1 });
        assert!(!outcome.is_completed());
        assert_eq!(outcome.join(), &Outcome::ok(1));
        assert!(outcome.is_completed());
    }

    #[test]
    fn panic_becomes_exceptional_error() {
        fn explode() -> i32 {
            panic!("async boom")
        }

        let log_capture = LogCapture::new();
        let _guard = log_capture.subscriber().set_default();

        let outcome = AsyncOutcome::from_future(async { explode() });

        assert!(outcome.is_failed());
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].kind(), ErrorKind::Exceptional);
        assert!(outcome.try_get_exception::<Panicked>().is_some());
        log_capture.assert_contains("outcome.exception=async boom");
    }

    #[test]
    fn misuse_in_computation_escapes() {
        let outcome = AsyncOutcome::from_future(async { *Outcome::<i32>::fail("inner").value() });

        let error = misuse_of(|| outcome.join().clone());

        assert_eq!(error, OutcomeError::OperationOnFailed { operation: "get value" });
        assert!(!outcome.is_completed());
    }

    #[test]
    fn fallible_future_err_is_exceptional() {
        let outcome = AsyncOutcome::<i32>::from_fallible_future(async { Err(std::io::Error::other("io")) });
        assert!(outcome.try_get_exception::<std::io::Error>().is_some());

        let outcome = AsyncOutcome::from_fallible_future(async { Ok::<_, std::io::Error>(3) });
        assert_eq!(outcome.value(), &3);
    }

    #[test]
    fn outcome_future_keeps_errors() {
        let outcome =
            AsyncOutcome::<i32>::from_outcome_future(async { Outcome::fail_many([Error::new("a"), Error::new("b")]) });
        assert_eq!(outcome.errors().len(), 2);
    }

    #[test]
    fn clones_share_single_computation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let outcome = AsyncOutcome::from_future(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            "done".to_owned()
        });

        let clone = outcome.clone();
        assert_eq!(clone.value(), "done");
        assert_eq!(outcome.value(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn awaiting_settles() {
        let outcome = AsyncOutcome::from_future(async { 7 });
        assert_eq!(outcome.wait().await, Outcome::ok(7));
        assert!(outcome.is_completed());
        assert_eq!(outcome.clone().await, Outcome::ok(7));
        assert_eq!(outcome.join(), &Outcome::ok(7));
    }

    #[test]
    fn debug_shows_settled_state() {
        let outcome = AsyncOutcome::from_future(async { 1 });
        assert_eq!(format!("{outcome:?}"), "AsyncOutcome { settled: None }");
        let _ = outcome.join();
        assert_eq!(format!("{outcome:?}"), "AsyncOutcome { settled: Some(Success(1)) }");
    }
}
