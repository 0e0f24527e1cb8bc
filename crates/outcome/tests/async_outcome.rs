// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `AsyncOutcome`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use outcome::{AsyncOutcome, Conclusion, ConclusionExt, Error, ErrorKind, Outcome, OutcomeError};

#[derive(Debug, thiserror::Error)]
#[error("upstream timed out")]
struct UpstreamError;

#[test]
fn concurrent_joins_execute_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let outcome = AsyncOutcome::from_future(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(50));
        7
    });

    let waiters: Vec<_> = (0..2)
        .map(|_| {
            let outcome = outcome.clone();
            std::thread::spawn(move || *outcome.value())
        })
        .collect();

    for waiter in waiters {
        assert_eq!(waiter.join().unwrap(), 7);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(outcome.is_completed());
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_awaits_execute_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let outcome = AsyncOutcome::from_future(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        counter.fetch_add(1, Ordering::SeqCst);
        "ready".to_owned()
    });

    let first = tokio::spawn(outcome.clone().into_future());
    let second = tokio::spawn(outcome.wait());

    assert_eq!(first.await.unwrap(), Outcome::ok("ready".to_owned()));
    assert_eq!(second.await.unwrap(), Outcome::ok("ready".to_owned()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failure_from_outcome_future() {
    let outcome = AsyncOutcome::<u32>::from_outcome_future(async {
        tokio::task::yield_now().await;
        Outcome::fail_many([Error::new("a"), Error::new("b")])
    });

    let settled = outcome.wait().await;
    assert_eq!(settled.errors().len(), 2);
    assert!(outcome.is_completed());
    assert!(outcome.is_failed());
}

#[tokio::test]
async fn err_becomes_exceptional_error() {
    let outcome = AsyncOutcome::<u32>::from_fallible_future(async { Err(UpstreamError) });

    let settled = outcome.clone().await;
    assert_eq!(settled.errors()[0].kind(), ErrorKind::Exceptional);
    assert_eq!(settled.errors()[0].message(), "upstream timed out");
    assert!(outcome.try_get_exception::<UpstreamError>().is_some());
}

#[test]
fn panic_settles_as_failure() {
    let outcome = AsyncOutcome::from_outcome_future(async {
        if std::hint::black_box(true) {
            panic!("lost connection");
        }

        Outcome::success()
    });

    assert!(outcome.is_failed());
    assert_eq!(outcome.errors().len(), 1);
    assert_eq!(outcome.errors()[0].message(), "lost connection");
}

#[test]
fn settled_outcome_chains_synchronously() {
    let doubled = AsyncOutcome::from_value(21).into_outcome().then(|value| value * 2);
    assert_eq!(doubled, Outcome::ok(42));
}

#[test]
fn misuse_in_computation_reaches_the_joiner() {
    let outcome = AsyncOutcome::from_future(async { *Outcome::<i32>::fail("inner").value() });

    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| outcome.is_failed())).unwrap_err();

    assert_eq!(
        payload.downcast_ref::<OutcomeError>(),
        Some(&OutcomeError::OperationOnFailed { operation: "get value" })
    );
}

#[test]
fn conclusion_taps_on_async_outcome() {
    let mut failures = Vec::new();

    let outcome = AsyncOutcome::<u32>::from_fallible_future(async { Err(UpstreamError) })
        .on_success(|| unreachable!("the computation failed"))
        .on_fail(|errors| failures.extend(errors.iter().map(|error| error.message().to_owned())));

    assert_eq!(failures, ["upstream timed out"]);
    assert!(outcome.is_completed());
}
