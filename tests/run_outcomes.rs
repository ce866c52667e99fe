//! Execution outcomes of `run`: lifted values, panic capture, re-run semantics

use async_result::{AsyncResult, Fault};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn lift_success_round_trips() {
    let computation: AsyncResult<String, i32> = AsyncResult::lift(Ok(5));
    assert_eq!(computation.run().await, Ok(5));
}

#[tokio::test]
async fn lift_failure_round_trips() {
    let computation: AsyncResult<String, i32> = AsyncResult::lift(Err("nope".to_string()));
    assert_eq!(computation.run().await, Err("nope".to_string()));
}

#[tokio::test]
async fn from_future_success() {
    let computation: AsyncResult<String, i32> = AsyncResult::from_future(|| async { Ok(5) });
    assert_eq!(computation.run().await, Ok(5));
}

#[tokio::test]
async fn from_future_failure() {
    let computation: AsyncResult<String, i32> =
        AsyncResult::from_future(|| async { Err("e".to_string()) });
    assert_eq!(computation.run().await, Err("e".to_string()));
}

#[tokio::test]
async fn lift_future_resolves_to_success() {
    let computation: AsyncResult<String, i32> = AsyncResult::lift_future(|| async { 5 });
    assert_eq!(computation.run().await, Ok(5));
}

#[tokio::test]
async fn panicking_body_resolves_to_failure() {
    let computation: AsyncResult<Fault, i32> = AsyncResult::new(|_| async { panic!("x") });
    assert_eq!(computation.run().await, Err(Fault::new("x")));
}

#[tokio::test]
async fn panic_message_is_preserved_for_string_errors() {
    let computation: AsyncResult<String, i32> =
        AsyncResult::new(|_| async { panic!("boom: {}", 7) });
    assert_eq!(computation.run().await, Err("boom: 7".to_string()));
}

#[tokio::test]
async fn panic_inside_awaited_sub_future_is_captured() {
    let computation: AsyncResult<String, i32> = AsyncResult::new(|_| async {
        let value = async { panic!("inner") }.await;
        Ok(value)
    });
    assert_eq!(computation.run().await, Err("inner".to_string()));
}

#[tokio::test]
async fn panic_after_partial_work_still_resolves() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let computation: AsyncResult<String, i32> = AsyncResult::new(move |h| {
        let seen = Arc::clone(&seen);
        async move {
            let _ = h.lift(Ok(1))?;
            seen.fetch_add(1, Ordering::SeqCst);
            panic!("late");
        }
    });

    assert_eq!(computation.run().await, Err("late".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rerunning_repeats_side_effects() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let computation: AsyncResult<String, usize> = AsyncResult::new(move |h| {
        let seen = Arc::clone(&seen);
        async move {
            let count = seen.fetch_add(1, Ordering::SeqCst) + 1;
            h.lift(Ok(count))
        }
    });

    assert_eq!(computation.run().await, Ok(1));
    assert_eq!(computation.run().await, Ok(2));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn awaiting_directly_runs_the_computation() {
    let computation: AsyncResult<String, &'static str> = AsyncResult::new(|_| async { Ok("A") });
    assert_eq!(computation.await, Ok("A"));
}

#[test]
fn run_needs_no_reactor() {
    let computation: AsyncResult<String, i32> = AsyncResult::lift(Ok(5));
    assert_eq!(tokio_test::block_on(computation.run()), Ok(5));
}
