use std::cell::RefCell;

use super::*;

#[test]
fn delays_grow_linearly() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_for(1), 1000);
    assert_eq!(policy.delay_for(2), 2000);
    assert_eq!(policy.delay_for(3), 3000);
}

#[tokio::test]
async fn success_on_first_attempt_never_sleeps() {
    let sleeps = RefCell::new(Vec::new());
    let result: Result<u32, String> = retry_with_backoff(
        RetryPolicy::default(),
        || async { Ok(7) },
        |ms| {
            sleeps.borrow_mut().push(ms);
            async {}
        },
    )
    .await;
    assert_eq!(result, Ok(7));
    assert!(sleeps.borrow().is_empty());
}

#[tokio::test]
async fn error_surfaces_only_after_every_backoff() {
    let sleeps = RefCell::new(Vec::new());
    let attempts = RefCell::new(0);
    let result: Result<(), String> = retry_with_backoff(
        RetryPolicy::default(),
        || {
            *attempts.borrow_mut() += 1;
            let n = *attempts.borrow();
            async move { Err(format!("boom {n}")) }
        },
        |ms| {
            sleeps.borrow_mut().push(ms);
            async {}
        },
    )
    .await;
    assert_eq!(result, Err("boom 4".to_owned()));
    assert_eq!(*attempts.borrow(), 4);
    assert_eq!(*sleeps.borrow(), vec![1000, 2000, 3000]);
}

#[tokio::test]
async fn recovers_midway() {
    let sleeps = RefCell::new(Vec::new());
    let attempts = RefCell::new(0);
    let result: Result<&str, String> = retry_with_backoff(
        RetryPolicy { max_retries: 3, base_delay_ms: 10 },
        || {
            *attempts.borrow_mut() += 1;
            let n = *attempts.borrow();
            async move { if n < 3 { Err("flaky".to_owned()) } else { Ok("done") } }
        },
        |ms| {
            sleeps.borrow_mut().push(ms);
            async {}
        },
    )
    .await;
    assert_eq!(result, Ok("done"));
    assert_eq!(*sleeps.borrow(), vec![10, 20]);
}
