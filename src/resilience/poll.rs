//! Fixed-interval polling with an optional deadline.
//!
//! Every wait in the supervisor (pid file, reachability, liveness) is one
//! call to [`poll_until`], so interval and deadline handling stay identical.

use std::future::Future;
use std::time::Duration;
use tokio::time::{self, Instant};

/// Default interval between attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Outcome of a single polling attempt.
#[derive(Debug)]
pub enum Attempt<T, E> {
    /// Stop polling with a value.
    Done(T),
    /// Sleep one interval and try again.
    Retry,
    /// Stop polling with an error.
    Fail(E),
}

/// How often to poll and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` polls forever.
    pub deadline: Option<Duration>,
}

impl PollPolicy {
    pub fn new(interval: Duration, deadline: Option<Duration>) -> Self {
        Self { interval, deadline }
    }

    pub fn unbounded(interval: Duration) -> Self {
        Self::new(interval, None)
    }

    pub fn bounded(interval: Duration, deadline: Duration) -> Self {
        Self::new(interval, Some(deadline))
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::unbounded(DEFAULT_POLL_INTERVAL)
    }
}

/// Why polling stopped without a value.
#[derive(Debug, PartialEq, Eq)]
pub enum PollError<E> {
    /// The deadline elapsed; carries the time spent polling.
    TimedOut(Duration),
    /// An attempt returned [`Attempt::Fail`].
    Failed(E),
}

/// Run `attempt` until it yields [`Attempt::Done`] or [`Attempt::Fail`], or
/// the policy deadline elapses.
///
/// The deadline also cancels an attempt that is still in flight.
pub async fn poll_until<T, E, F, Fut>(policy: PollPolicy, mut attempt: F) -> Result<T, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T, E>>,
{
    let started = Instant::now();
    let interval = policy.interval;

    let poll = async move {
        loop {
            match attempt().await {
                Attempt::Done(value) => return Ok(value),
                Attempt::Fail(err) => return Err(PollError::Failed(err)),
                Attempt::Retry => time::sleep(interval).await,
            }
        }
    };

    match policy.deadline {
        Some(deadline) => match time::timeout(deadline, poll).await {
            Ok(result) => result,
            Err(_) => Err(PollError::TimedOut(started.elapsed())),
        },
        None => poll.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_done_after_retries() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let result: Result<u32, PollError<()>> =
            poll_until(PollPolicy::unbounded(Duration::from_millis(1)), move || async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                if n < 3 {
                    Attempt::Retry
                } else {
                    Attempt::Done(n)
                }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_fail_stops_immediately() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let result: Result<(), PollError<&str>> =
            poll_until(PollPolicy::unbounded(Duration::from_millis(1)), move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Attempt::Fail("boom")
            })
            .await;

        assert_eq!(result, Err(PollError::Failed("boom")));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_elapses() {
        let policy = PollPolicy::bounded(Duration::from_millis(2), Duration::from_secs(10));
        let result: Result<(), PollError<()>> =
            poll_until(policy, || async { Attempt::Retry }).await;

        match result {
            Err(PollError::TimedOut(elapsed)) => {
                assert!(elapsed >= Duration::from_secs(10));
                assert!(elapsed < Duration::from_secs(10) + Duration::from_millis(10));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_cancels_hung_attempt() {
        let policy = PollPolicy::bounded(Duration::from_millis(2), Duration::from_secs(1));
        let result: Result<(), PollError<()>> = poll_until(policy, || async {
            time::sleep(Duration::from_secs(3600)).await;
            Attempt::Done(())
        })
        .await;

        assert!(matches!(result, Err(PollError::TimedOut(_))));
    }
}
