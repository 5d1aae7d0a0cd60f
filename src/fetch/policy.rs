use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Granularity used while sleeping between attempts so cancellation is
/// observed promptly.
const CANCEL_POLL: Duration = Duration::from_millis(25);

/// Fixed-delay retry schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(800),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Attempts actually made; a zero budget still makes one attempt.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }

    /// Sleep for the retry delay. Returns `false` if the token was cancelled
    /// before the delay elapsed.
    pub fn wait(&self, token: &CancelToken) -> bool {
        let deadline = Instant::now() + self.delay;
        loop {
            if token.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(CANCEL_POLL.min(deadline - now));
        }
    }
}

/// Cooperative cancellation flag shared between the UI and the fetch worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_returns_early_when_cancelled() {
        let policy = RetryPolicy::new(3, Duration::from_secs(30));
        let token = CancelToken::new();
        let remote = token.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            remote.cancel();
        });

        let started = Instant::now();
        assert!(!policy.wait(&token));
        assert!(started.elapsed() < Duration::from_secs(5));
        canceller.join().expect("canceller thread");
    }

    #[test]
    fn wait_completes_without_cancellation() {
        let policy = RetryPolicy::new(2, Duration::from_millis(10));
        assert!(policy.wait(&CancelToken::new()));
    }

    #[test]
    fn zero_budget_still_attempts_once() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).attempts(), 1);
    }
}
