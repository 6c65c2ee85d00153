use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::info;

/// Enforces a minimum interval between consecutive requests.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until a request may be issued and records it as issued.
    ///
    /// The first call never waits. Returns the time spent waiting.
    pub async fn acquire(&mut self) -> Duration {
        let mut waited = Duration::ZERO;
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                info!(
                    wait_secs = format_args!("{:.2}", wait.as_secs_f64()),
                    "Waiting before next api request"
                );
                sleep(wait).await;
                waited = wait;
            }
        }
        self.last_request = Some(Instant::now());
        waited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_request_does_not_wait() {
        let mut limiter = RateLimiter::new(Duration::from_secs(120));
        let start = Instant::now();

        assert_eq!(limiter.acquire().await, Duration::ZERO);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_remaining_interval() {
        let mut limiter = RateLimiter::new(Duration::from_secs(120));
        let start = Instant::now();

        limiter.acquire().await;
        tokio::time::advance(Duration::from_secs(20)).await;
        let waited = limiter.acquire().await;

        assert_eq!(waited, Duration::from_secs(100));
        assert!(start.elapsed() >= Duration::from_secs(120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval_elapsed() {
        let mut limiter = RateLimiter::new(Duration::from_secs(10));

        limiter.acquire().await;
        tokio::time::advance(Duration::from_secs(11)).await;

        assert_eq!(limiter.acquire().await, Duration::ZERO);
    }
}
