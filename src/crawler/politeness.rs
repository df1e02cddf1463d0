//! Per-host politeness pacing
//!
//! Before a request to host H the caller waits until at least the configured
//! delay has passed since the previous request to H. The check, the sleep and
//! the timestamp update happen while holding H's own lock, so two concurrent
//! callers can never both observe a stale timestamp and skip the wait.
//! Requests to different hosts never wait on each other.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Per-host state: when the last request to the host started
type HostSlot = Arc<Mutex<Option<Instant>>>;

/// Enforces a minimum delay between requests to the same host
#[derive(Debug)]
pub struct PolitenessLimiter {
    /// Minimum time between request starts for one host
    delay: Duration,

    /// Per-host slots, created on first use
    hosts: Mutex<HashMap<String, HostSlot>>,
}

impl PolitenessLimiter {
    /// Creates a limiter with the given per-host delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            hosts: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until a request to `host` may start, then records the start
    ///
    /// The first request to a host never waits. Returns how long the caller
    /// was held back by pacing (excluding time spent queued behind another
    /// caller's wait on the same host).
    pub async fn acquire(&self, host: &str) -> Duration {
        let slot = self.slot(host).await;
        let mut last_request = slot.lock().await;

        let mut waited = Duration::ZERO;
        if let Some(previous) = *last_request {
            let ready_at = previous + self.delay;
            let now = Instant::now();
            if ready_at > now {
                waited = ready_at - now;
                tracing::debug!("Politeness: waiting {:?} before next request to {}", waited, host);
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last_request = Some(Instant::now());
        waited
    }

    async fn slot(&self, host: &str) -> HostSlot {
        let mut hosts = self.hosts.lock().await;
        Arc::clone(hosts.entry(host.to_string()).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant as StdInstant;

    // Scheduling tolerance for timer-based assertions
    const SLACK: Duration = Duration::from_millis(5);

    #[tokio::test]
    async fn test_first_request_does_not_wait() {
        let limiter = PolitenessLimiter::new(Duration::from_secs(5));
        let started = StdInstant::now();
        let waited = limiter.acquire("example.com").await;
        assert_eq!(waited, Duration::ZERO);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_second_request_waits_for_delay() {
        let delay = Duration::from_millis(150);
        let limiter = PolitenessLimiter::new(delay);

        let first = StdInstant::now();
        limiter.acquire("example.com").await;
        limiter.acquire("example.com").await;
        let second = StdInstant::now();

        assert!(second.duration_since(first) + SLACK >= delay);
    }

    #[tokio::test]
    async fn test_different_hosts_do_not_wait() {
        let limiter = PolitenessLimiter::new(Duration::from_secs(5));
        limiter.acquire("a.example.com").await;

        let started = StdInstant::now();
        let waited = limiter.acquire("b.example.com").await;
        assert_eq!(waited, Duration::ZERO);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_concurrent_callers_are_spaced() {
        let delay = Duration::from_millis(100);
        let limiter = Arc::new(PolitenessLimiter::new(delay));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.acquire("example.com").await;
                StdInstant::now()
            }));
        }

        let mut starts = Vec::new();
        for handle in handles {
            starts.push(handle.await.unwrap());
        }
        starts.sort();

        for pair in starts.windows(2) {
            assert!(
                pair[1].duration_since(pair[0]) + SLACK >= delay,
                "requests started {:?} apart",
                pair[1].duration_since(pair[0])
            );
        }
    }
}
