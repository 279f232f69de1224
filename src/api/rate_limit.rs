// src/api/rate_limit.rs
//! Token-bucket rate limiting shared by every Notion API call.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Allows `requests_per_second` calls per second on average, with bursts of
/// up to the same number.
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
    capacity: f64,
    refill_per_second: f64,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new(requests_per_second: u32) -> Self {
        let rate = f64::from(requests_per_second.max(1));
        Self {
            bucket: Mutex::new(Bucket {
                tokens: rate,
                last_refill: Instant::now(),
            }),
            capacity: rate,
            refill_per_second: rate,
        }
    }

    /// Wait until a request may be sent, then consume one token.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock();
                let now = Instant::now();
                let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
                bucket.tokens =
                    (bucket.tokens + elapsed * self.refill_per_second).min(self.capacity);
                bucket.last_refill = now;

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    return;
                }
                Duration::from_secs_f64((1.0 - bucket.tokens) / self.refill_per_second)
            };
            log::trace!("Rate limited, waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn burst_up_to_capacity_is_immediate() {
        let limiter = RateLimiter::new(5);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn requests_beyond_the_burst_wait_for_a_token() {
        let limiter = RateLimiter::new(20);
        for _ in 0..20 {
            limiter.acquire().await;
        }
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
