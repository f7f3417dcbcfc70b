//! Process-wide token-bucket admission control.
//!
//! One bucket gates the whole endpoint. Admission is non-blocking:
//! callers that find the bucket empty are told how long to wait and get
//! a 429, they are never parked. The tokens-and-timestamp pair is
//! read-modify-written under a single mutex because axum runs handlers
//! concurrently.

use crate::error::Error;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// A token bucket refilled continuously at `rate` tokens per second up
/// to a capacity of `burst`.
#[derive(Debug)]
pub struct RateLimiter {
    rate: f64,
    burst: f64,
    state: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last: Instant,
}

impl RateLimiter {
    /// Creates a full bucket. `rate` must be positive and `burst` at
    /// least 1; both are enforced at configuration load.
    #[must_use]
    pub fn new(rate: f64, burst: u32) -> Self {
        Self {
            rate,
            burst: f64::from(burst),
            state: Mutex::new(Bucket {
                tokens: f64::from(burst),
                last: Instant::now(),
            }),
        }
    }

    /// Admits the request by consuming one token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RateLimited`] when no token is available,
    /// carrying the wait until one would be, rounded up to whole
    /// seconds.
    pub fn check(&self) -> Result<(), Error> {
        self.check_at(Instant::now())
    }

    fn check_at(&self, now: Instant) -> Result<(), Error> {
        let mut bucket = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        // `now` is captured before the lock, so a racing caller can
        // arrive here with a stale timestamp; it must not rewind the
        // refill clock and mint a duplicate token.
        if now > bucket.last {
            let elapsed = now.duration_since(bucket.last).as_secs_f64();
            bucket.tokens = (bucket.tokens + elapsed * self.rate).min(self.burst);
            bucket.last = now;
        }

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            return Ok(());
        }

        let delay = (1.0 - bucket.tokens) / self.rate;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let retry_after = delay.ceil() as u64;
        Err(Error::RateLimited { retry_after })
    }
}
