//! Cooperative cancellation and wall-clock deadlines.
//!
//! Placers poll a [`CancellationToken`] between pieces (greedy, BLF) or
//! between generations and individuals (genetic, at finer granularity once
//! `population_size` exceeds 64). A [`Deadline`] additionally bounds the
//! genetic placer's wall-clock budget.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A shared flag a caller can raise from another thread to stop a run early.
/// Cancellation is not an error: a cancelled run still returns a `RunResult`
/// with whatever was placed before the flag was observed, and `cancelled = true`.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the cancellation flag. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns whether [`CancellationToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// A wall-clock budget checked alongside cancellation by time-bounded placers.
#[derive(Copy, Clone, Debug)]
pub struct Deadline {
    started_at: Instant,
    limit: Duration,
}

impl Deadline {
    /// Starts a deadline `limit_seconds` from now. A non-positive or
    /// non-finite `limit_seconds` yields a deadline that is already expired.
    pub fn starting_now(limit_seconds: f64) -> Self {
        let limit = if limit_seconds.is_finite() && limit_seconds > 0.0 {
            Duration::from_secs_f64(limit_seconds)
        } else {
            Duration::ZERO
        };
        Self {
            started_at: Instant::now(),
            limit,
        }
    }

    /// Whether the configured limit has elapsed.
    pub fn is_expired(&self) -> bool {
        self.started_at.elapsed() >= self.limit
    }

    /// Seconds elapsed since this deadline started.
    pub fn elapsed_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
