//! Time sources.
//!
//! Signing contexts capture a timestamp from a [`Clock`], and the verifier
//! measures freshness against one. [`SystemClock`] reads wall-clock time;
//! [`FixedClock`] is settable for tests and deterministic callers.

use std::sync::atomic::{AtomicI64, Ordering};

/// A source of the current time in whole seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock that reports a settable instant.
///
/// # Examples
///
/// ```
/// use signaturize_auth::clock::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1_000_000_000);
/// assert_eq!(clock.now(), 1_000_000_000);
///
/// clock.advance(30);
/// assert_eq!(clock.now(), 1_000_000_030);
/// ```
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    /// Create a clock stopped at `now`.
    #[must_use]
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Move the clock by `secs`, which may be negative.
    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
