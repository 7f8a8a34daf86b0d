//! Time source abstraction.
//!
//! Validity checks never read the wall clock directly; they take a `Clock`
//! so tests can pin time to fixed values.

use std::sync::atomic::{AtomicI64, Ordering};

/// Supplies the current time.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now_seconds(&self) -> i64;

    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now_seconds().saturating_mul(1000)
    }
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock pinned to a settable instant.
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    /// Create a clock fixed at `seconds` since the epoch.
    #[must_use]
    pub fn from_seconds(seconds: i64) -> Self {
        Self::from_millis(seconds.saturating_mul(1000))
    }

    /// Create a clock fixed at `millis` since the epoch.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Move the clock to `seconds` since the epoch.
    pub fn set_seconds(&self, seconds: i64) {
        self.millis
            .store(seconds.saturating_mul(1000), Ordering::SeqCst);
    }

    /// Advance the clock by `seconds`.
    pub fn advance_seconds(&self, seconds: i64) {
        self.millis
            .fetch_add(seconds.saturating_mul(1000), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_seconds(&self) -> i64 {
        self.now_millis().div_euclid(1000)
    }

    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::from_seconds(1_000);
        assert_eq!(clock.now_seconds(), 1_000);
        assert_eq!(clock.now_millis(), 1_000_000);

        clock.advance_seconds(5);
        assert_eq!(clock.now_seconds(), 1_005);

        clock.set_seconds(42);
        assert_eq!(clock.now_seconds(), 42);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_seconds() > 1_577_836_800);
        let millis = SystemClock.now_millis();
        assert!(millis / 1000 >= SystemClock.now_seconds() - 1);
    }
}
