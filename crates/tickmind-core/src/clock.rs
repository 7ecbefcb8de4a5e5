//! Time source abstraction.
//!
//! The engine never calls `Utc::now()` directly; it goes through a [`Clock`]
//! so tests can drive the countdown with a [`FakeClock`] and assert exact
//! remaining values at simulated instants.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

/// A source of wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually advanced clock for tests.
///
/// Cloning shares the underlying instant, so a test can hold one copy and
/// advance time while the engine holds another.
#[derive(Debug, Clone)]
pub struct FakeClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FakeClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// A clock starting at the unix epoch.
    pub fn epoch() -> Self {
        Self::new(Utc.timestamp_opt(0, 0).unwrap())
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::seconds(secs);
    }

    pub fn advance_millis(&self, millis: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::milliseconds(millis);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_clock_advances() {
        let clock = FakeClock::epoch();
        let t0 = clock.now();
        clock.advance_secs(42);
        assert_eq!((clock.now() - t0).num_seconds(), 42);
    }

    #[test]
    fn fake_clock_clones_share_time() {
        let clock = FakeClock::epoch();
        let other = clock.clone();
        clock.advance_millis(1500);
        assert_eq!(other.now(), clock.now());
    }
}
