//! Nullable clock: deterministic time for testing.

use soulbound_types::{Clock, Timestamp};
use std::sync::atomic::{AtomicI64, Ordering};

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current_millis: AtomicI64,
}

impl NullClock {
    pub fn new(initial_millis: i64) -> Self {
        Self {
            current_millis: AtomicI64::new(initial_millis),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: i64) {
        self.current_millis.fetch_add(secs * 1_000, Ordering::SeqCst);
    }

    /// Set the time to a specific value.
    pub fn set(&self, millis: i64) {
        self.current_millis.store(millis, Ordering::SeqCst);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        // 2024-01-01T00:00:00Z
        Self::new(1_704_067_200_000)
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.current_millis.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_moves_only_when_told() {
        let clock = NullClock::new(5_000);
        assert_eq!(clock.now().as_millis(), 5_000);
        assert_eq!(clock.now(), clock.now());

        clock.advance(2);
        assert_eq!(clock.now().as_millis(), 7_000);

        clock.set(1);
        assert_eq!(clock.now().as_millis(), 1);
    }
}
