//! Idle timer
//!
//! Measures time since the last button activity. The timeout fires once per
//! idle episode; a new episode starts on [`IdleTimer::touch`] or
//! [`IdleTimer::wake`]. The timer only reports, the controller does the
//! actual sleeping.

use repcount_hal::{elapsed_ms, Timestamp};

/// Idle state
#[derive(Debug, Clone)]
pub struct IdleTimer {
    last_activity_at: Timestamp,
    interval_ms: u32,
    /// Timeout already reported for this episode
    fired: bool,
    asleep: bool,
}

impl IdleTimer {
    /// Create an awake timer whose episode starts at `now`
    pub fn new(now: Timestamp, interval_ms: u32) -> Self {
        Self {
            last_activity_at: now,
            interval_ms,
            fired: false,
            asleep: false,
        }
    }

    /// Record activity, starting a new idle episode
    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity_at = now;
        self.fired = false;
    }

    /// Check whether the device should go to sleep
    ///
    /// Returns `true` once per episode, and marks the timer asleep.
    pub fn check_timeout(&mut self, now: Timestamp) -> bool {
        if self.fired || elapsed_ms(now, self.last_activity_at) < self.interval_ms {
            return false;
        }

        self.fired = true;
        self.asleep = true;
        true
    }

    /// Leave sleep and start a fresh episode
    pub fn wake(&mut self, now: Timestamp) {
        self.asleep = false;
        self.touch(now);
    }

    /// Between a timeout and the following wake
    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    /// Time of the last activity
    pub fn last_activity_at(&self) -> Timestamp {
        self.last_activity_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_timeout_scenario() {
        let mut idle = IdleTimer::new(0, 5000);

        assert!(!idle.check_timeout(4999));
        assert!(idle.check_timeout(5001));
        assert!(idle.is_asleep());

        idle.touch(5002);
        assert!(!idle.check_timeout(5003));
    }

    #[test]
    fn test_fires_once_per_episode() {
        let mut idle = IdleTimer::new(0, 5000);
        assert!(idle.check_timeout(5000));
        assert!(!idle.check_timeout(5001));
        assert!(!idle.check_timeout(60_000));

        idle.touch(60_000);
        assert!(!idle.check_timeout(64_999));
        assert!(idle.check_timeout(65_000));
    }

    #[test]
    fn test_wake_round_trip() {
        let mut idle = IdleTimer::new(0, 5000);
        assert!(idle.check_timeout(5000));
        assert!(idle.is_asleep());

        idle.wake(90_000);
        assert!(!idle.is_asleep());
        assert_eq!(idle.last_activity_at(), 90_000);
        assert!(!idle.check_timeout(90_000));
    }

    #[test]
    fn test_touch_keeps_sleep_flag() {
        // Only wake clears asleep
        let mut idle = IdleTimer::new(0, 100);
        assert!(idle.check_timeout(100));
        idle.touch(150);
        assert!(idle.is_asleep());
    }

    proptest! {
        /// Without activity, exactly one timeout is reported, at or after the interval.
        #[test]
        fn prop_single_timeout_per_episode(gaps in proptest::collection::vec(1u32..2000, 1..100)) {
            let mut idle = IdleTimer::new(0, 5000);
            let mut now = 0u32;
            let mut fired = 0;
            for gap in gaps {
                now += gap;
                if idle.check_timeout(now) {
                    prop_assert!(now >= 5000);
                    fired += 1;
                }
            }
            prop_assert!(fired <= 1);
            prop_assert_eq!(fired == 1, now >= 5000);
        }
    }
}
