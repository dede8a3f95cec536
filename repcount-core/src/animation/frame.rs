//! Frame scheduler
//!
//! Flips between the two animation frames no faster than the frame
//! interval. A late check gets one flip, never a burst of catch-up flips,
//! and the next interval is measured from the late check.

use repcount_hal::{elapsed_ms, Timestamp};

/// Animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    /// Arms extended
    #[default]
    Up,
    /// Chest down
    Down,
}

impl FrameKind {
    /// The other frame
    pub const fn toggled(self) -> Self {
        match self {
            FrameKind::Up => FrameKind::Down,
            FrameKind::Down => FrameKind::Up,
        }
    }
}

/// Frame cadence state
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    current: FrameKind,
    started_at: Timestamp,
    interval_ms: u32,
}

impl FrameScheduler {
    /// Create a scheduler showing [`FrameKind::Up`] from `now`
    pub fn new(now: Timestamp, interval_ms: u32) -> Self {
        Self {
            current: FrameKind::Up,
            started_at: now,
            interval_ms,
        }
    }

    /// Advance the animation if the interval has elapsed
    ///
    /// Returns the frame to draw, or `None` when the current frame stays.
    pub fn tick(&mut self, now: Timestamp) -> Option<FrameKind> {
        if elapsed_ms(now, self.started_at) < self.interval_ms {
            return None;
        }

        self.started_at = now;
        self.current = self.current.toggled();
        Some(self.current)
    }

    /// Restart the interval from `now` without flipping
    pub fn restart(&mut self, now: Timestamp) {
        self.started_at = now;
    }

    /// Frame currently on screen
    pub fn current(&self) -> FrameKind {
        self.current
    }
}
