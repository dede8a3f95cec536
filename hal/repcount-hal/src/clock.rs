//! Monotonic millisecond clock

/// Milliseconds since boot
///
/// Wraps after ~49 days. All comparisons go through [`elapsed_ms`] so the
/// wrap is harmless as long as a single interval stays below `u32::MAX`.
pub type Timestamp = u32;

/// Source of monotonic timestamps
pub trait MonotonicClock {
    /// Current time in milliseconds
    fn now_ms(&self) -> Timestamp;
}

/// Milliseconds elapsed from `since` to `now`, tolerant of wraparound
#[inline]
pub const fn elapsed_ms(now: Timestamp, since: Timestamp) -> u32 {
    now.wrapping_sub(since)
}
