//! Time-based button debouncer
//!
//! Turns a noisy sampled level into confirmed edges. A new level is only
//! trusted once it has held, unchanged, for the whole debounce window.
//! Every change of the raw level, bounce included, restarts the window.

use repcount_hal::{elapsed_ms, Timestamp};

/// Confirmed transition of the debounced level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high (press)
    Rose,
    /// High to low (release)
    Fell,
}

/// Debouncer state
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Last committed level
    stable: bool,
    /// Level currently being timed
    candidate: bool,
    /// When `candidate` was first seen
    candidate_since: Timestamp,
    /// Hold time required before committing
    window_ms: u32,
}

impl Debouncer {
    /// Create a debouncer that starts out at `initial_level`
    pub fn new(initial_level: bool, now: Timestamp, window_ms: u32) -> Self {
        Self {
            stable: initial_level,
            candidate: initial_level,
            candidate_since: now,
            window_ms,
        }
    }

    /// Feed one raw sample
    ///
    /// Returns the edge if this sample committed a new stable level.
    pub fn sample(&mut self, raw: bool, now: Timestamp) -> Option<Edge> {
        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since = now;
            return None;
        }

        if self.candidate == self.stable
            || elapsed_ms(now, self.candidate_since) < self.window_ms
        {
            return None;
        }

        self.stable = self.candidate;
        Some(if self.stable { Edge::Rose } else { Edge::Fell })
    }

    /// Adopt `raw` as the stable level without reporting an edge
    ///
    /// Used after a suspend: whatever the pin did while the core was
    /// stopped must not surface as a press.
    pub fn resync(&mut self, raw: bool, now: Timestamp) {
        self.stable = raw;
        self.candidate = raw;
        self.candidate_since = now;
    }

    /// Whether the button is held down (debounced)
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}
