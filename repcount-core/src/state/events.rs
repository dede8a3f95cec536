//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Display came up
    BootComplete,
    /// Display failed to initialize
    DisplayInitFailed,

    // Power events
    /// Idle timer expired
    IdleTimeout,
    /// Wake edge seen (suspend returned, or an edge while the panel was off)
    Woken,
}
