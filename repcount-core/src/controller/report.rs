//! Per-iteration outcome, for logging

use crate::animation::FrameKind;
use crate::input::Edge;

/// What one call to `step` did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Debounced edge committed this iteration
    pub edge: Option<Edge>,
    /// The edge incremented the count
    pub counted: bool,
    /// A press was seen but not counted because it woke the device
    pub wake_press_ignored: bool,
    /// New animation frame drawn
    pub frame: Option<FrameKind>,
    /// Idle timeout fired and the device went to sleep
    pub slept: bool,
    /// Device woke up
    pub woke: bool,
}

impl StepReport {
    /// Check if anything worth logging happened
    pub fn is_eventful(&self) -> bool {
        self.edge.is_some() || self.slept || self.woke
    }
}
