//! State machine definition
//!
//! What the control loop does on each iteration is a function of the
//! current state.

use super::events::Event;

/// Device states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Power-on, display not yet initialized
    Booting,
    /// Counting and rendering
    Awake,
    /// Panel off after an idle timeout
    Sleeping,
    /// Display failed at boot; nothing runs any more
    Halted,
}

impl DeviceState {
    /// Check if presses are counted in this state
    pub fn counts_presses(&self) -> bool {
        matches!(self, DeviceState::Awake)
    }

    /// Check if this is the terminal fault state
    pub fn is_halted(&self) -> bool {
        matches!(self, DeviceState::Halted)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use DeviceState::*;
        use Event::*;

        match (self, event) {
            (Booting, BootComplete) => Awake,
            (Booting, DisplayInitFailed) => Halted,

            (Awake, IdleTimeout) => Sleeping,

            (Sleeping, Woken) => Awake,

            // Halted never leaves; everything else stays put
            _ => self,
        }
    }
}
