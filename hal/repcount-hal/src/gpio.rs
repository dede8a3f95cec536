//! GPIO pin abstractions
//!
//! The counter only reads pins. Levels are logical: an active-low button
//! is wrapped in [`Inverted`] so that "pressed" always reads high.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input pin with inverted logic
///
/// Used for active-low buttons wired to a pull-up.
#[derive(Debug, Clone, Copy)]
pub struct Inverted<P>(pub P);

impl<P: InputPin> InputPin for Inverted<P> {
    fn is_high(&self) -> bool {
        self.0.is_low()
    }
}
