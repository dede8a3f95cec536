//! Power management abstractions

/// Edge that ends a suspend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeEdge {
    /// Low to high transition
    Rising,
    /// High to low transition
    Falling,
}

impl WakeEdge {
    /// Physical edge produced by a press on a pin with the given polarity
    ///
    /// Presses drive a normal pin high and an inverted (active-low) pin low.
    pub const fn for_press(inverted: bool) -> Self {
        if inverted {
            WakeEdge::Falling
        } else {
            WakeEdge::Rising
        }
    }
}

/// Low-power suspend
///
/// Implementations power down as far as the chip allows and block until
/// `edge` is seen on `pin`. The wake interrupt must only record that the
/// edge happened; every state change is done by the caller after this
/// returns.
pub trait PowerControl {
    /// Block until the given edge occurs on `pin`
    fn suspend_until_wake_edge(&mut self, pin: u8, edge: WakeEdge);
}
