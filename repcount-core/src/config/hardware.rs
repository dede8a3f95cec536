//! Hardware configuration types
//!
//! Pin assignments for the button and the wake source, and the OLED
//! panel's bus settings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Default I2C address of 128x32 SSD1306 modules
pub const DEFAULT_DISPLAY_ADDRESS: u8 = 0x3C;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin with its pull-up enabled
    pub const fn active_low(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }

    /// Check the pin number is a real GPIO
    pub const fn is_valid(&self) -> bool {
        self.pin < GPIO_COUNT
    }
}

/// OLED panel bus settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// 7-bit I2C address (0x3C or 0x3D)
    pub i2c_address: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_DISPLAY_ADDRESS,
        }
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio10" -> active-high, no pull
/// - "!gpio10" -> active-low (inverted), pull-up enabled
/// - "^gpio10" -> active-high with pull-up
pub fn parse_pin_string(s: &str) -> Option<PinConfig> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let (s, pull_up) = match s.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (s, inverted),
    };

    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;

    let config = PinConfig {
        pin,
        inverted,
        pull_up,
    };
    config.is_valid().then_some(config)
}
