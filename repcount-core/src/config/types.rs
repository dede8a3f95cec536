//! Configuration type definitions
//!
//! Timing constants for the three timers and the device-level config that
//! ties them to the pins.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::{DisplayConfig, PinConfig};

/// Default debounce window (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Default animation frame interval (ms)
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 300;

/// Default idle time before sleeping (ms)
pub const DEFAULT_SLEEP_INTERVAL_MS: u32 = 5000;

/// Default window after wake in which the waking press is swallowed (ms)
pub const DEFAULT_WAKE_GUARD_MS: u32 = 150;

/// Default button GPIO
pub const DEFAULT_BUTTON_PIN: u8 = 10;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Debounce window is zero
    ZeroDebounce,
    /// Frame interval is zero
    ZeroFrameInterval,
    /// Sleep interval is zero
    ZeroSleepInterval,
    /// Debounce window is not shorter than the sleep interval
    DebounceTooLong,
    /// Pin number is not a GPIO
    InvalidPin(u8),
    /// Wake pin is the button's GPIO but with a different polarity or pull
    WakePinConflict(u8),
}

/// What happens when the idle timer expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SleepMode {
    /// Panel off and processor suspended until the wake edge
    #[default]
    Suspend,
    /// Panel off only; the loop keeps running and any edge wakes the panel
    DisplayOff,
}

/// Timer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Time the raw level must hold before it is trusted
    pub debounce_ms: u32,
    /// Minimum time between animation frames
    pub frame_interval_ms: u32,
    /// Idle time before sleeping
    pub sleep_interval_ms: u32,
    /// Time after wake during which the first press is not counted
    pub wake_guard_ms: u32,
}

impl TimingConfig {
    /// Factory timings
    pub const DEFAULT: Self = Self {
        debounce_ms: DEFAULT_DEBOUNCE_MS,
        frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        sleep_interval_ms: DEFAULT_SLEEP_INTERVAL_MS,
        wake_guard_ms: DEFAULT_WAKE_GUARD_MS,
    };
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Timer settings
    pub timing: TimingConfig,
    /// Counting button
    pub button: PinConfig,
    /// Pin whose edge ends a suspend (may be the button itself)
    pub wake: PinConfig,
    /// Logical button level assumed at power-on
    pub initial_level: bool,
    /// Sleep behaviour
    pub sleep_mode: SleepMode,
    /// OLED panel settings
    pub display: DisplayConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::DEFAULT,
            button: PinConfig::new(DEFAULT_BUTTON_PIN),
            wake: PinConfig::new(DEFAULT_BUTTON_PIN),
            initial_level: false,
            sleep_mode: SleepMode::Suspend,
            display: DisplayConfig::default(),
        }
    }
}

impl DeviceConfig {
    /// True when the wake source is the counting button
    pub fn shares_wake_pin(&self) -> bool {
        self.wake.pin == self.button.pin
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;

        if timing.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if timing.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        if timing.sleep_interval_ms == 0 {
            return Err(ConfigError::ZeroSleepInterval);
        }
        if timing.debounce_ms >= timing.sleep_interval_ms {
            return Err(ConfigError::DebounceTooLong);
        }

        for pin in [self.button, self.wake] {
            if !pin.is_valid() {
                return Err(ConfigError::InvalidPin(pin.pin));
            }
        }

        // A shared pin is read and awaited through one input
        if self.shares_wake_pin() && self.wake != self.button {
            return Err(ConfigError::WakePinConflict(self.wake.pin));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::hardware::parse_pin_string;

    #[test]
    fn test_defaults_are_valid() {
        let config = DeviceConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert!(config.shares_wake_pin());
        assert_eq!(config.timing.debounce_ms, 50);
        assert_eq!(config.timing.frame_interval_ms, 300);
        assert_eq!(config.timing.sleep_interval_ms, 5000);
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let mut config = DeviceConfig::default();
        config.timing.debounce_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounce));

        let mut config = DeviceConfig::default();
        config.timing.frame_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameInterval));

        let mut config = DeviceConfig::default();
        config.timing.sleep_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSleepInterval));
    }

    #[test]
    fn test_debounce_must_be_shorter_than_sleep() {
        let mut config = DeviceConfig::default();
        config.timing.debounce_ms = config.timing.sleep_interval_ms;
        assert_eq!(config.validate(), Err(ConfigError::DebounceTooLong));
    }

    #[test]
    fn test_invalid_wake_pin() {
        let mut config = DeviceConfig::default();
        config.wake = PinConfig::new(40);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPin(40)));
        assert!(!config.shares_wake_pin());
    }

    #[test]
    fn test_shared_wake_pin_must_match_button() {
        let mut config = DeviceConfig::default();
        config.button = parse_pin_string("gpio10").unwrap();
        config.wake = parse_pin_string("!gpio10").unwrap();
        assert_eq!(config.validate(), Err(ConfigError::WakePinConflict(10)));

        config.wake = parse_pin_string("^gpio10").unwrap();
        assert_eq!(config.validate(), Err(ConfigError::WakePinConflict(10)));

        config.wake = config.button;
        assert_eq!(config.validate(), Ok(()));

        config.wake = parse_pin_string("!gpio11").unwrap();
        assert_eq!(config.validate(), Ok(()));
    }
}
