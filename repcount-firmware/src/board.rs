//! Board capabilities backed by embassy-rp
//!
//! Adapters from embassy's GPIO, I2C and time driver to the `repcount-hal`
//! traits the controller is written against.

use core::cell::RefCell;

use embassy_rp::gpio::{Input, Pull};
use embassy_time::Instant;
use repcount_core::config::PinConfig;
use repcount_hal::{I2cBus, InputPin, MonotonicClock, Timestamp};

/// Internal pull matching the pin's configured polarity
pub fn pull_for(pin: &PinConfig) -> Pull {
    if pin.pull_up {
        Pull::Up
    } else {
        Pull::Down
    }
}

/// Milliseconds from the embassy time driver
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> Timestamp {
        // Truncation wraps at ~49 days, which `elapsed_ms` tolerates
        Instant::now().as_millis() as Timestamp
    }
}

/// GPIO input that the button adapter and the suspend code both use
///
/// Reads and edge waits never overlap: the controller samples the pin only
/// between suspends.
pub type SharedInput = &'static RefCell<Input<'static>>;

/// Physical level of the button pin
pub struct ButtonPin(pub SharedInput);

impl InputPin for ButtonPin {
    fn is_high(&self) -> bool {
        self.0.borrow().is_high()
    }
}

/// Blocking I2C master behind the `I2cBus` trait
pub struct I2cAdapter<T>(pub T);

impl<T> I2cBus for I2cAdapter<T>
where
    T: embedded_hal::i2c::I2c,
{
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }
}
