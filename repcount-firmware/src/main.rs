//! Repcount - Wearable Push-up Counter Firmware
//!
//! Main firmware binary for RP2040-based boards. One button is debounced
//! and counted, a two-frame animation plays on a 128x32 SSD1306, and the
//! board suspends after a stretch of inactivity.
//!
//! The control loop is a plain blocking loop: the only suspension point is
//! the wait for the wake edge.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Config as I2cBusConfig, I2c};
use embassy_time::{block_for, Duration};
use repcount_core::config::DeviceConfig;
use repcount_core::{DeviceController, StepReport};
use repcount_display::OledCanvas;
use repcount_hal::I2cConfig;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

#[cfg(button_active_low)]
use repcount_hal::Inverted;

use crate::board::{pull_for, ButtonPin, EmbassyClock, I2cAdapter, SharedInput};
use crate::power::{EdgeSuspend, WakeSource};

mod board;
mod power;

// DEVICE_CONFIG and the pin selection macros, generated from device.toml
include!(concat!(env!("OUT_DIR"), "/device_config.rs"));

/// Control loop period
const LOOP_PERIOD_MS: u64 = 2;

#[cfg(button_active_low)]
type Button = Inverted<ButtonPin>;
#[cfg(not(button_active_low))]
type Button = ButtonPin;

// The button input is shared with the suspend code when it is also the wake pin
static BUTTON_INPUT: StaticCell<RefCell<Input<'static>>> = StaticCell::new();

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Repcount firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = DEVICE_CONFIG;
    log_config(&config);

    let button_input: SharedInput = BUTTON_INPUT.init(RefCell::new(Input::new(
        button_pin!(p),
        pull_for(&config.button),
    )));

    #[cfg(not(button_active_low))]
    let button: Button = ButtonPin(button_input);
    #[cfg(button_active_low)]
    let button: Button = Inverted(ButtonPin(button_input));

    #[cfg(not(separate_wake_pin))]
    let wake = WakeSource::Button(button_input);
    #[cfg(separate_wake_pin)]
    let wake = WakeSource::Dedicated(Input::new(wake_pin!(p), pull_for(&config.wake)));
    info!("Button GPIO{} ready", config.button.pin);

    // I2C0 on the Pico's default pins: SDA=GPIO4, SCL=GPIO5
    let i2c_config = {
        let mut cfg = I2cBusConfig::default();
        cfg.frequency = I2cConfig::FAST.frequency;
        cfg
    };
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let display = OledCanvas::new(I2cAdapter(i2c), config.display.i2c_address);

    let mut device = DeviceController::new(
        config,
        EmbassyClock,
        button,
        display,
        EdgeSuspend::new(wake),
    );

    if let Err(e) = device.boot() {
        error!("Display init failed: {}. Halting.", e);
        halt();
    }
    info!("Display ready, counting");

    loop {
        let report = device.step();
        if report.is_eventful() {
            log_step(&report, device.count());
        }
        block_for(Duration::from_millis(LOOP_PERIOD_MS));
    }
}

fn log_config(config: &DeviceConfig) {
    let timing = &config.timing;
    info!(
        "Config: debounce={}ms, frame={}ms, sleep={}ms, wake_guard={}ms",
        timing.debounce_ms, timing.frame_interval_ms, timing.sleep_interval_ms, timing.wake_guard_ms
    );
    info!(
        "Pins: button={}, wake={}, mode={}",
        config.button, config.wake, config.sleep_mode
    );
}

fn log_step(report: &StepReport, count: u32) {
    if report.counted {
        info!("Push-up #{}", count);
    } else if report.wake_press_ignored {
        debug!("Wake press not counted");
    } else if let Some(edge) = report.edge {
        trace!("Edge {}", edge);
    }

    if report.slept {
        info!("Idle, going to sleep");
    }
    if report.woke {
        info!("Awake (count={})", count);
    }
}

/// Park the core forever
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
