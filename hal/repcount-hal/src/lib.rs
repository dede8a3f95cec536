//! Repcount Hardware Abstraction Layer
//!
//! This crate defines the capabilities the counter core needs from the
//! board. Chip-specific code (the RP2040 firmware, host test mocks)
//! implements them, so the same control loop runs on hardware and in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  repcount-core (device controller)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  repcount-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  repcount-    │       │  host mocks   │
//! │  firmware     │       │  (unit tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (the push-up button)
//! - [`clock::MonotonicClock`] - Millisecond timestamps
//! - [`power::PowerControl`] - Suspend until a wake edge
//! - [`i2c::I2cBus`] - I2C bus operations (OLED panel)

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod i2c;
pub mod power;

// Re-export key traits at crate root for convenience
pub use clock::{elapsed_ms, MonotonicClock, Timestamp};
pub use gpio::{InputPin, Inverted};
pub use i2c::I2cBus;
pub use power::{PowerControl, WakeEdge};
