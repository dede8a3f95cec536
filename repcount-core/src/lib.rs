//! Board-agnostic core logic for the push-up counter
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Button debouncing
//! - Animation frame scheduling
//! - Idle tracking and the sleep/wake state machine
//! - The device controller that ties them to a display
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod config;
pub mod controller;
pub mod input;
pub mod layout;
pub mod power;
pub mod state;
pub mod traits;

pub use controller::{Counter, DeviceController, StepReport};
