//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware bakes a
//! validated [`DeviceConfig`] in at build time from `device.toml`.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
