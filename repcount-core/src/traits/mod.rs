//! Hardware abstraction traits
//!
//! Board capabilities (pins, clock, power) live in `repcount-hal`; the
//! display capability is defined here because its vocabulary (frames,
//! layout) belongs to the application.

pub mod display;

pub use display::{Color, DisplayCanvas, DisplayError, Point, Region, Size};
