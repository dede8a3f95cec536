//! OLED rendering for Repcount
//!
//! This crate provides:
//! - `FrameBuffer`, a 128x32 page-ordered buffer that `embedded-graphics`
//!   can draw into
//! - `Ssd1306`, a write-only panel driver over the `I2cBus` trait
//! - The two push-up sprites
//! - `OledCanvas`, which implements the core `DisplayCanvas` trait
//!
//! Nothing here touches hardware directly, so it all runs on the host.

#![cfg_attr(not(test), no_std)]

pub mod canvas;
pub mod framebuffer;
pub mod sprites;
pub mod ssd1306;

// Re-export key types
pub use canvas::OledCanvas;
pub use framebuffer::FrameBuffer;
pub use ssd1306::Ssd1306;
