//! Push-up sprites
//!
//! 64x32, one bit per pixel, rows top to bottom, MSB is the leftmost pixel
//! (the layout `ImageRaw<BinaryColor>` expects). Both frames share the
//! ground line so only the figure appears to move.

use embedded_graphics::image::ImageRaw;
use embedded_graphics::pixelcolor::BinaryColor;
use repcount_core::animation::FrameKind;

/// Sprite width in pixels
pub const SPRITE_WIDTH: u32 = 64;

/// Sprite height in pixels
pub const SPRITE_HEIGHT: u32 = 32;

const SPRITE_BYTES: usize = (SPRITE_WIDTH * SPRITE_HEIGHT / 8) as usize;

/// Arms extended
const PUSH_UP: [u8; SPRITE_BYTES] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x3E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xFF, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x3E, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x08, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x3F, 0xE0, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x31, 0xFC, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x30, 0x7F, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x30, 0x0F, 0xE0, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x30, 0x01, 0xFC, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x30, 0x00, 0x3F, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x30, 0x00, 0x0F, 0xE0, 0x00, 0x00,
    0x00, 0x00, 0x30, 0x00, 0x01, 0xFC, 0x00, 0x00,
    0x00, 0x00, 0x30, 0x00, 0x00, 0x3F, 0x80, 0x00,
    0x00, 0x00, 0x30, 0x00, 0x00, 0x0F, 0xE0, 0x00,
    0x00, 0x00, 0x30, 0x00, 0x00, 0x01, 0xFC, 0x00,
    0x00, 0x00, 0x30, 0x00, 0x00, 0x00, 0x3F, 0x80,
    0x00, 0x00, 0x30, 0x00, 0x00, 0x00, 0x0F, 0xC0,
    0x00, 0x00, 0x30, 0x00, 0x00, 0x00, 0x01, 0xF0,
    0x00, 0x00, 0x30, 0x00, 0x00, 0x00, 0x00, 0x78,
    0x00, 0x00, 0x30, 0x00, 0x00, 0x00, 0x00, 0x3C,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

/// Chest near the ground
const PUSH_DOWN: [u8; SPRITE_BYTES] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x20, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xF8, 0x01, 0xC0, 0x00, 0x00, 0x00, 0x00,
    0x01, 0xFC, 0x03, 0xC0, 0x00, 0x00, 0x00, 0x00,
    0x01, 0xFC, 0x07, 0xC0, 0x00, 0x00, 0x00, 0x00,
    0x03, 0xFE, 0x0F, 0xC0, 0x00, 0x00, 0x00, 0x00,
    0x01, 0xFC, 0x1D, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x01, 0xFF, 0xF9, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xFB, 0xFF, 0xFE, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x20, 0x1F, 0xFF, 0xFF, 0xC0, 0x00, 0x00,
    0x00, 0x00, 0x03, 0x83, 0xFF, 0xFF, 0xF8, 0x00,
    0x00, 0x00, 0x03, 0x80, 0x00, 0x7F, 0xFF, 0xE0,
    0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x1F, 0xF8,
    0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x7C,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

/// Image for an animation frame
pub fn sprite(frame: FrameKind) -> ImageRaw<'static, BinaryColor> {
    let data: &'static [u8] = match frame {
        FrameKind::Up => &PUSH_UP,
        FrameKind::Down => &PUSH_DOWN,
    };
    ImageRaw::new(data, SPRITE_WIDTH)
}
