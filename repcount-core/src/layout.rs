//! Screen layout for the 128x32 panel
//!
//! ```text
//! x: 0        24                                        128
//!    ┌────────┬──────────────────────────────────────────┐
//!    │ count  │        push-up sprite (64x32 at x=40)    │
//!    └────────┴──────────────────────────────────────────┘
//! ```

use crate::traits::display::{Point, Region, Size};

/// Panel width in pixels
pub const PANEL_WIDTH: u16 = 128;

/// Panel height in pixels
pub const PANEL_HEIGHT: u16 = 32;

/// Whole panel
pub const SCREEN_REGION: Region = Region::new(0, 0, PANEL_WIDTH, PANEL_HEIGHT);

/// Width of one glyph of the count font
pub const GLYPH_WIDTH: u16 = 6;

/// Digits the counter column has room for
///
/// Counts above [`COUNTER_MAX_SHOWN`] are shown as that value; the sprite
/// starts right after the column.
pub const COUNTER_DIGITS: u16 = 4;

/// Largest count that fits the counter column
pub const COUNTER_MAX_SHOWN: u32 = 9999;

const COUNTER_WIDTH: u16 = COUNTER_DIGITS * GLYPH_WIDTH;

/// Area cleared before the count is redrawn
pub const COUNTER_REGION: Region = Region::new(0, 0, COUNTER_WIDTH, PANEL_HEIGHT);

/// Top-left corner of the count text
pub const COUNTER_ORIGIN: Point = Point::new(0, 0);

/// Area cleared before a new frame is drawn
pub const ANIMATION_REGION: Region = Region::new(
    COUNTER_WIDTH as i16,
    0,
    PANEL_WIDTH - COUNTER_WIDTH,
    PANEL_HEIGHT,
);

/// Top-left corner of the sprite
pub const SPRITE_ORIGIN: Point = Point::new(40, 0);

/// Sprite dimensions
pub const SPRITE_SIZE: Size = Size::new(64, 32);
