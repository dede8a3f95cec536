//! Display capability used by the device controller
//!
//! Drawing goes into a buffer; nothing reaches the panel until `flush`.

use crate::animation::FrameKind;

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Communication,
    /// Panel did not accept its init sequence
    InitFailed,
    /// Drawing requested before `init`
    NotInitialized,
}

/// Pixel colour on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel lit
    On,
    /// Pixel dark
    Off,
}

/// Pixel position (may be negative for partially visible sprites)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Rectangle on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub origin: Point,
    pub size: Size,
}

impl Region {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Check if a pixel lies inside the region
    pub fn contains(&self, point: Point) -> bool {
        let dx = i32::from(point.x) - i32::from(self.origin.x);
        let dy = i32::from(point.y) - i32::from(self.origin.y);
        dx >= 0
            && dy >= 0
            && dx < i32::from(self.size.width)
            && dy < i32::from(self.size.height)
    }
}

/// Trait for the frame-buffered panel
///
/// Steady-state errors are reported but the controller ignores them; only
/// a failed [`DisplayCanvas::init`] is fatal.
pub trait DisplayCanvas {
    /// Bring the panel up. Called once at boot.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Fill a region with the background colour
    fn clear_region(&mut self, region: Region) -> Result<(), DisplayError>;

    /// Draw the sprite for an animation frame
    fn draw_bitmap(
        &mut self,
        origin: Point,
        frame: FrameKind,
        size: Size,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `origin`
    fn draw_text(&mut self, origin: Point, text: &str, color: Color) -> Result<(), DisplayError>;

    /// Switch the panel on or off (buffer contents are kept)
    fn set_power(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Send the buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}
