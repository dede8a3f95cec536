//! `DisplayCanvas` on an SSD1306 panel
//!
//! Drawing goes through `embedded-graphics` into the frame buffer and the
//! panel only sees the result on `flush`.

use core::convert::Infallible;

use embedded_graphics::image::Image;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{
    DrawTarget, DrawTargetExt, Drawable, OriginDimensions, Pixel, Point as GfxPoint,
    Size as GfxSize,
};
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use repcount_core::animation::FrameKind;
use repcount_core::traits::display::{Color, DisplayCanvas, DisplayError, Point, Region, Size};
use repcount_hal::I2cBus;

use crate::framebuffer::FrameBuffer;
use crate::sprites::sprite;
use crate::ssd1306::Ssd1306;

/// Frame-buffered OLED
pub struct OledCanvas<I2C> {
    driver: Ssd1306<I2C>,
    buffer: FrameBuffer,
    ready: bool,
}

impl<I2C> OledCanvas<I2C>
where
    I2C: I2cBus,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: Ssd1306::new(i2c, address),
            buffer: FrameBuffer::new(),
            ready: false,
        }
    }

    /// Current buffer contents (what the next flush will send)
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn release(self) -> I2C {
        self.driver.release()
    }

    fn ensure_ready(&self) -> Result<(), DisplayError> {
        if self.ready {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }
}

impl<I2C> DisplayCanvas for OledCanvas<I2C>
where
    I2C: I2cBus,
{
    fn init(&mut self) -> Result<(), DisplayError> {
        self.driver.init().map_err(|_| DisplayError::InitFailed)?;
        self.buffer.clear();
        self.ready = true;
        Ok(())
    }

    fn clear_region(&mut self, region: Region) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        drawn(self.buffer.fill_solid(&rectangle(region.origin, region.size), BinaryColor::Off));
        Ok(())
    }

    fn draw_bitmap(
        &mut self,
        origin: Point,
        frame: FrameKind,
        size: Size,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.ensure_ready()?;

        let raw = sprite(frame);
        let image = Image::new(&raw, gfx_point(origin));
        let area = rectangle(origin, size);
        let mut ink = Ink {
            target: &mut self.buffer,
            color: binary(color),
        };
        drawn(image.draw(&mut ink.clipped(&area)));
        Ok(())
    }

    fn draw_text(&mut self, origin: Point, text: &str, color: Color) -> Result<(), DisplayError> {
        self.ensure_ready()?;

        let style = MonoTextStyle::new(&FONT_6X10, binary(color));
        drawn(Text::with_baseline(text, gfx_point(origin), style, Baseline::Top).draw(&mut self.buffer));
        Ok(())
    }

    fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        self.driver
            .set_display_on(on)
            .map_err(|_| DisplayError::Communication)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        self.driver
            .flush(&self.buffer)
            .map_err(|_| DisplayError::Communication)
    }
}

/// Bitmap target: only set bits are drawn, in the requested colour
struct Ink<'a> {
    target: &'a mut FrameBuffer,
    color: BinaryColor,
}

impl OriginDimensions for Ink<'_> {
    fn size(&self) -> GfxSize {
        self.target.size()
    }
}

impl DrawTarget for Ink<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let color = self.color;
        self.target.draw_iter(
            pixels
                .into_iter()
                .filter(|Pixel(_, c)| c.is_on())
                .map(|Pixel(p, _)| Pixel(p, color)),
        )
    }
}

/// Drawing into RAM cannot fail
fn drawn<T>(result: Result<T, Infallible>) {
    if let Err(never) = result {
        match never {}
    }
}

fn binary(color: Color) -> BinaryColor {
    match color {
        Color::On => BinaryColor::On,
        Color::Off => BinaryColor::Off,
    }
}

fn gfx_point(point: Point) -> GfxPoint {
    GfxPoint::new(point.x.into(), point.y.into())
}

fn rectangle(origin: Point, size: Size) -> Rectangle {
    Rectangle::new(
        gfx_point(origin),
        GfxSize::new(size.width.into(), size.height.into()),
    )
}
