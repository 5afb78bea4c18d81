//! [`Display`] on top of `embedded-graphics`.
//!
//! Any driver that implements `DrawTarget<Color = Rgb565>` (ST7735,
//! ST7789, ILI9341 crates, simulators) can be handed to the renderer
//! through [`GraphicsDisplay`].
//!
//! Text uses the built-in ASCII mono fonts: `FONT_6X10` at size 1, whose
//! advance matches [`GLYPH_WIDTH`](super::GLYPH_WIDTH), and `FONT_10X20`
//! (the largest available) at size 2 and above.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565 as GfxRgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use super::{Display, Rgb565};

impl From<Rgb565> for GfxRgb565 {
    fn from(color: Rgb565) -> Self {
        GfxRgb565::from(RawU16::new(color.0))
    }
}

/// Adapts an `embedded-graphics` draw target to the [`Display`] capability.
pub struct GraphicsDisplay<T> {
    target: T,
    cursor: Point,
    text_color: Rgb565,
    text_size: u8,
}

impl<T> GraphicsDisplay<T>
where
    T: DrawTarget<Color = GfxRgb565>,
{
    pub fn new(target: T) -> Self {
        GraphicsDisplay {
            target,
            cursor: Point::zero(),
            text_color: Rgb565::WHITE,
            text_size: 1,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }
}

fn rect(x: u16, y: u16, w: u16, h: u16) -> Rectangle {
    Rectangle::new(Point::new(x as i32, y as i32), Size::new(w as u32, h as u32))
}

impl<T> Display for GraphicsDisplay<T>
where
    T: DrawTarget<Color = GfxRgb565>,
    T::Error: core::fmt::Debug,
{
    type Error = T::Error;

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), Self::Error> {
        self.target.fill_solid(&rect(x, y, w, h), color.into())
    }

    fn draw_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), Self::Error> {
        rect(x, y, w, h)
            .into_styled(PrimitiveStyle::with_stroke(color.into(), 1))
            .draw(&mut self.target)
    }

    fn draw_fast_hline(&mut self, x: u16, y: u16, w: u16, color: Rgb565) -> Result<(), Self::Error> {
        if w == 0 {
            return Ok(());
        }
        let start = Point::new(x as i32, y as i32);
        let end = Point::new(x as i32 + w as i32 - 1, y as i32);
        Line::new(start, end)
            .into_styled(PrimitiveStyle::with_stroke(color.into(), 1))
            .draw(&mut self.target)
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Point::new(x as i32, y as i32);
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        let font = if self.text_size >= 2 { &FONT_10X20 } else { &FONT_6X10 };
        let style = MonoTextStyle::new(font, self.text_color.into());
        self.cursor = Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.target)?;
        Ok(())
    }
}
