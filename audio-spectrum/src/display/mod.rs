//! Pixel output.
//!
//! The renderer draws through the [`Display`] capability, a small subset
//! of the Adafruit-GFX style API that TFT drivers commonly expose. With
//! the `graphics` feature, [`GraphicsDisplay`] implements it for any
//! `embedded-graphics` `DrawTarget<Color = Rgb565>`.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Display`] | Capability consumed by the renderer |
//! | [`Rgb565`] | 16-bit panel color with the named colors the UI uses |
//! | [`Renderer`] | Bars, grid and status strip |

mod renderer;

#[cfg(feature = "graphics")]
mod graphics;

pub use renderer::{bar_color, Renderer, LEVEL_PREFIX, STATUS_NO_DATA, STATUS_OK};

#[cfg(feature = "graphics")]
pub use graphics::GraphicsDisplay;

use crate::config::DisplayGeometry;

/// Horizontal advance of one glyph at text size 1, in pixels.
pub const GLYPH_WIDTH: u16 = 6;

/// Height of one glyph cell at text size 1, in pixels.
pub const GLYPH_HEIGHT: u16 = 8;

/// RGB565 color as sent to the panel controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const BLUE: Rgb565 = Rgb565(0x001F);
    pub const CYAN: Rgb565 = Rgb565(0x07FF);
    pub const YELLOW: Rgb565 = Rgb565(0xFFE0);

    /// Pack 8-bit channels, dropping the low bits.
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Rgb565((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }

    /// Expand to 8-bit channels (low bits replicated from the high bits).
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        let r = ((self.0 >> 11) & 0x1F) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }
}

/// Pixel output capability of a small TFT panel.
///
/// Drawing calls return the transport error, if any. Cursor and text
/// attribute setters only change driver-side state and cannot fail.
pub trait Display {
    /// Transport error type.
    type Error: core::fmt::Debug;

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), Self::Error>;

    /// One-pixel outline.
    fn draw_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), Self::Error>;

    fn draw_fast_hline(&mut self, x: u16, y: u16, w: u16, color: Rgb565) -> Result<(), Self::Error>;

    /// Top-left corner of the next printed glyph.
    fn set_cursor(&mut self, x: u16, y: u16);

    fn set_text_color(&mut self, color: Rgb565);

    /// Integer glyph scale (1 = 6×8 cell).
    fn set_text_size(&mut self, size: u8);

    /// Print at the cursor and advance it.
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.fill_rect(0, 0, DisplayGeometry::WIDTH, DisplayGeometry::HEIGHT, color)
    }

    /// Push buffered drawing to the panel. No-op for panels that draw immediately.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: Display + ?Sized> Display for &mut T {
    type Error = T::Error;

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), Self::Error> {
        (**self).fill_rect(x, y, w, h, color)
    }

    fn draw_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), Self::Error> {
        (**self).draw_rect(x, y, w, h, color)
    }

    fn draw_fast_hline(&mut self, x: u16, y: u16, w: u16, color: Rgb565) -> Result<(), Self::Error> {
        (**self).draw_fast_hline(x, y, w, color)
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        (**self).set_cursor(x, y)
    }

    fn set_text_color(&mut self, color: Rgb565) {
        (**self).set_text_color(color)
    }

    fn set_text_size(&mut self, size: u8) {
        (**self).set_text_size(size)
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        (**self).print(text)
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        (**self).fill_screen(color)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}
