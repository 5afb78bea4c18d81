//! Bar-graph renderer.
//!
//! Panel layout (160×80):
//!
//! ```text
//! y=0  ┌──────────────────────────────────────────┐
//!      │MIC: OK                               L:12│  status strip (10 px)
//! y=20 ├──────────────────────────────────────────┤  grid (cyan)
//!      │                ▌                         │
//! y=40 ├──────────────▌─▌───────────────────────── ┤
//!      │            ▌ ▌ ▌ ▌                       │
//! y=60 ├──────────▌─▌─▌─▌─▌─────────────────────── ┤
//!      │▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ ▌ │  32 bars, 4 px + 1 px gap
//! y=80 └──────────────────────────────────────────┘
//! ```
//!
//! Every frame erases and redraws each band column in full; with 32 small
//! columns this is cheaper than tracking what changed.

use core::fmt::Write;

use crate::config::DisplayGeometry as G;
use crate::constants::{BAND_COUNT, STATUS_STRIP_HEIGHT};
use crate::frame::SpectrumFrame;

use super::{Display, Rgb565, GLYPH_WIDTH};

/// Status text while real audio is flowing.
pub const STATUS_OK: &str = "MIC: OK";
/// Status text while the microphone is silent or absent.
pub const STATUS_NO_DATA: &str = "MIC: NO DATA";
/// Prefix of the mean-level readout.
pub const LEVEL_PREFIX: &str = "L:";

const TEXT_MARGIN: u16 = 2;
const SPLASH_TEXT: &str = "Initializing...";

/// Color tier for a bar of `height` pixels, or `None` for an empty bar.
pub fn bar_color(height: u8) -> Option<Rgb565> {
    let h = height as u16;
    if h == 0 {
        None
    } else if h < G::LOW_THRESHOLD {
        Some(Rgb565::BLUE)
    } else if h < G::MID_THRESHOLD {
        Some(Rgb565::GREEN)
    } else if h < G::HIGH_THRESHOLD {
        Some(Rgb565::YELLOW)
    } else {
        Some(Rgb565::RED)
    }
}

/// Remembers the first draw failure while letting the rest of a frame proceed.
struct FirstError<E>(Option<E>);

impl<E> FirstError<E> {
    fn note(&mut self, result: Result<(), E>) {
        if let Err(e) = result {
            self.0.get_or_insert(e);
        }
    }

    fn finish(self) -> Result<(), E> {
        match self.0 {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Draws [`SpectrumFrame`]s. Holds no state between frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer;

impl Renderer {
    pub const fn new() -> Self {
        Renderer
    }

    /// Draw one frame: bars, then grid, then the status strip.
    ///
    /// Drawing is best-effort: every operation is attempted even after a
    /// failure, and the first failure is returned.
    pub fn render<D: Display>(&self, display: &mut D, frame: &SpectrumFrame) -> Result<(), D::Error> {
        let mut result = FirstError(None);
        for band in 0..BAND_COUNT {
            self.draw_band(display, band, frame.band(band), &mut result);
        }
        self.draw_grid(display, &mut result);
        self.draw_status(display, frame, &mut result);
        result.note(display.flush());
        result.finish()
    }

    /// Clear the panel and show the start-up message.
    pub fn splash<D: Display>(&self, display: &mut D) -> Result<(), D::Error> {
        let mut result = FirstError(None);
        result.note(display.fill_screen(Rgb565::BLACK));
        display.set_text_size(1);
        display.set_text_color(Rgb565::WHITE);
        display.set_cursor(10, 30);
        result.note(display.print(SPLASH_TEXT));
        result.note(display.flush());
        result.finish()
    }

    /// Clear the panel and draw the static grid.
    pub fn clear<D: Display>(&self, display: &mut D) -> Result<(), D::Error> {
        let mut result = FirstError(None);
        result.note(display.fill_screen(Rgb565::BLACK));
        self.draw_grid(display, &mut result);
        result.note(display.flush());
        result.finish()
    }

    fn draw_band<D: Display>(&self, display: &mut D, band: usize, height: u8, result: &mut FirstError<D::Error>) {
        let x = G::band_x(band);
        result.note(display.fill_rect(x, 0, G::BAR_WIDTH, G::HEIGHT, Rgb565::BLACK));
        if let Some(color) = bar_color(height) {
            let h = height as u16;
            result.note(display.fill_rect(x, G::HEIGHT - h, G::BAR_WIDTH, h, color));
        }
    }

    fn draw_grid<D: Display>(&self, display: &mut D, result: &mut FirstError<D::Error>) {
        result.note(display.draw_rect(0, 0, G::WIDTH, G::HEIGHT, Rgb565::WHITE));
        for y in G::GRID_LINES {
            result.note(display.draw_fast_hline(0, y, G::WIDTH, Rgb565::CYAN));
        }
    }

    fn draw_status<D: Display>(&self, display: &mut D, frame: &SpectrumFrame, result: &mut FirstError<D::Error>) {
        result.note(display.fill_rect(0, 0, G::WIDTH, STATUS_STRIP_HEIGHT, Rgb565::BLACK));
        display.set_text_size(1);

        let (status, color) = if frame.signal_present() {
            (STATUS_OK, Rgb565::GREEN)
        } else {
            (STATUS_NO_DATA, Rgb565::RED)
        };
        display.set_text_color(color);
        display.set_cursor(TEXT_MARGIN, TEXT_MARGIN);
        result.note(display.print(status));

        let mut level: heapless::String<8> = heapless::String::new();
        // "L:" + at most three digits always fits.
        let _ = write!(level, "{}{}", LEVEL_PREFIX, frame.mean_level());
        let width = level.len() as u16 * GLYPH_WIDTH;
        display.set_cursor(G::WIDTH.saturating_sub(width + TEXT_MARGIN), TEXT_MARGIN);
        result.note(display.print(level.as_str()));
    }
}
