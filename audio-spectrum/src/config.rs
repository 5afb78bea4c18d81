//! Build-time tunables and panel geometry.
//!
//! Nothing here changes at runtime. [`GainConfig`] is copied into the
//! analyzer when it is constructed; [`DisplayGeometry`] is a namespace of
//! derived `const` values used by the renderer.

use crate::constants::{BAND_COUNT, H_MAX, PANEL_HEIGHT, PANEL_WIDTH};

/// Amplitude scaling applied by the spectrum transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainConfig {
    /// Multiplier applied to every input sample before windowing.
    pub input_gain: f64,
    /// Mean bin magnitude is divided by this before clamping to pixels.
    /// Larger values make the bars less sensitive.
    pub sensitivity_divisor: f64,
}

impl GainConfig {
    /// Values tuned for an INMP441 on a 160×80 panel.
    pub const DEFAULT: GainConfig = GainConfig {
        input_gain: 2.0,
        sensitivity_divisor: 50.0,
    };
}

impl Default for GainConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Static panel layout.
pub struct DisplayGeometry;

impl DisplayGeometry {
    pub const WIDTH: u16 = PANEL_WIDTH;
    pub const HEIGHT: u16 = PANEL_HEIGHT;

    /// Horizontal pixels allotted to one band.
    pub const BAND_WIDTH: u16 = PANEL_WIDTH / BAND_COUNT as u16;

    /// Filled width of a bar; the remaining column is the gap to the next band.
    pub const BAR_WIDTH: u16 = Self::BAND_WIDTH - 1;

    /// Exclusive upper bound of a bar height.
    pub const H_MAX: u16 = H_MAX;

    /// Bars below this height are drawn blue.
    pub const LOW_THRESHOLD: u16 = PANEL_HEIGHT / 4;
    /// Bars below this height are drawn green.
    pub const MID_THRESHOLD: u16 = PANEL_HEIGHT / 2;
    /// Bars below this height are drawn yellow; anything taller is red.
    pub const HIGH_THRESHOLD: u16 = 3 * PANEL_HEIGHT / 4;

    /// Y positions of the three horizontal reference lines, bottom to top.
    pub const GRID_LINES: [u16; 3] = [
        PANEL_HEIGHT - PANEL_HEIGHT / 4,
        PANEL_HEIGHT - 2 * (PANEL_HEIGHT / 4),
        PANEL_HEIGHT - 3 * (PANEL_HEIGHT / 4),
    ];

    /// Left edge of band `band`.
    pub const fn band_x(band: usize) -> u16 {
        band as u16 * Self::BAND_WIDTH
    }
}

const _: () = assert!(DisplayGeometry::BAND_WIDTH >= 2, "panel too narrow for the band count");
