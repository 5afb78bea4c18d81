//! Block → band magnitudes.
//!
//! [`SpectrumAnalyzer::transform`] runs the whole chain on one block:
//!
//! ```text
//! i16 block ─► ×gain ×Hamming ─► FFT ─► |X[k]| ─► mean per band ─► ÷divisor ─► clamp
//! ```
//!
//! Only bins `1..N/2` carry information for real input; bin 0 (DC) is never
//! assigned to a band. With `N = 128` and `B = 32`, each band averages two
//! bins of `44100 / 128 ≈ 344.5 Hz`.

use core::ops::RangeInclusive;

use crate::config::GainConfig;
use crate::constants::{AUDIO_BLOCK_SAMPLES, BAND_COUNT, SAMPLE_RATE_HZ};
use crate::frame::{AudioBlock, SpectrumFrame, MAX_BAND_VALUE};

use super::fft::{complex_to_magnitude, Radix2Fft};
use super::window::hamming;

const N: usize = AUDIO_BLOCK_SAMPLES;
const HALF: usize = N / 2;

/// Transform bins averaged into each band.
pub const BINS_PER_BAND: usize = HALF / BAND_COUNT;

/// Frequency width of one transform bin.
pub const fn resolution_hz() -> f64 {
    SAMPLE_RATE_HZ as f64 / N as f64
}

/// Inclusive range of transform bins aggregated into `band`.
///
/// Band `k` nominally covers `k*BINS_PER_BAND + 1 ..= (k+1)*BINS_PER_BAND`.
/// The upper bound never passes `N/2 - 1`, the last band absorbs any
/// remainder bins, and a range whose start passes its end collapses to the
/// single bin `end`.
pub fn band_bins(band: usize) -> RangeInclusive<usize> {
    let mut start = band * BINS_PER_BAND + 1;
    let mut end = (band + 1) * BINS_PER_BAND;
    if end >= HALF || band == BAND_COUNT - 1 {
        end = HALF - 1;
    }
    if start > end {
        start = end;
    }
    start..=end
}

/// Nominal frequency span `[low, high)` of `band` in Hz:
/// `[(k*BINS_PER_BAND + 1) * res, (k+1)*BINS_PER_BAND * res)`.
///
/// Built from the unclamped bin bounds, so the last band keeps a non-empty
/// span even though its bins are clamped below Nyquist.
pub fn band_frequency_range(band: usize) -> (f64, f64) {
    let low = band * BINS_PER_BAND + 1;
    let high = (band + 1) * BINS_PER_BAND;
    (low as f64 * resolution_hz(), high as f64 * resolution_hz())
}

/// Band whose nominal range contains `hz`.
///
/// The nominal ranges are half-open and do not tile the spectrum when a
/// band spans more than one bin, so frequencies between two ranges, below
/// the first or at/above the last return `None`.
pub fn band_for_frequency(hz: f64) -> Option<usize> {
    (0..BAND_COUNT).find(|&band| {
        let (low, high) = band_frequency_range(band);
        low <= hz && hz < high
    })
}

/// Windowed FFT band analyzer with pre-sized working buffers.
///
/// All tables are built in [`new`](Self::new); [`transform`](Self::transform)
/// reuses the same buffers every call, so its cost is fixed and it never
/// allocates.
pub struct SpectrumAnalyzer {
    gain: GainConfig,
    fft: Radix2Fft,
    window: [f64; N],
    /// Real part; holds bin magnitudes after a transform.
    re: [f64; N],
    im: [f64; N],
}

impl SpectrumAnalyzer {
    pub fn new(gain: GainConfig) -> Self {
        let mut window = [0.0; N];
        hamming(&mut window);
        SpectrumAnalyzer {
            gain,
            fft: Radix2Fft::new(),
            window,
            re: [0.0; N],
            im: [0.0; N],
        }
    }

    pub fn gain(&self) -> GainConfig {
        self.gain
    }

    /// Compute band magnitudes for one block.
    ///
    /// Every sample is scaled by [`GainConfig::input_gain`] before the
    /// window, so band heights grow linearly with it; the default gain of
    /// 2 doubles them relative to an unscaled transform.
    ///
    /// The returned frame has `signal_present == false`; liveness is the
    /// caller's concern.
    pub fn transform(&mut self, block: &AudioBlock) -> SpectrumFrame {
        let gain = self.gain.input_gain;
        for i in 0..N {
            self.re[i] = block[i] as f64 * gain * self.window[i];
            self.im[i] = 0.0;
        }

        self.fft.forward(&mut self.re, &mut self.im);
        complex_to_magnitude(&mut self.re, &self.im);

        let mut bands = [0u8; BAND_COUNT];
        for (band, value) in bands.iter_mut().enumerate() {
            *value = self.band_value(band);
        }
        SpectrumFrame::new(bands, false)
    }

    fn band_value(&self, band: usize) -> u8 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for bin in band_bins(band) {
            sum += self.re[bin];
            count += 1;
        }
        if count == 0 {
            return 0;
        }
        let scaled = (sum / count as f64) / self.gain.sensitivity_divisor;
        if !(scaled > 0.0) {
            0
        } else if scaled >= MAX_BAND_VALUE as f64 {
            MAX_BAND_VALUE
        } else {
            scaled as u8
        }
    }

    /// Bin magnitudes left by the last [`transform`](Self::transform).
    pub fn magnitudes(&self) -> &[f64; N] {
        &self.re
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new(GainConfig::DEFAULT)
    }
}
