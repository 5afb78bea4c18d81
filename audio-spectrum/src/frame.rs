//! Data that flows between the pipeline stages.

use crate::constants::{AUDIO_BLOCK_SAMPLES, BAND_COUNT, H_MAX};

/// One block of mono microphone samples.
pub type AudioBlock = [i16; AUDIO_BLOCK_SAMPLES];

/// Size of an [`AudioBlock`] in bytes, as reported by audio drivers.
pub const AUDIO_BLOCK_BYTES: usize = core::mem::size_of::<AudioBlock>();

/// Tallest bar a frame can hold.
pub const MAX_BAND_VALUE: u8 = (H_MAX - 1) as u8;

/// One complete set of band magnitudes, plus whether real audio backs it.
///
/// Every band is always in `0..H_MAX`; constructors clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumFrame {
    bands: [u8; BAND_COUNT],
    signal_present: bool,
}

impl SpectrumFrame {
    /// All bands at zero, no signal.
    pub const EMPTY: SpectrumFrame = SpectrumFrame {
        bands: [0; BAND_COUNT],
        signal_present: false,
    };

    /// Build a frame, clamping every band to the drawable range.
    pub const fn new(mut bands: [u8; BAND_COUNT], signal_present: bool) -> Self {
        let mut i = 0;
        while i < BAND_COUNT {
            if bands[i] > MAX_BAND_VALUE {
                bands[i] = MAX_BAND_VALUE;
            }
            i += 1;
        }
        SpectrumFrame { bands, signal_present }
    }

    pub fn bands(&self) -> &[u8; BAND_COUNT] {
        &self.bands
    }

    pub fn band(&self, index: usize) -> u8 {
        self.bands[index]
    }

    /// `true` when the bands come from real microphone data read recently.
    pub fn signal_present(&self) -> bool {
        self.signal_present
    }

    /// Same bands, different liveness.
    pub fn with_signal(mut self, signal_present: bool) -> Self {
        self.signal_present = signal_present;
        self
    }

    /// Mean bar height across all bands (integer division).
    pub fn mean_level(&self) -> u8 {
        let sum: u32 = self.bands.iter().map(|&b| b as u32).sum();
        (sum / BAND_COUNT as u32) as u8
    }

    /// Index of the tallest band (lowest index wins ties).
    pub fn peak_band(&self) -> usize {
        let mut best = 0;
        for (i, &b) in self.bands.iter().enumerate() {
            if b > self.bands[best] {
                best = i;
            }
        }
        best
    }
}

impl Default for SpectrumFrame {
    fn default() -> Self {
        Self::EMPTY
    }
}
