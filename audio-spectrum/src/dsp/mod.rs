//! Signal processing: windowing, FFT, band reduction, tone synthesis.
//!
//! Everything here works on fixed-size stack buffers and never allocates.
//! Floating point goes through [`libm`] so the same code runs on targets
//! without a hardware FPU runtime.

pub mod window;
pub mod fft;
pub mod spectrum;
pub mod tone;

pub use fft::Radix2Fft;
pub use spectrum::{
    band_bins, band_for_frequency, band_frequency_range, resolution_hz, SpectrumAnalyzer, BINS_PER_BAND,
};
pub use tone::{render_tone, SineOscillator};
pub use window::hamming;
