//! # audio-spectrum
//!
//! A `no_std`, zero-allocation real-time audio spectrum analyzer. It reads
//! 128-sample blocks from a microphone, reduces each block to 32 frequency
//! band magnitudes, and draws them as a color-coded bar graph on a 160×80
//! RGB565 panel, with a status strip reporting whether audio is flowing.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Seams | [`source`] / [`clock`] / [`display`] | `AudioSource`, `Clock` and `Display` traits |
//! | I/O | [`io`] | Block acquisition with liveness, lock-free frame store |
//! | DSP | [`dsp`] | Hamming window, radix-2 FFT, band reduction, tone synthesis |
//! | Output | [`display`] | Bar-graph renderer, `embedded-graphics` adapter (feature-gated) |
//! | Tasks | [`scheduler`] | Acquisition and render activities, start-up sequence |
//!
//! ## Quick start
//!
//! ```ignore
//! use audio_spectrum::dsp::SpectrumAnalyzer;
//! use audio_spectrum::io::{SampleSource, SpectrumStore};
//! use audio_spectrum::display::Renderer;
//! use audio_spectrum::scheduler::{start_up, AcquisitionTask, RenderTask};
//!
//! static STORE: SpectrumStore = SpectrumStore::new();
//!
//! let (publisher, reader) = STORE.split().unwrap();
//! let mut source = SampleSource::new(mic);
//! let renderer = Renderer::new();
//! start_up(&renderer, &mut source, &clock, &mut panel);
//!
//! // Acquisition context (second core, RTOS task, thread):
//! AcquisitionTask::new(source, SpectrumAnalyzer::default(), publisher, clock).run();
//!
//! // Render context:
//! RenderTask::new(renderer, panel, reader, delay).run();
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `graphics` | yes | [`display::GraphicsDisplay`] over any `embedded-graphics` `DrawTarget` |
//!
//! ## Audio parameters
//!
//! - **Block size:** 128 samples ([`constants::AUDIO_BLOCK_SAMPLES`])
//! - **Sample rate:** 44 100 Hz ([`constants::SAMPLE_RATE_HZ`])
//! - **Sample format:** `i16` (signed 16-bit, mono)
//! - **Bands:** 32 ([`constants::BAND_COUNT`]), two FFT bins each

#![cfg_attr(not(test), no_std)]

pub mod constants;
pub mod config;
pub mod error;
pub mod clock;
pub mod source;
pub mod frame;
pub mod dsp;
pub mod io;
pub mod display;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use clock::Clock;
pub use config::{DisplayGeometry, GainConfig};
pub use error::{AcquireError, ReadError};
pub use frame::{AudioBlock, SpectrumFrame};
pub use source::{AudioSource, Timeout};
