//! The two periodic activities and the start-up sequence.
//!
//! ```text
//!  AudioSource ─► AcquisitionTask ──publish──► SpectrumStore ──snapshot──► RenderTask ─► Display
//!                 (blocks on the read)                          (every 50 ms)
//! ```
//!
//! The tasks share nothing but the [`SpectrumStore`](crate::io::SpectrumStore).
//! They may run on separate cores, separate RTOS tasks or threads, or be
//! stepped from a single loop; the store's handoff is safe in every case.
//!
//! ## Usage with an RTOS
//!
//! ```ignore
//! static STORE: SpectrumStore = SpectrumStore::new();
//!
//! let (publisher, reader) = STORE.split().unwrap();
//! let mut source = SampleSource::new(i2s_mic);
//! let renderer = Renderer::new();
//! start_up(&renderer, &mut source, &clock, &mut tft);
//!
//! let mut acquisition = AcquisitionTask::new(source, SpectrumAnalyzer::default(), publisher, clock);
//! spawn_pinned(move || acquisition.run());      // core 1
//!
//! RenderTask::new(renderer, tft, reader, delay).run() // core 0
//! ```

mod acquisition;
mod render;

pub use acquisition::AcquisitionTask;
pub use render::RenderTask;

use crate::clock::Clock;
use crate::display::{Display, Renderer};
use crate::io::SampleSource;
use crate::source::AudioSource;

/// Bring-up sequence run once before the tasks start.
///
/// Shows the splash screen, probes the microphone, then clears the panel
/// and draws the grid. Returns `true` if the probe read any audio.
/// Display failures are logged and otherwise ignored.
pub fn start_up<S, C, D>(renderer: &Renderer, source: &mut SampleSource<S>, clock: &C, display: &mut D) -> bool
where
    S: AudioSource,
    C: Clock,
    D: Display,
{
    if let Err(e) = renderer.splash(display) {
        log::debug!("splash screen draw failed: {:?}", e);
    }
    let responded = source.probe(clock).is_ok();
    if let Err(e) = renderer.clear(display) {
        log::debug!("panel clear failed: {:?}", e);
    }
    log::info!("spectrum analyzer started");
    responded
}
