//! Acquisition + transform activity.

use crate::clock::Clock;
use crate::dsp::SpectrumAnalyzer;
use crate::error::AcquireError;
use crate::frame::SpectrumFrame;
use crate::io::{FramePublisher, SampleSource};
use crate::source::{AudioSource, Timeout};

/// Reads blocks, transforms them, and publishes one frame per iteration.
///
/// Each [`step()`](Self::step):
///
/// 1. Blocks on the audio read (forever by default; this task has nothing
///    else to do while it waits).
/// 2. On success, transforms the captured block. On failure, transforms
///    the fallback tone if nothing has ever been received, otherwise keeps
///    the previous bands.
/// 3. Applies the liveness grace window, whatever the read outcome.
/// 4. Publishes the bands stamped with the current liveness.
///
/// Read faults are logged and returned but never stop the task.
pub struct AcquisitionTask<'a, S, C> {
    source: SampleSource<S>,
    analyzer: SpectrumAnalyzer,
    publisher: FramePublisher<'a>,
    clock: C,
    timeout: Timeout,
    /// Bands published last; republished while reads are failing.
    current: SpectrumFrame,
    faulting: bool,
    fallback_logged: bool,
}

impl<'a, S, C> AcquisitionTask<'a, S, C>
where
    S: AudioSource,
    C: Clock,
{
    pub fn new(source: SampleSource<S>, analyzer: SpectrumAnalyzer, publisher: FramePublisher<'a>, clock: C) -> Self {
        AcquisitionTask {
            source,
            analyzer,
            publisher,
            clock,
            timeout: Timeout::Forever,
            current: SpectrumFrame::EMPTY,
            faulting: false,
            fallback_logged: false,
        }
    }

    /// Bound the audio read, for transports that must not block forever.
    pub fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one acquisition cycle. Always publishes exactly one frame.
    pub fn step(&mut self) -> Result<(), AcquireError<S::Error>> {
        let outcome = self.source.acquire(&self.clock, self.timeout).map(|_| ());
        match &outcome {
            Ok(()) => {
                self.current = self.analyzer.transform(self.source.block());
                if self.faulting {
                    log::info!("audio reads recovered");
                    self.faulting = false;
                }
            }
            Err(e) => {
                if self.faulting {
                    log::trace!("{}", e);
                } else {
                    log::warn!("{}", e);
                    self.faulting = true;
                }
                if !self.source.has_received() {
                    if !self.fallback_logged {
                        log::info!("no audio received yet, showing test tone");
                        self.fallback_logged = true;
                    }
                    self.current = self.analyzer.transform(self.source.block());
                }
            }
        }

        self.source.expire(self.clock.now_ms());
        let frame = self.current.with_signal(self.source.signal_present());
        self.publisher.publish(frame);
        outcome
    }

    /// Step forever.
    pub fn run(&mut self) -> ! {
        loop {
            let _ = self.step();
        }
    }

    pub fn source(&self) -> &SampleSource<S> {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut SampleSource<S> {
        &mut self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
