//! Block acquisition with liveness tracking.
//!
//! [`SampleSource`] wraps an [`AudioSource`] transport, reads whole
//! [`AudioBlock`]s into a buffer it owns, and keeps the "is audio flowing"
//! state that the status strip shows.
//!
//! ## Liveness
//!
//! ```text
//!            full read                    > LIVENESS_GRACE_MS without
//!   silent ───────────► present ──────── a full read (expire) ─────► silent
//!                        ▲   │
//!                        └───┘ full read (refreshes timestamp)
//! ```
//!
//! A failed read on its own never clears liveness; only the grace window
//! does, so a momentary driver hiccup does not blink the status strip.
//!
//! ## Fallback tone
//!
//! Until a whole block has been captured, [`block()`](SampleSource::block)
//! returns a fixed 440 Hz test tone so the panel shows something
//! recognizable with no microphone attached. After the first full read the
//! captured block is used from then on, even if the microphone later goes
//! silent. A successful startup probe counts as a received read but fills
//! no block, so the tone stays in `block()` until a full read lands.

use crate::clock::{elapsed_ms, Clock};
use crate::constants::{
    AUDIO_BLOCK_SAMPLES, LIVENESS_GRACE_MS, PROBE_SAMPLES, PROBE_TIMEOUT_MS, TEST_TONE_AMPLITUDE,
    TEST_TONE_HZ,
};
use crate::dsp::tone::render_tone;
use crate::error::AcquireError;
use crate::frame::{AudioBlock, AUDIO_BLOCK_BYTES};
use crate::source::{AudioSource, Timeout};

/// Fixed-size block reader with liveness state.
pub struct SampleSource<S> {
    source: S,
    block: AudioBlock,
    fallback: AudioBlock,
    /// Clock reading at the last successful read.
    last_success_ms: u32,
    signal_present: bool,
    /// Set by the first successful read and never cleared.
    received: bool,
    /// Set once `block` holds a whole captured block.
    captured: bool,
}

impl<S: AudioSource> SampleSource<S> {
    pub fn new(source: S) -> Self {
        let mut fallback = [0; AUDIO_BLOCK_SAMPLES];
        render_tone(&mut fallback, TEST_TONE_HZ, TEST_TONE_AMPLITUDE);
        SampleSource {
            source,
            block: [0; AUDIO_BLOCK_SAMPLES],
            fallback,
            last_success_ms: 0,
            signal_present: false,
            received: false,
            captured: false,
        }
    }

    /// Read one whole block, blocking for up to `timeout`.
    ///
    /// A full read marks the signal present and stamps the time (taken from
    /// `clock` after the read returns). Anything less is an error and leaves
    /// liveness untouched.
    pub fn acquire<C: Clock>(
        &mut self,
        clock: &C,
        timeout: Timeout,
    ) -> Result<&AudioBlock, AcquireError<S::Error>> {
        let bytes = self.source.read_block(&mut self.block, timeout)?;
        if bytes != AUDIO_BLOCK_BYTES {
            return Err(AcquireError::ShortRead {
                bytes,
                expected: AUDIO_BLOCK_BYTES,
            });
        }
        self.mark_success(clock.now_ms());
        self.captured = true;
        Ok(&self.block)
    }

    /// Startup check: read a few samples with a short timeout.
    ///
    /// Any non-empty read counts as a successful read (it primes liveness
    /// and retires the fallback tone). Returns the number of bytes read.
    pub fn probe<C: Clock>(&mut self, clock: &C) -> Result<usize, AcquireError<S::Error>> {
        let mut probe = [0i16; PROBE_SAMPLES];
        match self.source.read_block(&mut probe, Timeout::Millis(PROBE_TIMEOUT_MS)) {
            Ok(bytes) if bytes > 0 => {
                log::info!("microphone probe: read {} bytes, first sample {}", bytes, probe[0]);
                self.mark_success(clock.now_ms());
                Ok(bytes)
            }
            Ok(bytes) => {
                log::warn!("microphone probe failed: empty read");
                Err(AcquireError::ShortRead {
                    bytes,
                    expected: core::mem::size_of_val(&probe),
                })
            }
            Err(e) => {
                let e = AcquireError::from(e);
                log::warn!("microphone probe failed: {}", e);
                Err(e)
            }
        }
    }

    fn mark_success(&mut self, now_ms: u32) {
        if !self.signal_present {
            log::info!("microphone signal present");
        }
        self.signal_present = true;
        self.received = true;
        self.last_success_ms = now_ms;
    }

    /// Apply the grace window. Returns `true` if this call cleared liveness.
    pub fn expire(&mut self, now_ms: u32) -> bool {
        if self.signal_present && elapsed_ms(self.last_success_ms, now_ms) > LIVENESS_GRACE_MS {
            log::info!(
                "no audio for {} ms, reporting silence",
                elapsed_ms(self.last_success_ms, now_ms)
            );
            self.signal_present = false;
            return true;
        }
        false
    }

    /// `true` while real audio has been read within the grace window.
    pub fn signal_present(&self) -> bool {
        self.signal_present
    }

    /// `true` once any read has ever succeeded.
    pub fn has_received(&self) -> bool {
        self.received
    }

    /// Time of the last successful read, if any.
    pub fn last_success_ms(&self) -> Option<u32> {
        self.received.then_some(self.last_success_ms)
    }

    /// The block the transform should consume: the fallback tone until a
    /// whole block has been captured, the latest captured block afterwards.
    pub fn block(&self) -> &AudioBlock {
        if self.captured {
            &self.block
        } else {
            &self.fallback
        }
    }

    /// The fixed fallback tone block.
    pub fn fallback(&self) -> &AudioBlock {
        &self.fallback
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualClock, Read, ScriptedSource};

    fn ramp() -> AudioBlock {
        core::array::from_fn(|i| i as i16 * 3)
    }

    #[test]
    fn starts_silent_with_fallback_tone() {
        let src = SampleSource::new(ScriptedSource::new([]));
        assert!(!src.signal_present());
        assert!(!src.has_received());
        assert_eq!(src.last_success_ms(), None);
        assert_eq!(src.block(), src.fallback());
        assert_eq!(src.block()[1], 62);
    }

    #[test]
    fn full_read_sets_liveness() {
        let clock = ManualClock::at(500);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Block(ramp())]));
        let block = src.acquire(&clock, Timeout::Forever).unwrap();
        assert_eq!(block, &ramp());
        assert!(src.signal_present());
        assert!(src.has_received());
        assert_eq!(src.last_success_ms(), Some(500));
        assert_eq!(src.block(), &ramp());
    }

    #[test]
    fn short_read_is_an_error() {
        let clock = ManualClock::at(0);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Short(100)]));
        let err = src.acquire(&clock, Timeout::Forever).unwrap_err();
        assert_eq!(err, AcquireError::ShortRead { bytes: 100, expected: 256 });
        assert!(!src.signal_present());
        assert!(!src.has_received());
    }

    #[test]
    fn driver_faults_pass_through() {
        let clock = ManualClock::at(0);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Timeout, Read::Driver(-1)]));
        assert_eq!(src.acquire(&clock, Timeout::Millis(10)).unwrap_err(), AcquireError::Timeout);
        assert_eq!(src.acquire(&clock, Timeout::Millis(10)).unwrap_err(), AcquireError::Driver(-1));
    }

    #[test]
    fn liveness_survives_isolated_failure() {
        let clock = ManualClock::at(0);
        let mut src = SampleSource::new(ScriptedSource::new([
            Read::Block(ramp()),
            Read::Driver(5),
            Read::Block(ramp()),
        ]));
        src.acquire(&clock, Timeout::Forever).unwrap();
        clock.advance(3);
        assert!(src.acquire(&clock, Timeout::Forever).is_err());
        assert!(!src.expire(clock.now_ms()));
        assert!(src.signal_present());
        clock.advance(3);
        src.acquire(&clock, Timeout::Forever).unwrap();
        assert!(src.signal_present());
    }

    #[test]
    fn liveness_expires_after_grace_window() {
        let clock = ManualClock::at(1_000);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Block(ramp())]));
        src.acquire(&clock, Timeout::Forever).unwrap();

        // Exactly at the grace window: still present.
        assert!(!src.expire(1_000 + LIVENESS_GRACE_MS));
        assert!(src.signal_present());

        assert!(src.expire(1_001 + LIVENESS_GRACE_MS));
        assert!(!src.signal_present());
        // Already silent: no second transition.
        assert!(!src.expire(5_000));
    }

    #[test]
    fn one_read_restores_liveness() {
        let clock = ManualClock::at(0);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Block(ramp()), Read::Block([1; AUDIO_BLOCK_SAMPLES])]));
        src.acquire(&clock, Timeout::Forever).unwrap();
        clock.advance(2_000);
        src.expire(clock.now_ms());
        assert!(!src.signal_present());

        src.acquire(&clock, Timeout::Forever).unwrap();
        assert!(src.signal_present());
        assert_eq!(src.last_success_ms(), Some(2_000));
    }

    #[test]
    fn expiry_tolerates_clock_wrap() {
        let clock = ManualClock::at(u32::MAX - 100);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Block(ramp())]));
        src.acquire(&clock, Timeout::Forever).unwrap();
        // 500 ms later, counter has wrapped.
        assert!(!src.expire(399));
        assert!(src.expire(1_000));
    }

    #[test]
    fn fallback_retired_for_good_after_first_read() {
        let clock = ManualClock::at(0);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Block(ramp())]));
        src.acquire(&clock, Timeout::Forever).unwrap();
        src.expire(10_000);
        assert!(!src.signal_present());
        // Silent again, but the last captured block is used, not the tone.
        assert_eq!(src.block(), &ramp());
    }

    #[test]
    fn probe_counts_as_successful_read() {
        let clock = ManualClock::at(42);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Block([9; AUDIO_BLOCK_SAMPLES])]));
        assert_eq!(src.probe(&clock), Ok(20));
        assert!(src.signal_present());
        assert!(src.has_received());
        assert_eq!(src.last_success_ms(), Some(42));
        let timeouts = src.source_mut().timeouts();
        assert_eq!(timeouts, &[Timeout::Millis(PROBE_TIMEOUT_MS)]);
    }

    #[test]
    fn startup_check_alone_leaves_fallback_block() {
        let clock = ManualClock::at(0);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Block(ramp()), Read::Block(ramp())]));
        src.probe(&clock).unwrap();
        assert!(src.has_received());
        // The startup read used its own small buffer, not the capture block.
        assert_eq!(src.block(), src.fallback());

        src.acquire(&clock, Timeout::Forever).unwrap();
        assert_eq!(src.block(), &ramp());
    }

    #[test]
    fn failed_probe_keeps_fallback() {
        let clock = ManualClock::at(0);
        let mut src = SampleSource::new(ScriptedSource::new([Read::Timeout]));
        assert_eq!(src.probe(&clock), Err(AcquireError::Timeout));
        assert!(!src.has_received());
        assert_eq!(src.block(), src.fallback());

        let mut src = SampleSource::new(ScriptedSource::new([Read::Short(0)]));
        assert_eq!(src.probe(&clock), Err(AcquireError::ShortRead { bytes: 0, expected: 20 }));
    }
}
