//! Sine tone generation.
//!
//! [`render_tone`] produces the fixed fallback block shown before any real
//! audio arrives. [`SineOscillator`] is the phase-continuous variant, used
//! to synthesize a stream of blocks (simulated microphones, bench tests).

use core::f64::consts::PI;

use crate::constants::SAMPLE_RATE_HZ;

/// Write `amplitude * sin(2π·hz·i / SAMPLE_RATE_HZ)` into `block`, starting at phase zero.
///
/// Samples are truncated toward zero and saturate at the `i16` limits.
pub fn render_tone(block: &mut [i16], hz: f64, amplitude: f64) {
    for (i, sample) in block.iter_mut().enumerate() {
        let phase = 2.0 * PI * hz * i as f64 / SAMPLE_RATE_HZ as f64;
        *sample = to_sample(amplitude * libm::sin(phase));
    }
}

#[inline]
fn to_sample(value: f64) -> i16 {
    // `as` saturates and truncates toward zero.
    value as i16
}

/// Sine oscillator with a 32-bit phase accumulator.
///
/// The accumulator wraps naturally at 2³² (= 360°), so the phase stays
/// exact across arbitrarily many blocks.
///
/// # Example
/// ```
/// use audio_spectrum::dsp::SineOscillator;
///
/// let mut osc = SineOscillator::new(440.0, 1000.0);
/// let mut block = [0i16; 128];
/// osc.fill(&mut block);
/// assert!(block.iter().any(|&s| s != 0));
/// ```
pub struct SineOscillator {
    phase_accumulator: u32,
    phase_increment: u32,
    amplitude: f64,
}

impl SineOscillator {
    /// Oscillator at `hz` with peak `amplitude` in raw sample units.
    pub fn new(hz: f64, amplitude: f64) -> Self {
        let mut osc = SineOscillator {
            phase_accumulator: 0,
            phase_increment: 0,
            amplitude,
        };
        osc.frequency(hz);
        osc
    }

    /// Set the frequency in Hz without resetting phase.
    pub fn frequency(&mut self, hz: f64) {
        let inc = hz * (4_294_967_296.0 / SAMPLE_RATE_HZ as f64);
        self.phase_increment = inc as u32;
    }

    /// Set the peak amplitude in raw sample units.
    pub fn amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude;
    }

    /// Generate the next `block.len()` samples.
    pub fn fill(&mut self, block: &mut [i16]) {
        let mut ph = self.phase_accumulator;
        for sample in block.iter_mut() {
            let angle = 2.0 * PI * (ph as f64 / 4_294_967_296.0);
            *sample = to_sample(self.amplitude * libm::sin(angle));
            ph = ph.wrapping_add(self.phase_increment);
        }
        self.phase_accumulator = ph;
    }
}
