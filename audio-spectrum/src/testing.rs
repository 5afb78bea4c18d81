//! Host-side doubles for the hardware seams: a hand-driven clock, a
//! scripted audio transport, and an in-memory panel.

use core::cell::Cell;
use std::collections::VecDeque;
use std::string::{String, ToString};
use std::time::Instant;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::clock::Clock;
use crate::config::DisplayGeometry as G;
use crate::constants::AUDIO_BLOCK_SAMPLES;
use crate::display::{Display, Rgb565, GLYPH_WIDTH};
use crate::error::ReadError;
use crate::frame::AudioBlock;
use crate::source::{AudioSource, Timeout};

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock(Cell<u32>);

impl ManualClock {
    pub fn at(ms: u32) -> Self {
        ManualClock(Cell::new(ms))
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

/// Wall-clock milliseconds since construction.
pub struct SystemClock(Instant);

impl SystemClock {
    pub fn new() -> Self {
        SystemClock(Instant::now())
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        self.0.elapsed().as_millis() as u32
    }
}

/// Delay that returns immediately, recording how long it was asked to wait.
#[derive(Debug, Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// One scripted outcome of [`AudioSource::read_block`].
#[derive(Debug, Clone, Copy)]
pub enum Read {
    /// Fill the buffer from this block and report every byte read.
    Block(AudioBlock),
    /// Report this many bytes without touching the buffer.
    Short(usize),
    Timeout,
    Driver(i32),
}

/// Audio transport that replays a fixed script, then times out forever.
pub struct ScriptedSource {
    script: VecDeque<Read>,
    timeouts: Vec<Timeout>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Read>) -> Self {
        ScriptedSource {
            script: script.into_iter().collect(),
            timeouts: Vec::new(),
        }
    }

    /// Timeout argument of every read so far.
    pub fn timeouts(&self) -> &[Timeout] {
        &self.timeouts
    }
}

impl AudioSource for ScriptedSource {
    type Error = i32;

    fn read_block(&mut self, buf: &mut [i16], timeout: Timeout) -> Result<usize, ReadError<i32>> {
        self.timeouts.push(timeout);
        match self.script.pop_front() {
            Some(Read::Block(block)) => {
                let n = buf.len().min(AUDIO_BLOCK_SAMPLES);
                buf[..n].copy_from_slice(&block[..n]);
                Ok(n * core::mem::size_of::<i16>())
            }
            Some(Read::Short(bytes)) => Ok(bytes),
            Some(Read::Driver(code)) => Err(ReadError::Driver(code)),
            Some(Read::Timeout) | None => Err(ReadError::Timeout),
        }
    }
}

/// A string printed on a [`FrameBufferDisplay`], with the pen state at the time.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRecord {
    pub text: String,
    pub x: u16,
    pub y: u16,
    pub color: Rgb565,
    pub size: u8,
}

/// 160×80 in-memory panel. Text is recorded rather than rasterized.
pub struct FrameBufferDisplay {
    pixels: Vec<Rgb565>,
    texts: Vec<TextRecord>,
    cursor: (u16, u16),
    text_color: Rgb565,
    text_size: u8,
    failures_left: usize,
}

impl FrameBufferDisplay {
    pub fn new() -> Self {
        FrameBufferDisplay {
            pixels: std::vec![Rgb565::BLACK; G::WIDTH as usize * G::HEIGHT as usize],
            texts: Vec::new(),
            cursor: (0, 0),
            text_color: Rgb565::WHITE,
            text_size: 1,
            failures_left: 0,
        }
    }

    pub fn pixel(&self, x: u16, y: u16) -> Rgb565 {
        self.pixels[y as usize * G::WIDTH as usize + x as usize]
    }

    pub fn texts(&self) -> &[TextRecord] {
        &self.texts
    }

    /// Make the next `n` fallible operations fail without drawing.
    pub fn fail_ops(&mut self, n: usize) {
        self.failures_left = n;
    }

    fn check(&mut self) -> Result<(), ()> {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            Err(())
        } else {
            Ok(())
        }
    }

    fn put(&mut self, x: u16, y: u16, color: Rgb565) {
        if x < G::WIDTH && y < G::HEIGHT {
            self.pixels[y as usize * G::WIDTH as usize + x as usize] = color;
        }
    }
}

impl Display for FrameBufferDisplay {
    type Error = ();

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), ()> {
        self.check()?;
        for py in y..y.saturating_add(h) {
            for px in x..x.saturating_add(w) {
                self.put(px, py, color);
            }
        }
        Ok(())
    }

    fn draw_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), ()> {
        self.check()?;
        if w == 0 || h == 0 {
            return Ok(());
        }
        let (right, bottom) = (x + w - 1, y + h - 1);
        for px in x..=right {
            self.put(px, y, color);
            self.put(px, bottom, color);
        }
        for py in y..=bottom {
            self.put(x, py, color);
            self.put(right, py, color);
        }
        Ok(())
    }

    fn draw_fast_hline(&mut self, x: u16, y: u16, w: u16, color: Rgb565) -> Result<(), ()> {
        self.check()?;
        for px in x..x.saturating_add(w) {
            self.put(px, y, color);
        }
        Ok(())
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = (x, y);
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size;
    }

    fn print(&mut self, text: &str) -> Result<(), ()> {
        self.check()?;
        self.texts.push(TextRecord {
            text: text.to_string(),
            x: self.cursor.0,
            y: self.cursor.1,
            color: self.text_color,
            size: self.text_size,
        });
        let advance = text.len() as u16 * GLYPH_WIDTH * self.text_size as u16;
        self.cursor.0 = self.cursor.0.saturating_add(advance);
        Ok(())
    }
}
