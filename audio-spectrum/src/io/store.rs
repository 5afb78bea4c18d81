//! The single shared spectrum result.
//!
//! [`SpectrumStore`] is the only state the acquisition and render
//! activities share. It is a [`TripleBuffer`] of whole [`SpectrumFrame`]s:
//! a publish replaces the frame in one atomic handoff, so a snapshot is
//! always one complete frame, never bands from two different publishes.
//! A snapshot is at most one acquisition cycle old; the renderer may see
//! the same frame twice or skip frames, neither of which is an error.
//!
//! ## Usage
//!
//! ```
//! use audio_spectrum::io::SpectrumStore;
//! use audio_spectrum::SpectrumFrame;
//!
//! static STORE: SpectrumStore = SpectrumStore::new();
//!
//! let (mut publisher, mut reader) = STORE.split().unwrap();
//! publisher.publish(SpectrumFrame::new([10; 32], true));
//! assert_eq!(reader.snapshot().band(0), 10);
//! ```

use crate::frame::SpectrumFrame;

use super::triple_buffer::{Reader, TripleBuffer, Writer};

/// Latest-frame handoff between one producer and one consumer.
pub struct SpectrumStore {
    frames: TripleBuffer<SpectrumFrame>,
}

impl SpectrumStore {
    /// A store holding [`SpectrumFrame::EMPTY`]. Usable in a `static`.
    pub const fn new() -> Self {
        SpectrumStore {
            frames: TripleBuffer::new(SpectrumFrame::EMPTY),
        }
    }

    /// Take the producer and consumer handles. Only the first call succeeds.
    pub fn split(&self) -> Option<(FramePublisher<'_>, FrameReader<'_>)> {
        self.frames
            .split()
            .map(|(writer, reader)| (FramePublisher { writer }, FrameReader { reader }))
    }
}

impl Default for SpectrumStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side of a [`SpectrumStore`], owned by the acquisition task.
pub struct FramePublisher<'a> {
    writer: Writer<'a, SpectrumFrame>,
}

impl FramePublisher<'_> {
    /// Replace the current frame. Never blocks.
    pub fn publish(&mut self, frame: SpectrumFrame) {
        self.writer.write(frame);
    }
}

/// Consumer side of a [`SpectrumStore`], owned by the render task.
pub struct FrameReader<'a> {
    reader: Reader<'a, SpectrumFrame>,
}

impl FrameReader<'_> {
    /// Copy out the latest complete frame. Never blocks.
    pub fn snapshot(&mut self) -> SpectrumFrame {
        self.reader.read()
    }

    /// `true` if a frame was published since the last snapshot.
    pub fn has_update(&self) -> bool {
        self.reader.has_update()
    }
}
