//! Audio acquisition and the acquisition → render handoff.
//!
//! ## Components
//!
//! | Type | Side | Description |
//! |------|------|-------------|
//! | [`SampleSource`] | acquisition | Whole-block reads, liveness, fallback tone |
//! | [`FramePublisher`] | acquisition | Publishes finished [`SpectrumFrame`](crate::SpectrumFrame)s |
//! | [`FrameReader`] | render | Snapshots the newest frame |
//! | [`SpectrumStore`] | shared | Owns the frames; hands out one publisher/reader pair |
//!
//! ## Utilities
//!
//! - [`triple_buffer`]: lock-free single-producer single-consumer latest-value buffer

pub mod triple_buffer;
pub mod store;
pub mod sample_source;

pub use sample_source::SampleSource;
pub use store::{FramePublisher, FrameReader, SpectrumStore};
pub use triple_buffer::TripleBuffer;
