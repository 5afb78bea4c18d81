use crate::error::ReadError;

/// How long an [`AudioSource`] may block waiting for data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Give up after this many milliseconds.
    Millis(u32),
    /// Wait until data arrives or the driver fails.
    Forever,
}

/// Blocking transport that delivers mono 16-bit samples (e.g. an I²S microphone).
///
/// Implementations fill `buf` from the front and return the number of
/// **bytes** written, mirroring DMA-style driver APIs. Returning fewer than
/// `size_of_val(buf)` bytes is a short read; the caller decides what to do
/// with it.
pub trait AudioSource {
    /// Driver-specific error code.
    type Error: core::fmt::Debug;

    /// Block for up to `timeout` and read samples into `buf`.
    fn read_block(&mut self, buf: &mut [i16], timeout: Timeout) -> Result<usize, ReadError<Self::Error>>;
}

impl<T: AudioSource + ?Sized> AudioSource for &mut T {
    type Error = T::Error;

    fn read_block(&mut self, buf: &mut [i16], timeout: Timeout) -> Result<usize, ReadError<Self::Error>> {
        (**self).read_block(buf, timeout)
    }
}
