//! Acquisition fault taxonomy.
//!
//! None of these are fatal. The acquisition task logs them and retries on
//! its next iteration; sustained failure only surfaces as the liveness flag
//! dropping on the status strip.

use core::fmt;

/// Failure reported by an [`AudioSource`](crate::source::AudioSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError<E> {
    /// No data arrived before the timeout expired.
    Timeout,
    /// The transport driver reported an error.
    Driver(E),
}

/// Failure of one [`SampleSource::acquire`](crate::io::SampleSource::acquire) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireError<E> {
    /// No data arrived before the timeout expired.
    Timeout,
    /// The transport driver reported an error.
    Driver(E),
    /// The driver returned fewer bytes than a whole block.
    ShortRead { bytes: usize, expected: usize },
}

impl<E> From<ReadError<E>> for AcquireError<E> {
    fn from(err: ReadError<E>) -> Self {
        match err {
            ReadError::Timeout => AcquireError::Timeout,
            ReadError::Driver(e) => AcquireError::Driver(e),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for ReadError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Timeout => f.write_str("audio read timed out"),
            ReadError::Driver(e) => write!(f, "audio driver error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for AcquireError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireError::Timeout => f.write_str("audio read timed out"),
            AcquireError::Driver(e) => write!(f, "audio driver error: {e:?}"),
            AcquireError::ShortRead { bytes, expected } => {
                write!(f, "short audio read: {bytes} of {expected} bytes")
            }
        }
    }
}
