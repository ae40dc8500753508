//! Timestamped motion capture for drawing and erasing.
//!
//! A [`MotionRecording`] belongs to exactly one stroke and stores every pen
//! (or eraser) sample taken while that stroke was drawn. The document owns a
//! single [`EraserMotionRecording`] with every eraser contact of the session.

mod binary;
pub(crate) mod embedded;
mod eraser_recording;
mod recording;

pub use binary::RECORDING_MAGIC;
pub use eraser_recording::{EraserMotionPoint, EraserMotionRecording};
pub use recording::{MotionPoint, MotionRecording};

use std::sync::OnceLock;
use std::time::Instant;
use thiserror::Error;

/// Errors reading or writing the binary recording layout.
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Timestamp {0} does not fit the 32-bit binary layout")]
    TimestampOverflow(u64),
    #[error("Too many motion points for the binary layout: {0}")]
    TooManyPoints(usize),
    #[error("Invalid eraser flag byte: {0}")]
    InvalidFlag(u8),
    #[error("Unsupported recording format version: {0}")]
    UnsupportedVersion(u8),
}

/// Result type for recording serialization.
pub type RecordingResult<T> = Result<T, RecordingError>;

/// Milliseconds on a monotonic clock, counted from the first call in this process.
pub fn monotonic_millis() -> u64 {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    let origin = ORIGIN.get_or_init(Instant::now);
    origin.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_millis_never_decreases() {
        let a = monotonic_millis();
        let b = monotonic_millis();
        assert!(b >= a);
    }
}
