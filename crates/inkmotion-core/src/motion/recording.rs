//! Per-stroke motion recording.

use crate::shapes::InkPoint;
use serde::{Deserialize, Serialize};

/// A single recorded sample: position, pressure and capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionPoint {
    pub point: InkPoint,
    /// Capture time in milliseconds.
    pub timestamp: u64,
    /// True if the sample was taken while erasing.
    pub is_eraser: bool,
}

impl MotionPoint {
    pub fn new(point: InkPoint, timestamp: u64, is_eraser: bool) -> Self {
        Self {
            point,
            timestamp,
            is_eraser,
        }
    }
}

/// Append-only, chronologically ordered log of a stroke's samples.
///
/// Samples are expected in capture order; timestamps are not re-validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionRecording {
    motion_points: Vec<MotionPoint>,
}

impl MotionRecording {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_points(motion_points: Vec<MotionPoint>) -> Self {
        Self { motion_points }
    }

    /// Append a sample.
    pub fn add_motion_point(&mut self, point: InkPoint, timestamp: u64, is_eraser: bool) {
        self.motion_points
            .push(MotionPoint::new(point, timestamp, is_eraser));
    }

    pub fn motion_points(&self) -> &[MotionPoint] {
        &self.motion_points
    }

    pub fn has_motion_data(&self) -> bool {
        !self.motion_points.is_empty()
    }

    pub fn motion_point_count(&self) -> usize {
        self.motion_points.len()
    }

    pub fn clear(&mut self) {
        self.motion_points.clear();
    }

    /// Timestamp of the first sample, or 0 when empty.
    /// Check [`has_motion_data`](Self::has_motion_data) to tell the two apart.
    pub fn start_timestamp(&self) -> u64 {
        self.motion_points.first().map_or(0, |p| p.timestamp)
    }

    /// Timestamp of the last sample, or 0 when empty.
    pub fn end_timestamp(&self) -> u64 {
        self.motion_points.last().map_or(0, |p| p.timestamp)
    }

    /// Time between first and last sample.
    pub fn duration(&self) -> u64 {
        self.end_timestamp().saturating_sub(self.start_timestamp())
    }
}
