//! Document-level log of eraser contacts.

use crate::shapes::InkPoint;
use serde::{Deserialize, Serialize};

/// One eraser contact: where, when, how big, and which strokes it touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraserMotionPoint {
    pub point: InkPoint,
    /// Capture time in milliseconds.
    pub timestamp: u64,
    /// Eraser radius at this sample.
    pub eraser_size: f64,
    pub page_index: usize,
    /// Layer indices of the strokes touched by this contact.
    #[serde(default)]
    pub affected_stroke_indices: Vec<usize>,
}

impl EraserMotionPoint {
    pub fn new(point: InkPoint, timestamp: u64, eraser_size: f64, page_index: usize) -> Self {
        Self {
            point,
            timestamp,
            eraser_size,
            page_index,
            affected_stroke_indices: Vec::new(),
        }
    }

    pub fn add_affected_stroke(&mut self, stroke_index: usize) {
        self.affected_stroke_indices.push(stroke_index);
    }
}

/// Every eraser contact of the document, in capture order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EraserMotionRecording {
    motion_points: Vec<EraserMotionPoint>,
}

impl EraserMotionRecording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_motion_point(
        &mut self,
        point: InkPoint,
        timestamp: u64,
        eraser_size: f64,
        page_index: usize,
    ) {
        self.motion_points.push(EraserMotionPoint::new(
            point,
            timestamp,
            eraser_size,
            page_index,
        ));
    }

    /// Record a touched stroke on the most recent sample. No-op when empty.
    pub fn add_affected_stroke_to_last(&mut self, stroke_index: usize) {
        if let Some(last) = self.motion_points.last_mut() {
            last.add_affected_stroke(stroke_index);
        }
    }

    pub fn motion_points(&self) -> &[EraserMotionPoint] {
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
    pub fn start_timestamp(&self) -> u64 {
        self.motion_points.first().map_or(0, |p| p.timestamp)
    }

    /// Timestamp of the last sample, or 0 when empty.
    pub fn end_timestamp(&self) -> u64 {
        self.motion_points.last().map_or(0, |p| p.timestamp)
    }

    pub fn duration(&self) -> u64 {
        self.end_timestamp().saturating_sub(self.start_timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affected_strokes_go_to_last_sample() {
        let mut rec = EraserMotionRecording::new();
        rec.add_affected_stroke_to_last(4);
        assert!(!rec.has_motion_data());

        rec.add_motion_point(InkPoint::without_pressure(1.0, 1.0), 5000, 3.0, 0);
        rec.add_motion_point(InkPoint::without_pressure(2.0, 1.0), 5300, 3.0, 0);
        rec.add_affected_stroke_to_last(3);
        rec.add_affected_stroke_to_last(5);

        let points = rec.motion_points();
        assert!(points[0].affected_stroke_indices.is_empty());
        assert_eq!(points[1].affected_stroke_indices, vec![3, 5]);
        assert_eq!(rec.start_timestamp(), 5000);
        assert_eq!(rec.end_timestamp(), 5300);
        assert_eq!(rec.duration(), 300);
    }

    #[test]
    fn test_empty_recording() {
        let rec = EraserMotionRecording::new();
        assert_eq!(rec.motion_point_count(), 0);
        assert_eq!(rec.start_timestamp(), 0);
        assert_eq!(rec.end_timestamp(), 0);
    }
}
