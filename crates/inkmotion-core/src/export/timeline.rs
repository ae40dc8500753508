//! Frame-by-frame playback of an exported motion description.
//!
//! Recorded strokes play one after another in document order, each for its
//! own recorded span, so idle time between strokes is skipped. Eraser events
//! follow once every stroke has been drawn. Strokes without a recording are
//! static and fully visible from the first frame.

use super::metadata::{EraserEvent, MotionMetadata};
use super::ExportResult;
use std::fs;
use std::path::Path;

/// How much of one stroke is visible at a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeProgress {
    pub page_index: usize,
    pub stroke_index: usize,
    pub visible_points: usize,
    pub total_points: usize,
}

impl StrokeProgress {
    pub fn is_complete(&self) -> bool {
        self.visible_points == self.total_points
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    page: usize,
    stroke: usize,
    /// Playback start in ms, `None` for static strokes.
    start_ms: Option<u64>,
}

/// Playback schedule over a [`MotionMetadata`].
#[derive(Debug, Clone)]
pub struct MotionTimeline {
    metadata: MotionMetadata,
    slots: Vec<Slot>,
    eraser_offset_ms: u64,
}

impl MotionTimeline {
    pub fn new(metadata: MotionMetadata) -> Self {
        let mut slots = Vec::new();
        let mut cursor = 0;

        for (page, page_meta) in metadata.pages.iter().enumerate() {
            for (stroke, stroke_meta) in page_meta.strokes.iter().enumerate() {
                let start_ms = stroke_meta.has_motion_recording.then_some(cursor);
                cursor += stroke_meta.duration_ms();
                slots.push(Slot {
                    page,
                    stroke,
                    start_ms,
                });
            }
        }

        Self {
            metadata,
            slots,
            eraser_offset_ms: cursor,
        }
    }

    /// Load a `motion_metadata.json` file.
    pub fn load(path: &Path) -> ExportResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(Self::new(MotionMetadata::from_json(&json)?))
    }

    pub fn metadata(&self) -> &MotionMetadata {
        &self.metadata
    }

    pub fn frame_rate(&self) -> u32 {
        self.metadata.frame_rate.max(1)
    }

    pub fn total_frames(&self) -> u64 {
        self.metadata.total_frames
    }

    /// Playback length: every stroke's span, then the eraser span.
    pub fn duration_ms(&self) -> u64 {
        self.eraser_offset_ms + self.metadata.eraser_events.last().map_or(0, |e| e.t)
    }

    /// Playback time of a frame in milliseconds.
    pub fn frame_time(&self, frame: u64) -> u64 {
        frame * 1000 / u64::from(self.frame_rate())
    }

    /// Playback start of a recorded stroke; `None` for static or unknown strokes.
    pub fn stroke_start(&self, page_index: usize, stroke_index: usize) -> Option<u64> {
        self.slots
            .iter()
            .find(|slot| slot.page == page_index && slot.stroke == stroke_index)
            .and_then(|slot| slot.start_ms)
    }

    /// Visibility of every stroke at `frame`, in document order.
    pub fn visible_points(&self, frame: u64) -> Vec<StrokeProgress> {
        let now = self.frame_time(frame);
        self.slots
            .iter()
            .map(|slot| {
                let page = &self.metadata.pages[slot.page];
                let points = &page.strokes[slot.stroke].motion_points;
                let visible_points = match slot.start_ms {
                    None => points.len(),
                    Some(start) if now < start => 0,
                    Some(start) => points.iter().take_while(|p| start + p.t <= now).count(),
                };
                StrokeProgress {
                    page_index: page.page_index,
                    stroke_index: slot.stroke,
                    visible_points,
                    total_points: points.len(),
                }
            })
            .collect()
    }

    /// Eraser events that have happened by `frame`.
    pub fn eraser_events_until(&self, frame: u64) -> &[EraserEvent] {
        let now = self.frame_time(frame);
        let events = &self.metadata.eraser_events;
        let count = events
            .iter()
            .take_while(|e| self.eraser_offset_ms + e.t <= now)
            .count();
        &events[..count]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::metadata::{
        BackgroundMetadata, LineStyleMetadata, MotionPointMetadata, PageMetadata, StrokeMetadata,
    };
    use crate::shapes::SerializableColor;

    fn stroke(times: &[u64], recorded: bool) -> StrokeMetadata {
        StrokeMetadata {
            tool: "pen".to_string(),
            width: 2.0,
            color: SerializableColor::black(),
            fill: false,
            fill_alpha: None,
            line_style: LineStyleMetadata {
                has_dashes: false,
                dashes: None,
            },
            has_motion_recording: recorded,
            motion_points: times
                .iter()
                .map(|t| MotionPointMetadata {
                    t: *t,
                    x: 0.0,
                    y: 0.0,
                    p: 0.5,
                    is_eraser: false,
                })
                .collect(),
        }
    }

    fn event(t: u64) -> EraserEvent {
        EraserEvent {
            t,
            x: 1.0,
            y: 1.0,
            size: 5.0,
            page_index: 0,
            affected_strokes: vec![],
        }
    }

    fn timeline() -> MotionTimeline {
        let page = PageMetadata {
            page_index: 0,
            width: 100.0,
            height: 100.0,
            background: BackgroundMetadata {
                kind: "plain".to_string(),
                config: String::new(),
                color: SerializableColor::white(),
            },
            strokes: vec![
                stroke(&[0, 100, 200], true),
                stroke(&[0, 0, 0], false),
                stroke(&[0, 100, 200, 300], true),
            ],
        };
        MotionTimeline::new(MotionMetadata::new(10, vec![page], vec![event(0), event(300)]))
    }

    fn visible(timeline: &MotionTimeline, frame: u64) -> Vec<usize> {
        timeline
            .visible_points(frame)
            .iter()
            .map(|p| p.visible_points)
            .collect()
    }

    #[test]
    fn test_schedule() {
        let timeline = timeline();
        assert_eq!(timeline.total_frames(), 9);
        assert_eq!(timeline.duration_ms(), 800);
        assert_eq!(timeline.stroke_start(0, 0), Some(0));
        assert_eq!(timeline.stroke_start(0, 1), None);
        assert_eq!(timeline.stroke_start(0, 2), Some(200));
        assert_eq!(timeline.frame_time(3), 300);
    }

    #[test]
    fn test_frame_zero_shows_static_strokes() {
        let timeline = timeline();
        assert_eq!(visible(&timeline, 0), vec![1, 3, 0]);
        assert!(timeline.visible_points(0)[1].is_complete());
    }

    #[test]
    fn test_strokes_play_in_sequence() {
        let timeline = timeline();
        assert_eq!(visible(&timeline, 2), vec![3, 3, 1]);
        assert_eq!(visible(&timeline, 4), vec![3, 3, 3]);
        assert_eq!(visible(&timeline, 5), vec![3, 3, 4]);
    }

    #[test]
    fn test_eraser_events_follow_strokes() {
        let timeline = timeline();
        assert!(timeline.eraser_events_until(4).is_empty());
        assert_eq!(timeline.eraser_events_until(5).len(), 1);
        assert_eq!(timeline.eraser_events_until(7).len(), 1);
        assert_eq!(timeline.eraser_events_until(8).len(), 2);
    }
}
