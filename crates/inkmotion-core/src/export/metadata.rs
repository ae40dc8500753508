//! JSON schema of `motion_metadata.json` and its construction from a document.

use crate::document::{Document, Page};
use crate::motion::EraserMotionRecording;
use crate::shapes::{SerializableColor, Stroke};
use serde::{Deserialize, Serialize};

/// Number of frames needed to play `duration_ms` at `frame_rate`.
/// A zero duration still yields one frame.
pub fn total_frames(duration_ms: u64, frame_rate: u32) -> u64 {
    if duration_ms == 0 {
        return 1;
    }
    duration_ms * u64::from(frame_rate) / 1000 + 1
}

/// One sample in the export, with its timestamp rebased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionPointMetadata {
    pub t: u64,
    pub x: f64,
    pub y: f64,
    pub p: f64,
    pub is_eraser: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyleMetadata {
    pub has_dashes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashes: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeMetadata {
    pub tool: String,
    pub width: f64,
    pub color: SerializableColor,
    pub fill: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_alpha: Option<u8>,
    pub line_style: LineStyleMetadata,
    pub has_motion_recording: bool,
    pub motion_points: Vec<MotionPointMetadata>,
}

impl StrokeMetadata {
    /// Describe a stroke.
    ///
    /// Recorded samples are rebased to the stroke's first sample. A stroke
    /// without a recording gets one synthesized sample per path point, all
    /// at time 0.
    pub fn from_stroke(stroke: &Stroke) -> Self {
        let motion_points = match stroke.motion_recording() {
            Some(motion) => {
                let start = motion.start_timestamp();
                motion
                    .motion_points()
                    .iter()
                    .map(|mp| MotionPointMetadata {
                        t: mp.timestamp.saturating_sub(start),
                        x: mp.point.x,
                        y: mp.point.y,
                        p: mp.point.pressure,
                        is_eraser: mp.is_eraser,
                    })
                    .collect()
            }
            None => stroke
                .points
                .iter()
                .map(|point| MotionPointMetadata {
                    t: 0,
                    x: point.x,
                    y: point.y,
                    p: point.pressure,
                    is_eraser: false,
                })
                .collect(),
        };

        let line_style = &stroke.line_style;
        Self {
            tool: stroke.tool.name().to_string(),
            width: stroke.width,
            color: stroke.color,
            fill: stroke.fill.is_some(),
            fill_alpha: stroke.fill,
            line_style: LineStyleMetadata {
                has_dashes: line_style.has_dashes(),
                dashes: line_style
                    .has_dashes()
                    .then(|| line_style.dashes().to_vec()),
            },
            has_motion_recording: stroke.has_motion_recording(),
            motion_points,
        }
    }

    /// Span of the recorded samples (0 for static strokes).
    pub fn duration_ms(&self) -> u64 {
        if !self.has_motion_recording {
            return 0;
        }
        self.motion_points.last().map_or(0, |p| p.t)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundMetadata {
    #[serde(rename = "type")]
    pub kind: String,
    pub config: String,
    pub color: SerializableColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub page_index: usize,
    pub width: f64,
    pub height: f64,
    pub background: BackgroundMetadata,
    pub strokes: Vec<StrokeMetadata>,
}

impl PageMetadata {
    /// Describe a page and every stroke on its layers, bottom layer first.
    pub fn from_page(page_index: usize, page: &Page) -> Self {
        Self {
            page_index,
            width: page.width,
            height: page.height,
            background: BackgroundMetadata {
                kind: page.background.kind.name().to_string(),
                config: page.background.config.clone(),
                color: page.background_color,
            },
            strokes: page.strokes().map(StrokeMetadata::from_stroke).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EraserEvent {
    pub t: u64,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub page_index: usize,
    pub affected_strokes: Vec<usize>,
}

impl EraserEvent {
    /// Eraser contacts rebased to the recording's first sample.
    pub fn from_recording(recording: &EraserMotionRecording) -> Vec<EraserEvent> {
        let start = recording.start_timestamp();
        recording
            .motion_points()
            .iter()
            .map(|ep| EraserEvent {
                t: ep.timestamp.saturating_sub(start),
                x: ep.point.x,
                y: ep.point.y,
                size: ep.eraser_size,
                page_index: ep.page_index,
                affected_strokes: ep.affected_stroke_indices.clone(),
            })
            .collect()
    }
}

/// Root object of `motion_metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionMetadata {
    pub frame_rate: u32,
    pub total_frames: u64,
    /// Recorded samples across all strokes (synthesized ones excluded).
    pub total_motion_points: usize,
    /// Stroke spans summed, plus the eraser span; idle gaps are not counted.
    pub total_duration_ms: u64,
    #[serde(default)]
    pub stroke_duration_ms: u64,
    #[serde(default)]
    pub eraser_duration_ms: u64,
    pub pages: Vec<PageMetadata>,
    #[serde(default)]
    pub eraser_events: Vec<EraserEvent>,
}

impl MotionMetadata {
    /// Assemble the root object, deriving the totals from its parts.
    pub fn new(frame_rate: u32, pages: Vec<PageMetadata>, eraser_events: Vec<EraserEvent>) -> Self {
        let recorded = || {
            pages
                .iter()
                .flat_map(|page| &page.strokes)
                .filter(|stroke| stroke.has_motion_recording)
        };
        let total_motion_points: usize = recorded().map(|s| s.motion_points.len()).sum();
        let stroke_duration_ms: u64 = recorded().map(StrokeMetadata::duration_ms).sum();
        let eraser_duration_ms = eraser_events.last().map_or(0, |e| e.t);
        let total_duration_ms = stroke_duration_ms + eraser_duration_ms;

        Self {
            frame_rate,
            total_frames: total_frames(total_duration_ms, frame_rate),
            total_motion_points,
            total_duration_ms,
            stroke_duration_ms,
            eraser_duration_ms,
            pages,
            eraser_events,
        }
    }

    /// Describe a whole document.
    pub fn from_document(document: &Document, frame_rate: u32) -> Self {
        let pages = document
            .pages()
            .iter()
            .enumerate()
            .map(|(index, page)| PageMetadata::from_page(index, page))
            .collect();
        Self::new(
            frame_rate,
            pages,
            EraserEvent::from_recording(document.eraser_motion()),
        )
    }

    /// True if neither a stroke nor the eraser recorded anything.
    pub fn is_empty(&self) -> bool {
        self.total_motion_points == 0 && self.eraser_events.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
