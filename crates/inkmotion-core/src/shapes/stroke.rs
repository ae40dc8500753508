//! Freehand ink stroke.

use super::path::clip_segment;
use super::{
    CapStyle, ElementId, InkPoint, LineStyle, PaddedBox, PathInterval, PathParameter,
    SerializableColor, StrokeTool, point_to_segment_dist, rects_overlap,
};
use crate::eraser::ErasableStroke;
use crate::motion::MotionRecording;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fragments shorter than this are dropped when a stroke is split.
pub const MIN_FRAGMENT_LENGTH: f64 = 1e-6;

/// A freehand ink stroke (polyline with per-point pressure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ElementId,
    /// Points in the stroke path.
    pub points: Vec<InkPoint>,
    /// Nominal stroke width.
    pub width: f64,
    pub color: SerializableColor,
    pub tool: StrokeTool,
    #[serde(default)]
    pub cap_style: CapStyle,
    /// Fill alpha (None = no fill).
    #[serde(default)]
    pub fill: Option<u8>,
    #[serde(default)]
    pub line_style: LineStyle,
    /// Timestamped drawing motion, if this stroke was captured interactively.
    #[serde(
        default,
        with = "crate::motion::embedded",
        skip_serializing_if = "Option::is_none"
    )]
    motion: Option<MotionRecording>,
    /// Incremental erasure state while an eraser gesture is touching this stroke.
    #[serde(skip)]
    erasable: Option<Box<ErasableStroke>>,
}

impl Stroke {
    /// Create a new empty stroke for the given tool.
    pub fn new(tool: StrokeTool) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            width: 2.0,
            color: SerializableColor::black(),
            tool,
            cap_style: CapStyle::default(),
            fill: None,
            line_style: LineStyle::default(),
            motion: None,
            erasable: None,
        }
    }

    /// Create a pen stroke from existing points.
    pub fn from_points(points: Vec<InkPoint>) -> Self {
        Self {
            points,
            ..Self::new(StrokeTool::Pen)
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of parametric segments (a single point counts as one degenerate segment).
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1).max(usize::from(!self.points.is_empty()))
    }

    pub fn has_motion_recording(&self) -> bool {
        self.motion.is_some()
    }

    pub fn motion_recording(&self) -> Option<&MotionRecording> {
        self.motion.as_ref()
    }

    pub fn set_motion_recording(&mut self, motion: MotionRecording) {
        self.motion = Some(motion);
    }

    pub fn erasable(&self) -> Option<&ErasableStroke> {
        self.erasable.as_deref()
    }

    pub fn erasable_mut(&mut self) -> Option<&mut ErasableStroke> {
        self.erasable.as_deref_mut()
    }

    pub(crate) fn set_erasable(&mut self, erasable: ErasableStroke) {
        self.erasable = Some(Box::new(erasable));
    }

    pub(crate) fn take_erasable(&mut self) -> Option<ErasableStroke> {
        self.erasable.take().map(|e| *e)
    }

    /// A copy of the geometry and style only: fresh id, no motion, no erasure state.
    pub fn geometry_clone(&self) -> Stroke {
        Stroke {
            id: Uuid::new_v4(),
            points: self.points.clone(),
            width: self.width,
            color: self.color,
            tool: self.tool,
            cap_style: self.cap_style,
            fill: self.fill,
            line_style: self.line_style.clone(),
            motion: None,
            erasable: None,
        }
    }

    /// Bounding box of the path, widened by half the stroke width.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        let half = self.width / 2.0;
        Rect::new(min_x - half, min_y - half, max_x + half, max_y + half)
    }

    /// Coarse test: does the stroke's bounding box touch `rect`?
    pub fn intersects_area(&self, rect: &Rect) -> bool {
        !self.points.is_empty() && rects_overlap(&self.bounds(), rect)
    }

    /// Does the inked path come within `radius` of `(x, y)`?
    pub fn intersects(&self, x: f64, y: f64, radius: f64) -> bool {
        let point = Point::new(x, y);
        let reach = radius + self.width / 2.0;

        match self.points.as_slice() {
            [] => false,
            [only] => only.pos().distance(point) <= reach,
            points => points
                .windows(2)
                .any(|w| point_to_segment_dist(point, w[0].pos(), w[1].pos()) <= reach),
        }
    }

    /// Compute the parts of the path that the padded box removes.
    ///
    /// Returned intervals are sorted, disjoint and normalized.
    pub fn intersect_with_padded_box(&self, padded: &PaddedBox) -> Vec<PathInterval> {
        let outer = padded.outer_rect();
        let inner = padded.inner_rect();
        let segments = self.segment_count();

        let mut result = Vec::new();
        // Current run inside the outer box, and whether it reached the inner box.
        let mut run: Option<(PathInterval, bool)> = None;

        for index in 0..segments {
            let (a, b) = self.segment(index);
            let Some((t0, t1)) = clip_segment(a, b, &outer) else {
                flush_run(&mut run, &mut result);
                continue;
            };
            let touches_inner = clip_segment(a, b, &inner).is_some();
            let start = PathParameter::new(index, t0).normalized(segments);
            let end = PathParameter::new(index, t1).normalized(segments);

            match &mut run {
                Some((interval, hit)) if interval.end == start => {
                    interval.end = end;
                    *hit |= touches_inner;
                }
                _ => {
                    flush_run(&mut run, &mut result);
                    run = Some((PathInterval::new(start, end), touches_inner));
                }
            }

            // The path leaves the box inside this segment.
            if t1 < 1.0 {
                flush_run(&mut run, &mut result);
            }
        }
        flush_run(&mut run, &mut result);

        result
    }

    /// First and last parameters of the whole path.
    pub fn domain(&self) -> PathInterval {
        let last = match self.points.len() {
            0 | 1 => PathParameter::new(0, 0.0),
            n => PathParameter::new(n - 2, 1.0),
        };
        PathInterval::new(PathParameter::new(0, 0.0), last)
    }

    /// Interpolated point at a path parameter.
    pub fn point_at(&self, param: PathParameter) -> Option<InkPoint> {
        match self.points.len() {
            0 => None,
            1 => Some(self.points[0]),
            n => {
                let index = param.index.min(n - 2);
                let t = param.t.clamp(0.0, 1.0);
                Some(self.points[index].lerp(&self.points[index + 1], t))
            }
        }
    }

    /// Length of the polyline.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].pos().distance(w[1].pos()))
            .sum()
    }

    /// Build an independent stroke covering `interval` of this one.
    ///
    /// The result copies the style but never the motion recording.
    /// Returns `None` for degenerate (zero-length) pieces.
    pub fn sub_stroke(&self, interval: &PathInterval) -> Option<Stroke> {
        let first = self.point_at(interval.start)?;
        let last = self.point_at(interval.end)?;

        let mut points = vec![first];
        let inner_vertices = (interval.start.index + 1)..=interval.end.index;
        for vertex in inner_vertices {
            if let Some(p) = self.points.get(vertex) {
                push_distinct(&mut points, *p);
            }
        }
        push_distinct(&mut points, last);

        let mut fragment = self.geometry_clone();
        fragment.points = points;
        if fragment.points.len() < 2 || fragment.length() < MIN_FRAGMENT_LENGTH {
            return None;
        }
        Some(fragment)
    }

    fn segment(&self, index: usize) -> (Point, Point) {
        let a = self.points[index].pos();
        let b = self.points.get(index + 1).map(|p| p.pos()).unwrap_or(a);
        (a, b)
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(StrokeTool::Pen)
    }
}

fn flush_run(run: &mut Option<(PathInterval, bool)>, result: &mut Vec<PathInterval>) {
    if let Some((interval, true)) = run.take() {
        result.push(interval);
    }
}

fn push_distinct(points: &mut Vec<InkPoint>, point: InkPoint) {
    let duplicate = points
        .last()
        .is_some_and(|last| last.pos().distance(point.pos()) < f64::EPSILON);
    if !duplicate {
        points.push(point);
    }
}
