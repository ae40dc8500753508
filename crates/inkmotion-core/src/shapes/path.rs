//! Parametric positions along a polyline and the eraser's padded box.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A position along a polyline: segment index plus offset `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathParameter {
    pub index: usize,
    pub t: f64,
}

impl PathParameter {
    pub fn new(index: usize, t: f64) -> Self {
        Self { index, t }
    }

    /// Rewrite a segment end `(i, 1)` as the start of the next segment `(i + 1, 0)`,
    /// so that equal positions compare equal.
    pub fn normalized(self, segment_count: usize) -> Self {
        if self.t >= 1.0 && self.index + 1 < segment_count {
            Self::new(self.index + 1, 0.0)
        } else {
            self
        }
    }
}

impl PartialEq for PathParameter {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathParameter {}

impl PartialOrd for PathParameter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathParameter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then_with(|| self.t.total_cmp(&other.t))
    }
}

/// A closed sub-range `[start, end]` of a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInterval {
    pub start: PathParameter,
    pub end: PathParameter,
}

impl PathInterval {
    pub fn new(start: PathParameter, end: PathParameter) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge a set of intervals into a sorted, disjoint union.
    /// Touching intervals are joined.
    pub fn union(mut intervals: Vec<PathInterval>) -> Vec<PathInterval> {
        intervals.sort_by(|a, b| a.start.cmp(&b.start));
        let mut merged: Vec<PathInterval> = Vec::with_capacity(intervals.len());
        for interval in intervals {
            match merged.last_mut() {
                Some(last) if interval.start <= last.end => {
                    if interval.end > last.end {
                        last.end = interval.end;
                    }
                }
                _ => merged.push(interval),
            }
        }
        merged
    }
}

/// Square hit region around the eraser contact point.
///
/// The inner half-size is the eraser's own; the outer one adds padding that
/// depends on the cap style and width of the stroke being erased. A stroke is
/// cut wherever it passes through the outer box, but only along runs that
/// also reach the inner box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddedBox {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl PaddedBox {
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius: outer_radius.max(inner_radius),
        }
    }

    pub fn inner_rect(&self) -> Rect {
        square(self.center, self.inner_radius)
    }

    pub fn outer_rect(&self) -> Rect {
        square(self.center, self.outer_radius)
    }
}

fn square(center: Point, half: f64) -> Rect {
    Rect::new(center.x - half, center.y - half, center.x + half, center.y + half)
}

/// Clip the segment `a→b` against `rect` (Liang–Barsky).
/// Returns the parameter range inside the rectangle, if any.
pub(crate) fn clip_segment(a: Point, b: Point, rect: &Rect) -> Option<(f64, f64)> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    let edges = [
        (-dx, a.x - rect.x0),
        (dx, rect.x1 - a.x),
        (-dy, a.y - rect.y0),
        (dy, rect.y1 - a.y),
    ];

    for (p, q) in edges {
        if p.abs() < f64::EPSILON {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((t0, t1))
}
