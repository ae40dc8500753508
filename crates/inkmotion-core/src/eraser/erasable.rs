//! Incremental erasure state of a single stroke.

use crate::shapes::{PaddedBox, PathInterval, Stroke};
use kurbo::Rect;

/// Accumulates the parts of a stroke removed during one eraser gesture.
///
/// Fragments are only materialised by [`fragments`](Self::fragments), once
/// the gesture ends.
#[derive(Debug, Clone)]
pub struct ErasableStroke {
    /// Geometry of the stroke as it was before the gesture.
    source: Stroke,
    /// Sorted, disjoint removed intervals.
    removed: Vec<PathInterval>,
}

impl ErasableStroke {
    pub fn new(stroke: &Stroke) -> Self {
        Self {
            source: stroke.geometry_clone(),
            removed: Vec::new(),
        }
    }

    /// Start erasing with intervals already computed against the first padded box.
    pub fn begin_erasure(&mut self, intervals: Vec<PathInterval>, range: &mut Rect) {
        self.add_intervals(intervals, range);
    }

    /// Erase whatever the padded box covers. Returns true if anything new was removed.
    pub fn erase(&mut self, padded: &PaddedBox, range: &mut Rect) -> bool {
        let intervals = self.source.intersect_with_padded_box(padded);
        self.add_intervals(intervals, range)
    }

    pub fn removed_intervals(&self) -> &[PathInterval] {
        &self.removed
    }

    /// True once nothing of the stroke would survive.
    pub fn is_fully_erased(&self) -> bool {
        self.surviving_intervals().is_empty()
    }

    /// Surviving pieces as independent strokes, without motion recordings.
    /// Degenerate pieces are dropped.
    pub fn fragments(&self) -> Vec<Stroke> {
        self.surviving_intervals()
            .iter()
            .filter_map(|interval| self.source.sub_stroke(interval))
            .collect()
    }

    fn add_intervals(&mut self, intervals: Vec<PathInterval>, range: &mut Rect) -> bool {
        if intervals.is_empty() {
            return false;
        }
        let mut all = self.removed.clone();
        all.extend(intervals);
        let merged = PathInterval::union(all);
        if merged == self.removed {
            return false;
        }
        self.removed = merged;
        *range = range.union(self.source.bounds());
        true
    }

    fn surviving_intervals(&self) -> Vec<PathInterval> {
        if self.source.is_empty() {
            return Vec::new();
        }
        let domain = self.source.domain();
        let mut cursor = domain.start;
        let mut surviving = Vec::new();

        for removed in &self.removed {
            if cursor < removed.start {
                surviving.push(PathInterval::new(cursor, removed.start.min(domain.end)));
            }
            cursor = cursor.max(removed.end);
        }
        if cursor < domain.end {
            surviving.push(PathInterval::new(cursor, domain.end));
        }

        surviving.retain(|i| !i.is_empty());
        surviving
    }
}
