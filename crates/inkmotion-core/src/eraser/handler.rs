//! Per-gesture erasure engine.

use super::{ErasableStroke, Redrawable};
use crate::document::{Document, Page, SharedDocument};
use crate::motion::{MotionRecording, monotonic_millis};
use crate::shapes::{
    Element, ElementId, InkPoint, NO_PRESSURE, PaddedBox, SerializableColor, Stroke, StrokeTool,
};
use crate::tools::{EraserMode, EraserToolState};
use crate::undo::{DeleteUndoAction, EraseUndoAction, UndoAction, UndoActionHandle, UndoRecorder};
use kurbo::{Point, Rect};
use std::sync::MutexGuard;

/// The eraser ink stroke is as wide as the eraser's diameter.
const ERASER_RADIUS_TO_DIAMETER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    /// The mode is fixed by the first sample of the gesture.
    Recording {
        mode: EraserMode,
        open: Option<UndoActionHandle>,
    },
    Finalized,
}

/// Acquire the document, logging instead of panicking on a poisoned lock.
fn lock(document: &SharedDocument) -> Option<MutexGuard<'_, Document>> {
    match document.lock() {
        Ok(guard) => Some(guard),
        Err(_) => {
            log::warn!("Document lock poisoned, skipping eraser update");
            None
        }
    }
}

/// Eraser box around `(x, y)`, padded for the cap style and width of `stroke`.
fn padded_box(stroke: &Stroke, x: f64, y: f64, half_size: f64) -> PaddedBox {
    let padding = stroke.cap_style.padding_coefficient() * stroke.width;
    PaddedBox::new(Point::new(x, y), half_size, half_size + padding)
}

/// Erases strokes on the selected layer of one page during a single gesture.
///
/// The handler records the eraser's own path as a white eraser-ink stroke
/// and every contact in the document's eraser log. Dropping a handler that is
/// still recording finalizes it.
pub struct EraseHandler<'a> {
    document: SharedDocument,
    page_index: usize,
    tools: &'a dyn EraserToolState,
    view: &'a dyn Redrawable,
    undo: &'a mut dyn UndoRecorder,
    state: SessionState,
    half_eraser_size: f64,
    /// Shift applied to this gesture's timestamps, fixed by its first sample.
    clock_offset: Option<u64>,
    eraser_ink: Option<(Stroke, MotionRecording)>,
}

impl<'a> EraseHandler<'a> {
    pub fn new(
        document: SharedDocument,
        page_index: usize,
        tools: &'a dyn EraserToolState,
        view: &'a dyn Redrawable,
        undo: &'a mut dyn UndoRecorder,
    ) -> Self {
        Self {
            document,
            page_index,
            tools,
            view,
            undo,
            state: SessionState::Idle,
            half_eraser_size: 0.0,
            clock_offset: None,
            eraser_ink: None,
        }
    }

    /// Mode of the running gesture, once the first sample fixed it.
    pub fn mode(&self) -> Option<EraserMode> {
        match self.state {
            SessionState::Recording { mode, .. } => Some(mode),
            _ => None,
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, SessionState::Recording { .. })
    }

    pub fn is_finalized(&self) -> bool {
        self.state == SessionState::Finalized
    }

    /// Motion captured so far for the eraser-ink stroke.
    pub fn eraser_motion(&self) -> Option<&MotionRecording> {
        self.eraser_ink.as_ref().map(|(_, motion)| motion)
    }

    /// Handle one eraser sample at page coordinates `(x, y)`.
    ///
    /// Without a timestamp the sample is stamped from the monotonic clock.
    pub fn erase(&mut self, x: f64, y: f64, timestamp: Option<u64>) {
        let mode = match self.state {
            SessionState::Finalized => {
                log::debug!("Eraser sample after finalize ignored");
                return;
            }
            SessionState::Idle => {
                let mode = self.tools.eraser_mode();
                self.state = SessionState::Recording { mode, open: None };
                mode
            }
            SessionState::Recording { mode, .. } => mode,
        };

        self.half_eraser_size = self.tools.thickness();
        let half = self.half_eraser_size;
        let timestamp = self.stamp(timestamp.unwrap_or_else(monotonic_millis));
        let hit = Rect::new(x - half, y - half, x + half, y + half);
        let mut dirty = hit;

        self.record_eraser_ink(x, y, timestamp);

        let (layer_index, candidates) = {
            let Some(mut document) = lock(&self.document) else {
                return;
            };
            document.eraser_motion_mut().add_motion_point(
                InkPoint::without_pressure(x, y),
                timestamp,
                half,
                self.page_index,
            );

            let Some(page) = document.page(self.page_index) else {
                log::warn!("Eraser page {} does not exist", self.page_index);
                return;
            };
            let Some((layer_index, layer)) = page.selected_layer_index().zip(page.selected_layer())
            else {
                return;
            };
            let candidates: Vec<ElementId> = layer
                .strokes()
                .filter(|s| s.intersects_area(&hit))
                .map(Stroke::id)
                .collect();
            (layer_index, candidates)
        };

        for id in candidates {
            match mode {
                EraserMode::DeleteStroke => self.delete_stroke(layer_index, id, x, y, &mut dirty),
                EraserMode::Default => self.erase_stroke(layer_index, id, x, y, &mut dirty),
            }
        }

        self.view.rerender_range(dirty);
    }

    /// End the gesture: commit the open undo action and attach the eraser ink.
    /// Does nothing if no sample was taken or the gesture is already finalized.
    pub fn finalize(&mut self) {
        let open = match self.state {
            SessionState::Recording { open, .. } => open,
            SessionState::Idle | SessionState::Finalized => return,
        };
        self.state = SessionState::Finalized;

        if let Some(handle) = open {
            match self.undo.action_mut(handle) {
                Some(UndoAction::Erase(action)) => {
                    if let Some(mut document) = lock(&self.document) {
                        action.finalize(&mut document);
                    }
                }
                Some(UndoAction::Delete(action)) => {
                    log::debug!("Eraser deleted {} stroke(s)", action.len());
                }
                None => log::warn!("Open eraser undo action is no longer on the undo stack"),
            }
        }

        self.attach_eraser_ink();
    }

    /// Map a raw sample time onto the document's eraser log.
    ///
    /// The log outlives processes and gestures while raw clocks restart at 0,
    /// so each gesture is shifted to start no earlier than the log's last
    /// sample and every stamp is kept at or after it.
    fn stamp(&mut self, raw: u64) -> u64 {
        let log_end = lock(&self.document).map_or(0, |doc| doc.eraser_motion().end_timestamp());
        let offset = *self
            .clock_offset
            .get_or_insert_with(|| log_end.saturating_sub(raw));
        raw.saturating_add(offset).max(log_end)
    }

    fn delete_stroke(&mut self, layer_index: usize, id: ElementId, x: f64, y: f64, dirty: &mut Rect) {
        let half = self.half_eraser_size;
        let page_index = self.page_index;

        let Some(mut document) = lock(&self.document) else {
            return;
        };
        let Some(layer) = document
            .page_mut(page_index)
            .and_then(|page| page.layer_mut(layer_index))
        else {
            return;
        };
        // Already removed earlier in this gesture.
        let Some(stroke) = layer.stroke(id) else {
            return;
        };
        if !stroke.intersects(x, y, half) {
            return;
        }
        let Some((element, position)) = layer.remove_element(id) else {
            return;
        };
        *dirty = dirty.union(element.bounds());
        document
            .eraser_motion_mut()
            .add_affected_stroke_to_last(position);
        drop(document);

        self.record_deletion(layer_index, element, position);
    }

    fn erase_stroke(&mut self, layer_index: usize, id: ElementId, x: f64, y: f64, dirty: &mut Rect) {
        let half = self.half_eraser_size;
        let page_index = self.page_index;

        let Some(mut document) = lock(&self.document) else {
            return;
        };
        let Some(layer) = document
            .page_mut(page_index)
            .and_then(|page| page.layer_mut(layer_index))
        else {
            return;
        };
        let Some(position) = layer.index_of(id) else {
            return;
        };
        let Some(stroke) = layer.stroke_mut(id) else {
            return;
        };

        let padded = padded_box(stroke, x, y, half);
        let original = match stroke.erasable_mut() {
            Some(erasable) => {
                if !erasable.erase(&padded, dirty) {
                    return;
                }
                None
            }
            None => {
                let intervals = stroke.intersect_with_padded_box(&padded);
                if intervals.is_empty() {
                    return;
                }
                let original = stroke.clone();
                let mut erasable = ErasableStroke::new(stroke);
                erasable.begin_erasure(intervals, dirty);
                stroke.set_erasable(erasable);
                Some(original)
            }
        };
        document
            .eraser_motion_mut()
            .add_affected_stroke_to_last(position);
        drop(document);

        if let Some(original) = original {
            self.record_original(layer_index, original);
        }
    }

    fn record_deletion(&mut self, layer_index: usize, element: Element, position: usize) {
        let SessionState::Recording { open, .. } = &mut self.state else {
            return;
        };
        if let Some(handle) = *open {
            if let Some(UndoAction::Delete(action)) = self.undo.action_mut(handle) {
                action.add_element(layer_index, element, position);
                return;
            }
            log::warn!("Delete action left the undo stack, opening a new one");
        }
        let mut action = DeleteUndoAction::new(self.page_index);
        action.add_element(layer_index, element, position);
        *open = Some(self.undo.add_undo_action(UndoAction::Delete(action)));
    }

    fn record_original(&mut self, layer_index: usize, original: Stroke) {
        let SessionState::Recording { open, .. } = &mut self.state else {
            return;
        };
        if let Some(handle) = *open {
            if let Some(UndoAction::Erase(action)) = self.undo.action_mut(handle) {
                action.add_original(layer_index, original);
                return;
            }
            log::warn!("Erase action left the undo stack, opening a new one");
        }
        let mut action = EraseUndoAction::new(self.page_index);
        action.add_original(layer_index, original);
        *open = Some(self.undo.add_undo_action(UndoAction::Erase(action)));
    }

    fn record_eraser_ink(&mut self, x: f64, y: f64, timestamp: u64) {
        let thickness = self.half_eraser_size;
        let (_, motion) = self.eraser_ink.get_or_insert_with(|| {
            let mut stroke = Stroke::new(StrokeTool::Eraser);
            stroke.width = thickness * ERASER_RADIUS_TO_DIAMETER;
            stroke.color = SerializableColor::white();
            (stroke, MotionRecording::new())
        });
        motion.add_motion_point(InkPoint::new(x, y, NO_PRESSURE), timestamp, true);
    }

    fn attach_eraser_ink(&mut self) {
        let Some((mut stroke, motion)) = self.eraser_ink.take() else {
            return;
        };
        if !motion.has_motion_data() {
            return;
        }
        stroke.set_motion_recording(motion);

        let Some(mut document) = lock(&self.document) else {
            return;
        };
        match document
            .page_mut(self.page_index)
            .and_then(Page::selected_layer_mut)
        {
            Some(layer) => layer.add_element(stroke.into()),
            None => log::warn!("Cannot add eraser motion stroke: no selected layer"),
        }
    }
}

impl Drop for EraseHandler<'_> {
    fn drop(&mut self) {
        self.finalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Image, Text};
    use crate::undo::UndoRedoHandler;
    use std::cell::{Cell, RefCell};

    struct Tool {
        thickness: f64,
        mode: Cell<EraserMode>,
    }

    impl Tool {
        fn new(mode: EraserMode) -> Self {
            Self {
                thickness: 5.0,
                mode: Cell::new(mode),
            }
        }
    }

    impl EraserToolState for Tool {
        fn thickness(&self) -> f64 {
            self.thickness
        }

        fn eraser_mode(&self) -> EraserMode {
            self.mode.get()
        }
    }

    #[derive(Default)]
    struct View {
        ranges: RefCell<Vec<Rect>>,
    }

    impl Redrawable for View {
        fn rerender_range(&self, range: Rect) {
            self.ranges.borrow_mut().push(range);
        }
    }

    fn horizontal(y: f64) -> Stroke {
        let mut stroke = Stroke::from_points(vec![
            InkPoint::new(0.0, y, 0.5),
            InkPoint::new(50.0, y, 0.5),
            InkPoint::new(100.0, y, 0.5),
        ]);
        let mut motion = MotionRecording::new();
        motion.add_motion_point(InkPoint::new(0.0, y, 0.5), 100, false);
        motion.add_motion_point(InkPoint::new(100.0, y, 0.5), 400, false);
        stroke.set_motion_recording(motion);
        stroke
    }

    fn shared(strokes: Vec<Stroke>) -> SharedDocument {
        let mut doc = Document::new();
        let mut page = Page::default();
        for stroke in strokes {
            page.selected_layer_mut().unwrap().add_element(stroke.into());
        }
        doc.add_page(page);
        doc.into_shared()
    }

    fn layer_strokes(document: &SharedDocument) -> Vec<Stroke> {
        let doc = document.lock().unwrap();
        doc.page(0).unwrap().strokes().cloned().collect()
    }

    #[test]
    fn test_default_mode_splits_at_finalize() {
        let original = horizontal(0.0);
        let original_id = original.id();
        let document = shared(vec![original]);
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        {
            let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
            handler.erase(50.0, 0.0, Some(1000));
            assert_eq!(handler.mode(), Some(EraserMode::Default));

            // Fragments are materialised only at finalize.
            let strokes = layer_strokes(&document);
            assert_eq!(strokes.len(), 1);
            assert!(strokes[0].erasable().is_some());

            handler.finalize();
            assert!(handler.is_finalized());
        }

        let strokes = layer_strokes(&document);
        assert_eq!(strokes.len(), 3);
        let (first, second, ink) = (&strokes[0], &strokes[1], &strokes[2]);
        assert!(!first.has_motion_recording());
        assert!(!second.has_motion_recording());
        assert!(first.erasable().is_none());
        // Round cap: 5.0 + 0.4 * 2.0 of padding around x = 50.
        assert!((first.points.last().unwrap().x - 44.2).abs() < 1e-9);
        assert!((second.points[0].x - 55.8).abs() < 1e-9);

        assert_eq!(ink.tool, StrokeTool::Eraser);
        assert_eq!(ink.width, 10.0);
        assert_eq!(ink.color, SerializableColor::white());
        let motion = ink.motion_recording().unwrap();
        assert_eq!(motion.motion_point_count(), 1);
        assert!(motion.motion_points()[0].is_eraser);
        assert_eq!(motion.motion_points()[0].point.pressure, NO_PRESSURE);

        let mut doc = document.lock().unwrap();
        assert!(undo.undo(&mut doc));
        let ids: Vec<ElementId> = doc.page(0).unwrap().strokes().map(Stroke::id).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], original_id);
        let restored = doc.page(0).unwrap().strokes().next().unwrap();
        assert_eq!(restored.motion_recording().unwrap().motion_point_count(), 2);
    }

    #[test]
    fn test_delete_mode_removes_whole_stroke_once() {
        let a = horizontal(0.0);
        let b = horizontal(40.0);
        let b_id = b.id();
        let document = shared(vec![a, b]);
        let tool = Tool::new(EraserMode::DeleteStroke);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        {
            let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
            handler.erase(20.0, 40.0, Some(10));
            handler.erase(22.0, 40.0, Some(20));
            handler.finalize();
        }

        {
            let doc = document.lock().unwrap();
            let layer = doc.page(0).unwrap().layer(0).unwrap();
            assert!(layer.index_of(b_id).is_none());
            // Remaining stroke plus the eraser ink.
            assert_eq!(layer.len(), 2);

            let events = doc.eraser_motion().motion_points();
            assert_eq!(events.len(), 2);
            assert_eq!(events[0].affected_stroke_indices, vec![1]);
            assert!(events[1].affected_stroke_indices.is_empty());
        }

        assert_eq!(undo.undo_len(), 1);
        let mut doc = document.lock().unwrap();
        assert!(undo.undo(&mut doc));
        assert_eq!(doc.page(0).unwrap().layer(0).unwrap().index_of(b_id), Some(1));
    }

    #[test]
    fn test_delete_mode_needs_circle_contact() {
        // Bounding box is hit, but the path stays far from the eraser.
        let diagonal =
            Stroke::from_points(vec![InkPoint::new(0.0, 0.0, 0.5), InkPoint::new(100.0, 100.0, 0.5)]);
        let document = shared(vec![diagonal]);
        let tool = Tool::new(EraserMode::DeleteStroke);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
        handler.erase(90.0, 10.0, Some(0));
        drop(handler);

        let strokes = layer_strokes(&document);
        assert_eq!(strokes.len(), 2);
        assert!(!undo.can_undo());
    }

    #[test]
    fn test_affected_stroke_goes_to_its_sample() {
        let strokes = (0..4).map(|i| horizontal(i as f64 * 20.0)).collect();
        let document = shared(strokes);
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
        handler.erase(200.0, 200.0, Some(5000));
        handler.erase(50.0, 60.0, Some(5300));
        handler.finalize();
        drop(handler);

        let doc = document.lock().unwrap();
        let events = doc.eraser_motion().motion_points();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp, 5000);
        assert!(events[0].affected_stroke_indices.is_empty());
        assert_eq!(events[1].affected_stroke_indices, vec![3]);
        assert_eq!(events[1].eraser_size, 5.0);
    }

    #[test]
    fn test_mode_fixed_by_first_sample() {
        let document = shared(vec![horizontal(0.0), horizontal(30.0)]);
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
        handler.erase(50.0, 0.0, Some(1));
        tool.mode.set(EraserMode::DeleteStroke);
        handler.erase(50.0, 30.0, Some(2));
        assert_eq!(handler.mode(), Some(EraserMode::Default));
        handler.finalize();
        drop(handler);

        // Both strokes were split, none deleted whole.
        let strokes = layer_strokes(&document);
        assert_eq!(strokes.len(), 5);
    }

    #[test]
    fn test_finalize_is_idempotent_and_closes_gesture() {
        let document = shared(vec![horizontal(0.0)]);
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
        handler.finalize();
        assert!(!handler.is_finalized());

        handler.erase(50.0, 0.0, Some(1));
        handler.finalize();
        handler.finalize();
        handler.erase(10.0, 0.0, Some(2));
        assert!(handler.eraser_motion().is_none());
        drop(handler);

        let doc = document.lock().unwrap();
        assert_eq!(doc.eraser_motion().motion_point_count(), 1);
        assert_eq!(doc.page(0).unwrap().layer(0).unwrap().len(), 3);
    }

    #[test]
    fn test_repaint_covers_hit_and_stroke() {
        let stroke = horizontal(0.0);
        let bounds = stroke.bounds();
        let document = shared(vec![stroke]);
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        let mut handler = EraseHandler::new(document, 0, &tool, &view, &mut undo);
        handler.erase(50.0, 0.0, Some(1));
        handler.erase(300.0, 300.0, Some(2));
        drop(handler);

        let ranges = view.ranges.borrow();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0], Rect::new(45.0, -5.0, 55.0, 5.0).union(bounds));
        assert_eq!(ranges[1], Rect::new(295.0, 295.0, 305.0, 305.0));
    }

    #[test]
    fn test_drop_finalizes_open_gesture() {
        let document = shared(vec![horizontal(0.0)]);
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        {
            let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
            handler.erase(50.0, 0.0, Some(1));
        }

        let strokes = layer_strokes(&document);
        assert_eq!(strokes.len(), 3);
        assert!(strokes.iter().all(|s| s.erasable().is_none()));
    }

    #[test]
    fn test_consumed_stroke_is_not_recorded_again() {
        let short =
            Stroke::from_points(vec![InkPoint::new(48.0, 0.0, 0.5), InkPoint::new(52.0, 0.0, 0.5)]);
        let short_id = short.id();
        let document = shared(vec![short]);
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        {
            let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
            handler.erase(50.0, 0.0, Some(1));
            assert!(layer_strokes(&document)[0].erasable().unwrap().is_fully_erased());
            handler.erase(50.0, 0.0, Some(2));
            handler.erase(50.0, 0.0, Some(3));
        }

        {
            let doc = document.lock().unwrap();
            let events = doc.eraser_motion().motion_points();
            assert_eq!(events.len(), 3);
            assert_eq!(events[0].affected_stroke_indices, vec![0]);
            assert!(events[1].affected_stroke_indices.is_empty());
            assert!(events[2].affected_stroke_indices.is_empty());
            // Nothing survives but the eraser ink.
            let layer = doc.page(0).unwrap().layer(0).unwrap();
            assert_eq!(layer.len(), 1);
            assert_eq!(layer.elements()[0].as_stroke().unwrap().tool, StrokeTool::Eraser);
        }

        assert_eq!(undo.undo_len(), 1);
        let mut doc = document.lock().unwrap();
        assert!(undo.undo(&mut doc));
        assert_eq!(doc.page(0).unwrap().layer(0).unwrap().index_of(short_id), Some(0));
    }

    #[test]
    fn test_affected_indices_count_every_element() {
        let a = horizontal(0.0);
        let b = horizontal(40.0);
        let mut doc = Document::new();
        let mut page = Page::default();
        let layer = page.selected_layer_mut().unwrap();
        layer.add_element(Element::Text(Text::new(Point::new(45.0, 35.0), "note".into())));
        layer.add_element(a.into());
        layer.add_element(Element::Image(Image::new(
            Point::new(45.0, 35.0),
            10.0,
            10.0,
            &[1],
        )));
        layer.add_element(b.into());
        doc.add_page(page);
        let document = doc.into_shared();
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        {
            let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
            handler.erase(50.0, 40.0, Some(10));
            handler.erase(50.0, 0.0, Some(20));
        }

        let doc = document.lock().unwrap();
        let events = doc.eraser_motion().motion_points();
        assert_eq!(events[0].affected_stroke_indices, vec![3]);
        assert_eq!(events[1].affected_stroke_indices, vec![1]);

        // Text and image stay in place; both strokes became two fragments each.
        let layer = doc.page(0).unwrap().layer(0).unwrap();
        assert!(matches!(layer.elements()[0], Element::Text(_)));
        assert!(matches!(layer.elements()[3], Element::Image(_)));
        assert_eq!(layer.len(), 7);
    }

    #[test]
    fn test_later_gesture_continues_eraser_log() {
        let document = shared(vec![horizontal(0.0), horizontal(40.0)]);
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        for y in [0.0, 40.0] {
            // Every gesture restarts its own clock at 0.
            let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
            handler.erase(20.0, y, Some(0));
            handler.erase(30.0, y, Some(100));
            handler.erase(40.0, y, Some(300));
        }

        let doc = document.lock().unwrap();
        let times: Vec<u64> = doc
            .eraser_motion()
            .motion_points()
            .iter()
            .map(|p| p.timestamp)
            .collect();
        assert_eq!(times, vec![0, 100, 300, 300, 400, 600]);
        assert_eq!(doc.eraser_motion().duration(), 600);

        let inks: Vec<&Stroke> = doc
            .page(0)
            .unwrap()
            .strokes()
            .filter(|s| s.tool == StrokeTool::Eraser)
            .collect();
        assert_eq!(inks.len(), 2);
        assert_eq!(inks[1].motion_recording().unwrap().start_timestamp(), 300);
    }

    #[test]
    fn test_page_without_layers() {
        let mut doc = Document::new();
        let mut page = Page::default();
        page.clear_layers();
        doc.add_page(page);
        let document = doc.into_shared();
        let tool = Tool::new(EraserMode::Default);
        let view = View::default();
        let mut undo = UndoRedoHandler::new();

        let mut handler = EraseHandler::new(document.clone(), 0, &tool, &view, &mut undo);
        handler.erase(1.0, 1.0, Some(1));
        handler.finalize();
        drop(handler);

        let doc = document.lock().unwrap();
        assert_eq!(doc.eraser_motion().motion_point_count(), 1);
        assert!(doc.page(0).unwrap().layers().is_empty());
    }
}
