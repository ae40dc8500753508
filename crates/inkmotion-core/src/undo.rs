//! Undo/redo of eraser gestures.

use crate::document::{Document, Layer};
use crate::shapes::{Element, Stroke};

/// Maximum number of undo actions to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// Identifies an action registered with an [`UndoRecorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndoActionHandle(u64);

/// Receives undo actions and hands back mutable access to them while the
/// gesture that created them is still running.
pub trait UndoRecorder {
    fn add_undo_action(&mut self, action: UndoAction) -> UndoActionHandle;

    /// The action behind `handle`, if it is still on the undo stack.
    fn action_mut(&mut self, handle: UndoActionHandle) -> Option<&mut UndoAction>;
}

/// A reversible document change.
#[derive(Debug, Clone)]
pub enum UndoAction {
    Delete(DeleteUndoAction),
    Erase(EraseUndoAction),
}

impl UndoAction {
    /// Revert the change. Returns false if the document no longer matches.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        match self {
            UndoAction::Delete(action) => action.undo(document),
            UndoAction::Erase(action) => action.undo(document),
        }
    }

    /// Re-apply the change after an undo.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        match self {
            UndoAction::Delete(action) => action.redo(document),
            UndoAction::Erase(action) => action.redo(document),
        }
    }

    pub fn page_index(&self) -> usize {
        match self {
            UndoAction::Delete(action) => action.page_index,
            UndoAction::Erase(action) => action.page_index,
        }
    }
}

fn layer_mut(document: &mut Document, page_index: usize, layer_index: usize) -> Option<&mut Layer> {
    document.page_mut(page_index)?.layer_mut(layer_index)
}

/// Whole elements removed from a page, in removal order.
#[derive(Debug, Clone)]
pub struct DeleteUndoAction {
    page_index: usize,
    /// `(layer index, element, index it occupied when removed)`.
    entries: Vec<(usize, Element, usize)>,
}

impl DeleteUndoAction {
    pub fn new(page_index: usize) -> Self {
        Self {
            page_index,
            entries: Vec::new(),
        }
    }

    pub fn add_element(&mut self, layer_index: usize, element: Element, index: usize) {
        self.entries.push((layer_index, element, index));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn undo(&mut self, document: &mut Document) -> bool {
        for (layer_index, element, index) in self.entries.iter().rev() {
            let Some(layer) = layer_mut(document, self.page_index, *layer_index) else {
                log::warn!("Cannot restore element: layer {} is gone", layer_index);
                return false;
            };
            layer.insert_element(*index, element.clone());
        }
        true
    }

    fn redo(&mut self, document: &mut Document) -> bool {
        for (layer_index, element, _) in &self.entries {
            let Some(layer) = layer_mut(document, self.page_index, *layer_index) else {
                return false;
            };
            layer.remove_element(element.id());
        }
        true
    }
}

/// One stroke replaced by its surviving fragments.
#[derive(Debug, Clone)]
struct Replacement {
    layer_index: usize,
    original: Stroke,
    position: usize,
    fragments: Vec<Stroke>,
}

/// Strokes partially erased during one gesture.
///
/// Originals are snapshotted on first contact; fragments are only computed by
/// [`finalize`](Self::finalize) when the gesture ends.
#[derive(Debug, Clone)]
pub struct EraseUndoAction {
    page_index: usize,
    originals: Vec<(usize, Stroke)>,
    replacements: Vec<Replacement>,
    finalized: bool,
}

impl EraseUndoAction {
    pub fn new(page_index: usize) -> Self {
        Self {
            page_index,
            originals: Vec::new(),
            replacements: Vec::new(),
            finalized: false,
        }
    }

    /// Snapshot a stroke before its first cut. The snapshot keeps the id
    /// and motion recording of the stroke on the layer.
    pub fn add_original(&mut self, layer_index: usize, original: Stroke) {
        self.originals.push((layer_index, original));
    }

    pub fn original_count(&self) -> usize {
        self.originals.len()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Replace every touched stroke by the fragments its erasure left.
    /// Fully consumed strokes simply disappear.
    pub fn finalize(&mut self, document: &mut Document) {
        if self.finalized {
            return;
        }
        self.finalized = true;

        for (layer_index, original) in std::mem::take(&mut self.originals) {
            let Some(layer) = layer_mut(document, self.page_index, layer_index) else {
                log::warn!("Erased stroke's layer {} is gone", layer_index);
                continue;
            };
            let Some(erasable) = layer
                .stroke_mut(original.id())
                .and_then(Stroke::take_erasable)
            else {
                log::warn!("Erased stroke {} is no longer on its layer", original.id());
                continue;
            };
            let fragments = erasable.fragments();
            let Some((_, position)) = layer.remove_element(original.id()) else {
                continue;
            };
            for (offset, fragment) in fragments.iter().enumerate() {
                layer.insert_element(position + offset, fragment.clone().into());
            }
            log::debug!(
                "Stroke {} split into {} fragment(s)",
                original.id(),
                fragments.len()
            );
            self.replacements.push(Replacement {
                layer_index,
                original,
                position,
                fragments,
            });
        }
    }

    fn undo(&mut self, document: &mut Document) -> bool {
        if !self.finalized {
            return false;
        }
        for replacement in self.replacements.iter().rev() {
            let Some(layer) = layer_mut(document, self.page_index, replacement.layer_index) else {
                log::warn!("Cannot restore stroke: layer {} is gone", replacement.layer_index);
                return false;
            };
            for fragment in &replacement.fragments {
                layer.remove_element(fragment.id());
            }
            layer.insert_element(replacement.position, replacement.original.clone().into());
        }
        true
    }

    fn redo(&mut self, document: &mut Document) -> bool {
        if !self.finalized {
            return false;
        }
        for replacement in &self.replacements {
            let Some(layer) = layer_mut(document, self.page_index, replacement.layer_index) else {
                return false;
            };
            let position = layer
                .remove_element(replacement.original.id())
                .map_or(replacement.position, |(_, index)| index);
            for (offset, fragment) in replacement.fragments.iter().enumerate() {
                layer.insert_element(position + offset, fragment.clone().into());
            }
        }
        true
    }
}

/// Undo and redo stacks of document changes.
#[derive(Debug, Default)]
pub struct UndoRedoHandler {
    undo_stack: Vec<(UndoActionHandle, UndoAction)>,
    redo_stack: Vec<(UndoActionHandle, UndoAction)>,
    next_handle: u64,
}

impl UndoRedoHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        let Some((handle, mut action)) = self.undo_stack.pop() else {
            return false;
        };
        if !action.undo(document) {
            self.undo_stack.push((handle, action));
            return false;
        }
        self.redo_stack.push((handle, action));
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        let Some((handle, mut action)) = self.redo_stack.pop() else {
            return false;
        };
        if !action.redo(document) {
            self.redo_stack.push((handle, action));
            return false;
        }
        self.undo_stack.push((handle, action));
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }
}

impl UndoRecorder for UndoRedoHandler {
    fn add_undo_action(&mut self, action: UndoAction) -> UndoActionHandle {
        let handle = UndoActionHandle(self.next_handle);
        self.next_handle += 1;
        self.undo_stack.push((handle, action));
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
        handle
    }

    fn action_mut(&mut self, handle: UndoActionHandle) -> Option<&mut UndoAction> {
        self.undo_stack
            .iter_mut()
            .rev()
            .find(|(h, _)| *h == handle)
            .map(|(_, action)| action)
    }
}
