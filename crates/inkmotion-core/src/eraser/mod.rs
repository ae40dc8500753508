//! Interactive erasure of ink strokes.
//!
//! An [`EraseHandler`] lives for exactly one eraser gesture. Every pointer
//! sample goes through [`EraseHandler::erase`]; the gesture ends with
//! [`EraseHandler::finalize`], which commits fragments or deletions to the
//! undo stack and attaches the eraser's own path to the page.

mod erasable;
mod handler;

pub use erasable::ErasableStroke;
pub use handler::EraseHandler;

use kurbo::Rect;

/// Receives repaint requests for page regions. Repaints are requested, never
/// performed synchronously.
pub trait Redrawable {
    fn rerender_range(&self, range: Rect);
}
