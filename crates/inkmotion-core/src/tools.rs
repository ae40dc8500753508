//! Eraser tool state consumed by the erasure engine.

use serde::{Deserialize, Serialize};

/// How the eraser treats the strokes it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraserMode {
    /// Cut the touched parts out, keeping the rest as fragments.
    #[default]
    Default,
    /// Remove every touched stroke entirely.
    DeleteStroke,
}

/// Current eraser settings, queried on every erase sample.
pub trait EraserToolState {
    /// Eraser half-size (radius) in page units.
    fn thickness(&self) -> f64;

    fn eraser_mode(&self) -> EraserMode;
}
