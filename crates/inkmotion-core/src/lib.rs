//! InkMotion Core Library
//!
//! Stroke erasure, motion recording and motion export for freehand ink
//! documents.

pub mod config;
pub mod document;
pub mod eraser;
pub mod export;
pub mod motion;
pub mod shapes;
pub mod tools;
pub mod undo;

pub use config::{ConfigError, EraserSettings, Settings};
pub use document::{Document, Layer, Page, SharedDocument};
pub use eraser::{ErasableStroke, EraseHandler, Redrawable};
pub use export::{
    ExportError, ExportSummary, MotionExportController, MotionExporter, MotionMetadata,
    MotionTimeline,
};
pub use motion::{
    EraserMotionPoint, EraserMotionRecording, MotionPoint, MotionRecording, RecordingError,
};
pub use shapes::{Element, InkPoint, Stroke};
pub use tools::{EraserMode, EraserToolState};
pub use undo::{UndoAction, UndoActionHandle, UndoRecorder, UndoRedoHandler};
