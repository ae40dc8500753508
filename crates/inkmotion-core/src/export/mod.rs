//! Motion export: a timestamped JSON description of every drawing and
//! erasing sample of a document, plus a playback timeline over it.

mod controller;
mod exporter;
mod metadata;
mod timeline;

pub use controller::{MotionExportController, export_folder_name};
pub use exporter::{ExportStatus, ExportSummary, METADATA_FILE_NAME, MotionExporter, README_FILE_NAME};
pub use metadata::{
    BackgroundMetadata, EraserEvent, LineStyleMetadata, MotionMetadata, MotionPointMetadata,
    PageMetadata, StrokeMetadata, total_frames,
};
pub use timeline::{MotionTimeline, StrokeProgress};

use std::path::PathBuf;
use thiserror::Error;

/// Motion export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Motion export already in progress")]
    AlreadyExporting,
    #[error("No document available for motion export")]
    NoDocument,
    #[error("Motion export folder is not set")]
    FolderNotSet,
    #[error("Motion export folder is not a directory: {}", .0.display())]
    InvalidOutputFolder(PathBuf),
    #[error("No motion recording data found in document")]
    NothingToExport,
    #[error("Motion export cancelled")]
    Cancelled,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
