//! Writes the motion export artifact to disk.

use super::metadata::{EraserEvent, MotionMetadata, PageMetadata};
use super::{ExportError, ExportResult};
use crate::document::Document;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Name of the JSON artifact inside an export folder.
pub const METADATA_FILE_NAME: &str = "motion_metadata.json";

/// Name of the companion note inside an export folder.
pub const README_FILE_NAME: &str = "README.txt";

/// Share of the progress spent describing pages; the rest is writing files.
const DESCRIBE_PROGRESS: f64 = 0.9;

/// Progress of the current (or last) export.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExportStatus {
    /// 0.0 to 1.0.
    pub progress: f64,
    pub frame_count: u64,
    pub total_frames: u64,
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub frame_rate: u32,
    pub total_frames: u64,
    pub total_motion_points: usize,
    pub total_duration_ms: u64,
    pub eraser_events: usize,
}

/// Clears the exporting flag when the export ends, however it ends.
pub(crate) struct ExportGuard<'a> {
    exporting: &'a AtomicBool,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.exporting.store(false, Ordering::Release);
    }
}

/// Synchronous, non-reentrant motion exporter.
///
/// The exporter can be shared between threads: a second export while one is
/// running fails with [`ExportError::AlreadyExporting`], and [`stop`](Self::stop)
/// asks the running export to give up before it writes anything.
#[derive(Debug, Default)]
pub struct MotionExporter {
    exporting: AtomicBool,
    cancel_requested: AtomicBool,
    status: Mutex<ExportStatus>,
}

impl MotionExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::Acquire)
    }

    pub fn status(&self) -> ExportStatus {
        *self.status_guard()
    }

    pub fn progress(&self) -> f64 {
        self.status().progress
    }

    pub fn frame_count(&self) -> u64 {
        self.status().frame_count
    }

    /// Request cancellation of the running export. Returns false if idle.
    pub fn stop(&self) -> bool {
        if !self.is_exporting() {
            return false;
        }
        log::info!("Stopping motion export");
        self.cancel_requested.store(true, Ordering::Release);
        true
    }

    pub(crate) fn try_begin(&self) -> Option<ExportGuard<'_>> {
        self.exporting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportGuard {
                exporting: &self.exporting,
            })
    }

    /// Export `document` into `output_dir`, creating it if needed.
    ///
    /// The artifact is built in memory first; files are only opened once
    /// there is something to write and no cancellation was requested.
    pub fn start_export(
        &self,
        document: Option<&Document>,
        output_dir: &Path,
        frame_rate: u32,
    ) -> ExportResult<ExportSummary> {
        let Some(_guard) = self.try_begin() else {
            log::warn!("Motion export already in progress");
            return Err(ExportError::AlreadyExporting);
        };
        self.cancel_requested.store(false, Ordering::Release);
        self.run(document, output_dir, frame_rate)
    }

    /// Body of an export; the caller holds the exporting flag.
    fn run(
        &self,
        document: Option<&Document>,
        output_dir: &Path,
        frame_rate: u32,
    ) -> ExportResult<ExportSummary> {
        let Some(document) = document else {
            log::warn!("No document available for motion export");
            return Err(ExportError::NoDocument);
        };

        let frame_rate = frame_rate.max(1);
        *self.status_guard() = ExportStatus::default();
        log::info!(
            "Starting motion export to {} ({} fps)",
            output_dir.display(),
            frame_rate
        );

        let page_count = document.page_count();
        let mut pages = Vec::with_capacity(page_count);
        for (index, page) in document.pages().iter().enumerate() {
            self.check_cancelled()?;
            pages.push(PageMetadata::from_page(index, page));
            self.status_guard().progress = DESCRIBE_PROGRESS * (index + 1) as f64 / page_count as f64;
        }
        let metadata = MotionMetadata::new(
            frame_rate,
            pages,
            EraserEvent::from_recording(document.eraser_motion()),
        );

        if metadata.is_empty() {
            log::warn!("No motion recording data found in document");
            return Err(ExportError::NothingToExport);
        }
        log::info!(
            "Found {} motion points and {} eraser events, {} frames",
            metadata.total_motion_points,
            metadata.eraser_events.len(),
            metadata.total_frames
        );
        self.status_guard().total_frames = metadata.total_frames;

        let json = metadata.to_json()?;
        let readme = readme_text(&metadata);

        self.check_cancelled()?;
        if let Err(e) = fs::create_dir_all(output_dir) {
            log::error!("Failed to create {}: {}", output_dir.display(), e);
            return Err(e.into());
        }
        write_artifact(output_dir, &json, &readme)?;
        log::info!(
            "Motion metadata exported to {}",
            output_dir.join(METADATA_FILE_NAME).display()
        );

        {
            let mut status = self.status_guard();
            status.progress = 1.0;
            status.frame_count = metadata.total_frames;
        }

        Ok(ExportSummary {
            output_dir: output_dir.to_path_buf(),
            frame_rate,
            total_frames: metadata.total_frames,
            total_motion_points: metadata.total_motion_points,
            total_duration_ms: metadata.total_duration_ms,
            eraser_events: metadata.eraser_events.len(),
        })
    }

    fn check_cancelled(&self) -> ExportResult<()> {
        if self.cancel_requested.swap(false, Ordering::AcqRel) {
            log::info!("Motion export cancelled");
            return Err(ExportError::Cancelled);
        }
        Ok(())
    }

    fn status_guard(&self) -> MutexGuard<'_, ExportStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn readme_text(metadata: &MotionMetadata) -> String {
    format!(
        "Motion Recording Export
=======================

Frame Rate: {fps} fps
Total Frames: {frames}
Total Motion Points: {points}
Total Duration: {duration} ms
Eraser Events: {events}

Files:
  - {metadata_file}: per-page strokes and eraser events
  - {readme_file}: this file

Timestamps (t) are in milliseconds. Each recorded stroke starts at
t = 0; strokes without a recording are static and present from the
first frame. Eraser events start at t = 0 of the eraser recording.

After rendering frames from the metadata, assemble a video with e.g.:
  ffmpeg -framerate {fps} -pattern_type glob -i 'frame_*.png' -c:v libx264 -pix_fmt yuv420p output.mp4
",
        fps = metadata.frame_rate,
        frames = metadata.total_frames,
        points = metadata.total_motion_points,
        duration = metadata.total_duration_ms,
        events = metadata.eraser_events.len(),
        metadata_file = METADATA_FILE_NAME,
        readme_file = README_FILE_NAME,
    )
}

/// Write both files of an export. A failed README write removes the
/// metadata file again so no partial artifact is left.
fn write_artifact(output_dir: &Path, json: &str, readme: &str) -> std::io::Result<()> {
    let metadata_path = output_dir.join(METADATA_FILE_NAME);
    fs::write(&metadata_path, json)?;
    if let Err(e) = fs::write(output_dir.join(README_FILE_NAME), readme) {
        log::error!("Failed to write {}: {}", README_FILE_NAME, e);
        if let Err(cleanup) = fs::remove_file(&metadata_path) {
            log::warn!("Could not remove {}: {}", metadata_path.display(), cleanup);
        }
        return Err(e);
    }
    Ok(())
}
