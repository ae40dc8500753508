//! Runs motion exports into timestamped folders under the configured export folder.

use super::{ExportError, ExportResult, ExportSummary, MotionExporter};
use crate::config::Settings;
use crate::document::Document;
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;

/// Folder name of an export started at `time`, e.g. `motion_export_2024-03-01_14-05-09`.
pub fn export_folder_name(time: &NaiveDateTime) -> String {
    time.format("motion_export_%Y-%m-%d_%H-%M-%S").to_string()
}

/// Ties the exporter to the user's export settings.
#[derive(Debug)]
pub struct MotionExportController {
    settings: Settings,
    exporter: MotionExporter,
}

impl MotionExportController {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            exporter: MotionExporter::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn exporter(&self) -> &MotionExporter {
        &self.exporter
    }

    /// The configured export folder, if it is an existing directory.
    pub fn export_folder(&self) -> ExportResult<PathBuf> {
        let Some(folder) = &self.settings.motion_export_folder else {
            log::warn!("Motion export folder not set");
            return Err(ExportError::FolderNotSet);
        };
        if !folder.is_dir() {
            log::warn!("Motion export folder is not a directory: {}", folder.display());
            return Err(ExportError::InvalidOutputFolder(folder.clone()));
        }
        Ok(folder.clone())
    }

    /// Export into a new subfolder named after the current local time.
    pub fn start_export(&self, document: Option<&Document>) -> ExportResult<ExportSummary> {
        self.start_export_at(document, &Local::now().naive_local())
    }

    /// Export into a new subfolder named after `time`.
    pub fn start_export_at(
        &self,
        document: Option<&Document>,
        time: &NaiveDateTime,
    ) -> ExportResult<ExportSummary> {
        if self.exporter.is_exporting() {
            return Err(ExportError::AlreadyExporting);
        }
        let output_dir = self.export_folder()?.join(export_folder_name(time));
        let summary = self
            .exporter
            .start_export(document, &output_dir, self.settings.frame_rate())?;
        log::info!("Motion export completed: {}", summary.output_dir.display());
        Ok(summary)
    }

    /// Ask a running export to stop. Returns true if one was running.
    pub fn stop_export(&self) -> bool {
        self.exporter.stop()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporter.is_exporting()
    }

    pub fn progress(&self) -> f64 {
        self.exporter.progress()
    }
}
