//! InkMotion command line front-end.

mod commands;
mod error;

use clap::Parser;
use commands::{Cli, Commands, EraseArgs, ExportArgs, InitSettingsArgs, InspectArgs};
use error::{CliError, CliResult};
use inkmotion_core::{
    Document, EraseHandler, ExportSummary, MotionExportController, MotionExporter, MotionTimeline,
    Redrawable, Settings, UndoRedoHandler,
};
use kurbo::Rect;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::PoisonError;

/// Logs the page areas the eraser invalidated.
struct DirtyLog;

impl Redrawable for DirtyLog {
    fn rerender_range(&self, range: Rect) {
        log::debug!(
            "Rerender ({:.1}, {:.1})-({:.1}, {:.1})",
            range.x0,
            range.y0,
            range.x1,
            range.y1
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Erase(args) => {
            let settings = Settings::load_or_default(&cli.settings)?;
            let erased = run_erase(&settings, &args)?;
            println!(
                "{} eraser samples applied, {}",
                args.points.len(),
                if erased { "document changed" } else { "nothing erased" }
            );
            Ok(())
        }
        Commands::Export(args) => {
            let settings = Settings::load_or_default(&cli.settings)?;
            let summary = run_export(settings, &args)?;
            print_summary(&summary);
            Ok(())
        }
        Commands::Inspect(args) => run_inspect(&args),
        Commands::InitSettings(args) => {
            run_init_settings(&cli.settings, &args)?;
            println!("Wrote {}", cli.settings.display());
            Ok(())
        }
    }
}

fn load_document(path: &Path) -> CliResult<Document> {
    let json = fs::read_to_string(path)?;
    let document = Document::from_json(&json)?;
    log::info!(
        "Loaded {} ({} pages)",
        path.display(),
        document.page_count()
    );
    Ok(document)
}

/// Apply one eraser gesture and save the document. Returns true if anything was erased.
fn run_erase(settings: &Settings, args: &EraseArgs) -> CliResult<bool> {
    let document = load_document(&args.document)?;
    if args.page >= document.page_count() {
        return Err(CliError::PageOutOfRange {
            index: args.page,
            count: document.page_count(),
        });
    }

    let mut eraser = settings.eraser.clone();
    if let Some(mode) = args.mode {
        eraser.mode = mode.into();
    }
    if let Some(thickness) = args.thickness {
        eraser.thickness = thickness;
    }

    let document = document.into_shared();
    let mut undo = UndoRedoHandler::new();
    {
        let mut handler =
            EraseHandler::new(document.clone(), args.page, &eraser, &DirtyLog, &mut undo);
        for (i, (x, y)) in args.points.iter().enumerate() {
            let timestamp = args.interval.map(|interval| i as u64 * interval);
            handler.erase(*x, *y, timestamp);
        }
        handler.finalize();
    }

    let json = document
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .to_json()?;
    let output = args.output.as_deref().unwrap_or(&args.document);
    fs::write(output, json)?;
    log::info!("Saved {}", output.display());
    Ok(undo.can_undo())
}

fn run_export(mut settings: Settings, args: &ExportArgs) -> CliResult<ExportSummary> {
    if let Some(frame_rate) = args.frame_rate {
        settings.motion_export_frame_rate = frame_rate;
    }
    let document = load_document(&args.document)?;

    let summary = match &args.output {
        Some(output) => {
            MotionExporter::new().start_export(Some(&document), output, settings.frame_rate())?
        }
        None => MotionExportController::new(settings).start_export(Some(&document))?,
    };
    Ok(summary)
}

fn print_summary(summary: &ExportSummary) {
    println!("Exported to {}", summary.output_dir.display());
    println!("  frame rate:    {} fps", summary.frame_rate);
    println!("  frames:        {}", summary.total_frames);
    println!("  duration:      {} ms", summary.total_duration_ms);
    println!("  motion points: {}", summary.total_motion_points);
    println!("  eraser events: {}", summary.eraser_events);
}

fn run_inspect(args: &InspectArgs) -> CliResult<()> {
    let timeline = MotionTimeline::load(&args.metadata)?;
    let metadata = timeline.metadata();
    let strokes: usize = metadata.pages.iter().map(|p| p.strokes.len()).sum();
    println!(
        "{} pages, {} strokes, {} frames at {} fps ({} ms)",
        metadata.pages.len(),
        strokes,
        timeline.total_frames(),
        timeline.frame_rate(),
        timeline.duration_ms()
    );

    if let Some(frame) = args.frame {
        println!("Frame {frame} ({} ms):", timeline.frame_time(frame));
        for progress in timeline.visible_points(frame) {
            println!(
                "  page {} stroke {}: {}/{}",
                progress.page_index,
                progress.stroke_index,
                progress.visible_points,
                progress.total_points
            );
        }
        println!(
            "  eraser events so far: {}",
            timeline.eraser_events_until(frame).len()
        );
    }
    Ok(())
}

fn run_init_settings(path: &Path, args: &InitSettingsArgs) -> CliResult<()> {
    if path.exists() && !args.force {
        return Err(CliError::SettingsExist(path.to_path_buf()));
    }
    let settings = Settings {
        motion_export_folder: args.export_folder.clone(),
        ..Settings::default()
    };
    settings.save(path)?;
    Ok(())
}
