//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use inkmotion_core::EraserMode;
use std::path::PathBuf;

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "inkmotion.json";

/// InkMotion: erase ink and export handwriting motion for replay
#[derive(Parser, Debug)]
#[command(name = "inkmotion")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run eraser samples over a page and save the result
    Erase(EraseArgs),

    /// Export the motion description of a document
    Export(ExportArgs),

    /// Show the playback state of an exported motion description
    Inspect(InspectArgs),

    /// Write a settings file with default values
    InitSettings(InitSettingsArgs),
}

/// Eraser mode on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Cut touched parts out of strokes
    Default,
    /// Remove touched strokes entirely
    Delete,
}

impl From<ModeArg> for EraserMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Default => EraserMode::Default,
            ModeArg::Delete => EraserMode::DeleteStroke,
        }
    }
}

/// Arguments for the erase command
#[derive(Parser, Debug)]
pub struct EraseArgs {
    /// Document JSON to erase in
    pub document: PathBuf,

    /// Page index
    #[arg(long, default_value_t = 0)]
    pub page: usize,

    /// Eraser sample as `x,y`; repeat for a gesture
    #[arg(long = "at", value_parser = parse_point, required = true)]
    pub points: Vec<(f64, f64)>,

    /// Eraser mode (overrides settings)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Eraser half-size (overrides settings)
    #[arg(long)]
    pub thickness: Option<f64>,

    /// Milliseconds between samples; the system clock is used when omitted
    #[arg(long)]
    pub interval: Option<u64>,

    /// Output document (defaults to overwriting the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Document JSON to export
    pub document: PathBuf,

    /// Write directly into this directory instead of a timestamped
    /// subfolder of the configured export folder
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Frame rate (overrides settings)
    #[arg(long)]
    pub frame_rate: Option<u32>,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Exported `motion_metadata.json`
    pub metadata: PathBuf,

    /// Show stroke visibility at this frame
    #[arg(long)]
    pub frame: Option<u64>,
}

/// Arguments for the init-settings command
#[derive(Parser, Debug)]
pub struct InitSettingsArgs {
    /// Export folder to store in the new settings
    #[arg(long)]
    pub export_folder: Option<PathBuf>,

    /// Overwrite an existing settings file
    #[arg(long)]
    pub force: bool,
}

fn parse_point(value: &str) -> Result<(f64, f64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{value}`"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y: {e}"))?;
    Ok((x, y))
}
