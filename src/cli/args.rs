//! Command-line argument definitions

use clap::Args;
use std::path::PathBuf;

/// Where the clip list comes from; both sources may be combined
#[derive(Args, Debug, Clone, Default)]
pub struct ClipSourceArgs {
    /// Clip as NAME,START,END (START/END as HH:MM or HH:MM:SS); repeatable
    #[arg(short, long = "clip", value_name = "NAME,START,END")]
    pub clips: Vec<String>,

    /// Clip list file (.json, .toml, .yaml or .yml)
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input video file path, probed for its duration
    #[arg(short, long, required_unless_present = "duration")]
    pub input: Option<String>,

    /// Use this duration in seconds instead of probing a file
    #[arg(short, long, conflicts_with = "input")]
    pub duration: Option<f64>,

    #[command(flatten)]
    pub source: ClipSourceArgs,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,

    /// Directory receiving NAME.mp4 for every clip
    #[arg(short, long)]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub source: ClipSourceArgs,
}
