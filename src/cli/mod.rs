//! CLI module for Cropper
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod args;
pub mod commands;

/// Cropper batch clip extractor
///
/// Cuts named sub-clips out of one source video with ffmpeg stream copy,
/// one clip at a time.
#[derive(Parser, Debug)]
#[command(name = "cropper")]
#[command(about = "Cut a batch of named clips out of a video without re-encoding")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: ./cropper.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Processing event output for `run` (text, json)
    #[arg(long = "events", global = true)]
    pub event_format: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the duration of a video file in seconds
    Probe(args::ProbeArgs),
    /// Check clips against a video's duration without cutting anything
    Validate(args::ValidateArgs),
    /// Validate and extract all clips
    Run(args::RunArgs),
}
