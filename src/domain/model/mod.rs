// Domain models - Core types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::errors::ParseError;
use crate::utils::time::TimeParser;

/// Default container extension for extracted clips
pub const DEFAULT_OUTPUT_EXTENSION: &str = "mp4";

/// Elapsed time in seconds, derived from a timecode string
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Parse an `HH:MM` or `HH:MM:SS` timecode
    pub fn parse(time_str: &str) -> Result<Self, ParseError> {
        TimeParser::parse_timecode(time_str).map(Self::from_seconds)
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s", self.seconds)
    }
}

/// A named interval to cut out of the source video.
///
/// Timecodes are kept as entered; they are handed to ffmpeg verbatim and
/// only parsed for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub name: String,
    #[serde(rename = "startTime", alias = "start_time", alias = "start")]
    pub start_time: String,
    #[serde(rename = "endTime", alias = "end_time", alias = "end")]
    pub end_time: String,
}

impl Clip {
    pub fn new(
        name: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} - {}]", self.name, self.start_time, self.end_time)
    }
}

/// One batch run: ordered clips cut from one source into one directory
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub clips: Vec<Clip>,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub output_extension: String,
}

impl BatchJob {
    pub fn new(
        clips: Vec<Clip>,
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            clips,
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.output_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// `<output_dir>/<name>.<ext>`; identical names map to the same file.
    ///
    /// Root, drive and `..` components of the name are dropped so the result
    /// always lies under `output_dir`.
    pub fn output_path_for(&self, clip: &Clip) -> PathBuf {
        let file_name = format!("{}.{}", clip.name, self.output_extension);
        let relative: PathBuf = Path::new(&file_name)
            .components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .collect();
        self.output_dir.join(relative)
    }

    /// Build the extraction request for one clip of this job
    pub fn request_for(&self, clip: &Clip) -> ExtractionRequest {
        ExtractionRequest {
            input_path: self.input_path.clone(),
            start_time: clip.start_time.clone(),
            end_time: clip.end_time.clone(),
            output_path: self.output_path_for(clip),
        }
    }
}

/// Arguments for a single stream-copy extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub input_path: PathBuf,
    pub start_time: String,
    pub end_time: String,
    pub output_path: PathBuf,
}

impl ExtractionRequest {
    /// ffmpeg arguments: input, cut points, stream copy, overwrite, output
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "-i".to_string(),
            path_arg(&self.input_path),
            "-ss".to_string(),
            self.start_time.clone(),
            "-to".to_string(),
            self.end_time.clone(),
            "-c".to_string(),
            "copy".to_string(),
            "-y".to_string(),
            path_arg(&self.output_path),
        ]
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Output of a successful tool run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    /// stdout and stderr, in arrival order
    pub combined: String,
}

/// Notification emitted while a batch runs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum ProcessingEvent {
    #[serde(rename = "processing:status")]
    Status(String),
    #[serde(rename = "processing:progress")]
    Progress(f64),
    #[serde(rename = "processing:eta")]
    Eta(String),
    #[serde(rename = "processing:error")]
    Error(String),
}

impl ProcessingEvent {
    pub const STATUS: &'static str = "processing:status";
    pub const PROGRESS: &'static str = "processing:progress";
    pub const ETA: &'static str = "processing:eta";
    pub const ERROR: &'static str = "processing:error";

    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            ProcessingEvent::Status(_) => Self::STATUS,
            ProcessingEvent::Progress(_) => Self::PROGRESS,
            ProcessingEvent::Eta(_) => Self::ETA,
            ProcessingEvent::Error(_) => Self::ERROR,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ProcessingEvent::Error(_))
    }
}

impl fmt::Display for ProcessingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingEvent::Status(text) => write!(f, "{}", text),
            ProcessingEvent::Progress(fraction) => write!(f, "{:.0}%", fraction * 100.0),
            ProcessingEvent::Eta(text) => write!(f, "ETA: {}", text),
            ProcessingEvent::Error(text) => write!(f, "{}", text),
        }
    }
}
