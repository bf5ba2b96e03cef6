// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Malformed timecode text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Wrong number of colon-separated fields
    #[error("invalid time format: must be HH:MM or HH:MM:SS")]
    FieldCount { input: String },

    /// A field is not a non-negative real number
    #[error("invalid time format")]
    InvalidField { input: String, field: String },
}

/// Pre-flight check failure for a single clip
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Clip Name cannot be empty")]
    EmptyName,

    #[error("Invalid Start Time: {0}")]
    InvalidStart(#[source] ParseError),

    #[error("Invalid End Time: {0}")]
    InvalidEnd(#[source] ParseError),

    #[error("End Time must be after Start Time")]
    NonPositiveRange { start: f64, end: f64 },

    #[error("End Time ({end:.2}s) is past the video's total duration ({total:.2}s)")]
    EndBeyondDuration { end: f64, total: f64 },
}

/// Validation failure located within a clip list
#[derive(Error, Debug, Clone, PartialEq)]
#[error("#{} '{name}': {source}", .index + 1)]
pub struct BatchValidationError {
    pub index: usize,
    pub name: String,
    #[source]
    pub source: ValidationError,
}

/// Duration inspection failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// The probe tool could not be started at all
    #[error("failed to run {program}: {message}. Make sure {program} is installed and in your PATH.")]
    ToolUnavailable { program: String, message: String },

    /// The probe tool ran but exited with a failure status
    #[error("{program} failed on {path}: {stderr}")]
    ToolFailed {
        program: String,
        path: String,
        stderr: String,
    },

    #[error("could not get duration from file: {path}")]
    EmptyOutput { path: String },

    #[error("failed to parse duration '{output}' from {path}")]
    Unparseable { path: String, output: String },
}

/// External tool invocation failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// Process could not be spawned or reaped
    #[error("failed to run {program}: {message}")]
    Launch { program: String, message: String },

    /// Process exited unsuccessfully; `output` is stdout and stderr combined
    #[error("{program} exited with a failure status")]
    Failed {
        program: String,
        code: Option<i32>,
        output: String,
    },
}

impl ToolError {
    /// Diagnostic text to surface to the user
    pub fn diagnostics(&self) -> String {
        match self {
            ToolError::Launch { .. } => self.to_string(),
            ToolError::Failed { output, .. } => output.clone(),
        }
    }
}
