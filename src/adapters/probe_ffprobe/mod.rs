//! FFprobe adapter for media file probing
//!
//! Asks ffprobe for the container duration only, printed as a bare number.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// FFprobe-based probe adapter
#[derive(Debug, Clone)]
pub struct FFprobeAdapter {
    program: String,
}

impl FFprobeAdapter {
    /// Create adapter invoking `program` (a name on PATH or a full path)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn duration_args(file_path: &str) -> Vec<String> {
        [
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
            file_path,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Interpret ffprobe's stdout as a duration in seconds
    fn parse_duration(file_path: &str, stdout: &str) -> Result<f64, ProbeError> {
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return Err(ProbeError::EmptyOutput {
                path: file_path.to_string(),
            });
        }

        trimmed
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite())
            .ok_or_else(|| ProbeError::Unparseable {
                path: file_path.to_string(),
                output: trimmed.to_string(),
            })
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, file_path: &str) -> Result<f64, ProbeError> {
        let args = Self::duration_args(file_path);
        debug!("Running: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ProbeError::ToolUnavailable {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ProbeError::ToolFailed {
                program: self.program.clone(),
                path: file_path.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let duration = Self::parse_duration(file_path, &String::from_utf8_lossy(&output.stdout))?;
        debug!("Probed duration of {}: {:.3}s", file_path, duration);
        Ok(duration)
    }
}
