//! FFmpeg execution adapter
//!
//! Runs `ffmpeg` as a subprocess for each extraction and collects stdout and
//! stderr into a single transcript in the order lines arrive.

use async_trait::async_trait;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFmpeg-based extraction adapter
#[derive(Debug, Clone)]
pub struct FFmpegAdapter {
    program: String,
}

impl FFmpegAdapter {
    /// Create adapter invoking `program` (a name on PATH or a full path)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FFmpegAdapter {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl ExtractPort for FFmpegAdapter {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ToolOutput, ToolError> {
        let args = request.to_args();
        debug!("Running: {} {}", self.program, args.join(" "));

        let (status, combined) = run_with_combined_output(&self.program, &args).await?;

        if status.success() {
            Ok(ToolOutput { combined })
        } else {
            Err(ToolError::Failed {
                program: self.program.clone(),
                code: status.code(),
                output: combined,
            })
        }
    }
}

/// Spawn `program`, wait for it to exit and return its exit status together
/// with stdout and stderr interleaved line by line.
pub(crate) async fn run_with_combined_output(
    program: &str,
    args: &[String],
) -> Result<(ExitStatus, String), ToolError> {
    let launch_error = |message: String| ToolError::Launch {
        program: program.to_string(),
        message,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| launch_error(e.to_string()))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| launch_error("stdout not captured".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| launch_error("stderr not captured".to_string()))?;

    let mut out_reader = BufReader::new(stdout);
    let mut err_reader = BufReader::new(stderr);
    let mut out_line = Vec::new();
    let mut err_line = Vec::new();
    let mut combined = Vec::new();
    let mut out_done = false;
    let mut err_done = false;

    // read_until keeps partially read bytes in the line buffer when the other
    // branch wins, so nothing is lost across iterations.
    while !(out_done && err_done) {
        tokio::select! {
            read = out_reader.read_until(b'\n', &mut out_line), if !out_done => {
                out_done = append_line(read, &mut out_line, &mut combined);
            }
            read = err_reader.read_until(b'\n', &mut err_line), if !err_done => {
                err_done = append_line(read, &mut err_line, &mut combined);
            }
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|e| launch_error(format!("failed to wait for process: {}", e)))?;

    Ok((status, String::from_utf8_lossy(&combined).into_owned()))
}

/// Move a finished line into the transcript; returns true once the stream is exhausted
fn append_line(read: io::Result<usize>, line: &mut Vec<u8>, combined: &mut Vec<u8>) -> bool {
    combined.append(line);
    !matches!(read, Ok(n) if n > 0)
}
