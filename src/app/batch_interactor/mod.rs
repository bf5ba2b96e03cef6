// Batch interactor - Orchestrates the probe, validate and extract use case

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::BatchProcessor;
use crate::error::{CropperError, CropperResult};
use crate::ports::*;

/// Request to cut a list of clips out of one source file
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub clips: Vec<Clip>,
    pub input_path: String,
    pub output_dir: PathBuf,
}

impl BatchRequest {
    pub fn new(clips: Vec<Clip>, input_path: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            clips,
            input_path: input_path.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Interactor for the clip batch use case
pub struct BatchInteractor {
    probe_port: Arc<dyn ProbePort>,
    processor: BatchProcessor,
    output_extension: String,
}

impl BatchInteractor {
    /// Create new batch interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExtractPort>,
        output_extension: impl Into<String>,
    ) -> Self {
        Self {
            probe_port,
            processor: BatchProcessor::new(execute_port),
            output_extension: output_extension.into(),
        }
    }

    /// Total duration of the source in seconds
    pub async fn probe_duration(&self, input_path: &str) -> CropperResult<f64> {
        if !std::path::Path::new(input_path).is_file() {
            return Err(CropperError::InputFileNotFound {
                path: input_path.to_string(),
            });
        }

        let duration = self.probe_port.probe_duration(input_path).await?;
        info!("Source {} is {:.2}s long", input_path, duration);
        Ok(duration)
    }

    /// Check a single clip against a known source duration
    pub fn validate_clip(&self, clip: &Clip, total_duration: f64) -> Result<(), ValidationError> {
        ClipValidator::validate(clip, total_duration)
    }

    /// Probe the source, check every clip and build the job.
    ///
    /// Fails before anything is written if the list is empty or any clip is
    /// invalid. Creates the output directory when missing.
    pub async fn prepare(&self, request: BatchRequest) -> CropperResult<BatchJob> {
        if request.clips.is_empty() {
            return Err(CropperError::EmptyBatch);
        }

        let total_duration = self.probe_duration(&request.input_path).await?;
        ClipValidator::validate_all(&request.clips, total_duration)?;

        // Same-named clips write the same file; the later one wins
        for name in ClipValidator::duplicate_names(&request.clips) {
            warn!("Several clips are named '{}'; later ones overwrite earlier output", name);
        }

        tokio::fs::create_dir_all(&request.output_dir).await?;

        Ok(BatchJob::new(request.clips, request.input_path, request.output_dir)
            .with_extension(&self.output_extension))
    }

    /// Validate the request and start the batch in the background.
    ///
    /// Returns as soon as the batch is running; progress and failures of the
    /// extraction itself are reported only through `sink`.
    pub async fn start(&self, request: BatchRequest, sink: Arc<dyn EventSink>) -> CropperResult<usize> {
        let job = self.prepare(request).await?;
        let clips = job.len();
        info!("Submitting {} clip(s) for extraction", clips);
        self.processor.start_batch(job, sink);
        Ok(clips)
    }
}
