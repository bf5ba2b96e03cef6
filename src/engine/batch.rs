//! Sequential clip batch processing
//!
//! A batch runs on its own tokio task. Clips are cut one after another in
//! input order; the first failed extraction ends the batch. Everything the
//! caller learns about the run arrives through its [`EventSink`].

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, Instrument};

use crate::domain::model::*;
use crate::engine::eta::EtaEstimator;
use crate::ports::{EventSink, ExtractPort};
use crate::utils::time::TimeParser;

/// Status text emitted once every clip has been written
pub const COMPLETION_STATUS: &str = "All clips created successfully!";

/// ETA text emitted after the completion status
pub const COMPLETION_ETA: &str = "Done";

/// How a batch ended
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// All clips were extracted
    Completed { clips: usize, elapsed: Duration },
    /// Extraction of the clip at `index` failed; clips before it were written
    Aborted { index: usize, name: String },
}

/// Drives the extraction tool over a batch of clips
#[derive(Clone)]
pub struct BatchProcessor {
    extractor: Arc<dyn ExtractPort>,
}

impl BatchProcessor {
    pub fn new(extractor: Arc<dyn ExtractPort>) -> Self {
        Self { extractor }
    }

    /// Start processing `job` in the background and return immediately.
    ///
    /// Must be called from within a tokio runtime. There is no handle to
    /// cancel or await the batch; the sink is dropped when it finishes.
    pub fn start_batch(&self, job: BatchJob, sink: Arc<dyn EventSink>) {
        let processor = self.clone();
        let span = tracing::info_span!("batch", clips = job.len());

        tokio::spawn(
            async move {
                processor.run(&job, sink.as_ref()).await;
            }
            .instrument(span),
        );
    }

    /// Process `job` to completion or first failure on the current task
    pub async fn run(&self, job: &BatchJob, sink: &dyn EventSink) -> BatchOutcome {
        let total = job.len();
        let batch_start = Instant::now();
        let mut eta = EtaEstimator::new();

        info!(
            "Starting batch of {} clip(s) from {} into {}",
            total,
            job.input_path.display(),
            job.output_dir.display()
        );

        for (index, clip) in job.clips.iter().enumerate() {
            sink.on_status(format!(
                "Processing clip {} of {}: {}",
                index + 1,
                total,
                clip.name
            ));

            let clip_start = Instant::now();
            let request = job.request_for(clip);

            match self.extractor.extract(&request).await {
                Ok(output) => {
                    debug!("Wrote {}", request.output_path.display());
                    trace!("ffmpeg output for '{}':\n{}", clip.name, output.combined);
                }
                Err(e) => {
                    error!("Clip '{}' failed: {}", clip.name, e);
                    sink.on_error(format!(
                        "Error on clip '{}': {}",
                        clip.name,
                        e.diagnostics()
                    ));
                    return BatchOutcome::Aborted {
                        index,
                        name: clip.name.clone(),
                    };
                }
            }

            let completed = index + 1;
            sink.on_progress(completed as f64 / total as f64);

            eta.record(clip_start.elapsed());
            let remaining = eta.remaining(total - completed);
            sink.on_eta(TimeParser::format_eta(remaining));
        }

        sink.on_status(COMPLETION_STATUS.to_string());
        sink.on_eta(COMPLETION_ETA.to_string());

        let elapsed = batch_start.elapsed();
        info!("Batch finished: {} clip(s) in {:.2?}", total, elapsed);
        BatchOutcome::Completed {
            clips: total,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::event_sink::ChannelEventSink;
    use crate::domain::errors::ToolError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Extractor that succeeds except for the listed call numbers
    struct ScriptedExtractor {
        fail_on: Vec<usize>,
        calls: Mutex<Vec<ExtractionRequest>>,
    }

    impl ScriptedExtractor {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                fail_on,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ExtractPort for ScriptedExtractor {
        async fn extract(&self, request: &ExtractionRequest) -> Result<ToolOutput, ToolError> {
            let mut calls = self.calls.lock().unwrap();
            let call = calls.len();
            calls.push(request.clone());
            if self.fail_on.contains(&call) {
                Err(ToolError::Failed {
                    program: "ffmpeg".into(),
                    code: Some(1),
                    output: "Invalid data found when processing input\n".into(),
                })
            } else {
                Ok(ToolOutput::default())
            }
        }
    }

    fn two_clip_job() -> BatchJob {
        BatchJob::new(
            vec![
                Clip::new("A", "00:00:00", "00:00:10"),
                Clip::new("B", "00:00:10", "00:00:20"),
            ],
            "source.mp4",
            "out",
        )
    }

    fn drain(mut receiver: tokio::sync::mpsc::UnboundedReceiver<ProcessingEvent>) -> Vec<ProcessingEvent> {
        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_run_success_event_order() {
        let extractor = Arc::new(ScriptedExtractor::new(vec![]));
        let processor = BatchProcessor::new(extractor.clone());
        let (sink, receiver) = ChannelEventSink::channel();

        let outcome = processor.run(&two_clip_job(), &sink).await;
        assert!(matches!(outcome, BatchOutcome::Completed { clips: 2, .. }));

        assert_eq!(
            drain(receiver),
            vec![
                ProcessingEvent::Status("Processing clip 1 of 2: A".into()),
                ProcessingEvent::Progress(0.5),
                ProcessingEvent::Eta("0s".into()),
                ProcessingEvent::Status("Processing clip 2 of 2: B".into()),
                ProcessingEvent::Progress(1.0),
                ProcessingEvent::Eta("0s".into()),
                ProcessingEvent::Status(COMPLETION_STATUS.into()),
                ProcessingEvent::Eta(COMPLETION_ETA.into()),
            ]
        );

        let calls = extractor.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].start_time, "00:00:00");
        assert_eq!(calls[1].output_path, std::path::PathBuf::from("out").join("B.mp4"));
    }

    #[tokio::test]
    async fn test_run_aborts_on_first_failure() {
        let extractor = Arc::new(ScriptedExtractor::new(vec![1]));
        let processor = BatchProcessor::new(extractor.clone());
        let (sink, receiver) = ChannelEventSink::channel();

        let job = BatchJob::new(
            vec![
                Clip::new("A", "00:00:00", "00:00:10"),
                Clip::new("B", "00:00:10", "00:00:20"),
                Clip::new("C", "00:00:20", "00:00:30"),
            ],
            "source.mp4",
            "out",
        );
        let outcome = processor.run(&job, &sink).await;
        assert_eq!(
            outcome,
            BatchOutcome::Aborted {
                index: 1,
                name: "B".into()
            }
        );

        let events = drain(receiver);
        assert_eq!(
            events.last(),
            Some(&ProcessingEvent::Error(
                "Error on clip 'B': Invalid data found when processing input\n".into()
            ))
        );
        assert!(!events.contains(&ProcessingEvent::Eta(COMPLETION_ETA.into())));
        // Clip C is never attempted
        assert_eq!(extractor.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_emits_only_completion() {
        let processor = BatchProcessor::new(Arc::new(ScriptedExtractor::new(vec![])));
        let (sink, receiver) = ChannelEventSink::channel();

        let job = BatchJob::new(vec![], "source.mp4", "out");
        let outcome = processor.run(&job, &sink).await;
        assert!(matches!(outcome, BatchOutcome::Completed { clips: 0, .. }));
        assert_eq!(
            drain(receiver),
            vec![
                ProcessingEvent::Status(COMPLETION_STATUS.into()),
                ProcessingEvent::Eta(COMPLETION_ETA.into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_launch_failure_is_reported_as_clip_error() {
        struct Unlaunchable;

        #[async_trait]
        impl ExtractPort for Unlaunchable {
            async fn extract(&self, _request: &ExtractionRequest) -> Result<ToolOutput, ToolError> {
                Err(ToolError::Launch {
                    program: "ffmpeg".into(),
                    message: "No such file or directory".into(),
                })
            }
        }

        let processor = BatchProcessor::new(Arc::new(Unlaunchable));
        let (sink, receiver) = ChannelEventSink::channel();
        processor.run(&two_clip_job(), &sink).await;

        assert_eq!(
            drain(receiver),
            vec![
                ProcessingEvent::Status("Processing clip 1 of 2: A".into()),
                ProcessingEvent::Error(
                    "Error on clip 'A': failed to run ffmpeg: No such file or directory".into()
                ),
            ]
        );
    }
}
