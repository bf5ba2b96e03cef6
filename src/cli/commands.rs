//! Command implementations

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use crate::adapters::{AppConfig, ChannelEventSink, ConsoleEventSink, JsonLinesEventSink, TracingEventSink};
use crate::app::{BatchRequest, DefaultAppContainer};
use crate::cli::args::{ClipSourceArgs, ProbeArgs, RunArgs, ValidateArgs};
use crate::domain::model::{Clip, ProcessingEvent};
use crate::engine::COMPLETION_ETA;
use crate::error::CropperError;
use crate::manifest::{load_manifest, parse_inline_clip};
use crate::ports::EventSink;

/// Gather clips from the manifest first, then from `--clip` arguments
pub fn collect_clips(source: &ClipSourceArgs) -> Result<Vec<Clip>> {
    let mut clips = match &source.manifest {
        Some(path) => load_manifest(path)?,
        None => Vec::new(),
    };

    for spec in &source.clips {
        let clip = parse_inline_clip(spec)
            .map_err(|e| anyhow::anyhow!("Invalid --clip value: {}", e))?;
        clips.push(clip);
    }

    Ok(clips)
}

/// Execute the probe command
pub async fn probe(container: &DefaultAppContainer, args: ProbeArgs) -> Result<()> {
    let duration = container
        .batch_interactor()
        .probe_duration(&args.input)
        .await
        .with_context(|| format!("Failed to probe {}", args.input))?;

    println!("{}", duration);
    Ok(())
}

/// Execute the validate command; every clip is reported, the command fails
/// if any of them is invalid
pub async fn validate(container: &DefaultAppContainer, args: ValidateArgs) -> Result<()> {
    let clips = collect_clips(&args.source)?;
    if clips.is_empty() {
        return Err(CropperError::EmptyBatch.into());
    }

    let interactor = container.batch_interactor();
    let total_duration = match (args.duration, &args.input) {
        (Some(duration), _) => duration,
        (None, Some(input)) => interactor
            .probe_duration(input)
            .await
            .with_context(|| format!("Failed to probe {}", input))?,
        (None, None) => anyhow::bail!("Either --input or --duration is required"),
    };

    let mut invalid = 0;
    for (index, clip) in clips.iter().enumerate() {
        match interactor.validate_clip(clip, total_duration) {
            Ok(()) => println!("ok    #{} {}", index + 1, clip),
            Err(e) => {
                invalid += 1;
                println!("error #{} {}: {}", index + 1, clip, e);
            }
        }
    }

    if invalid > 0 {
        anyhow::bail!("{} of {} clip(s) failed validation", invalid, clips.len());
    }
    info!("All {} clip(s) valid for a {:.2}s source", clips.len(), total_duration);
    Ok(())
}

/// Execute the run command and wait for the batch to finish
pub async fn run(container: &DefaultAppContainer, config: &AppConfig, args: RunArgs) -> Result<()> {
    let clips = collect_clips(&args.source)?;
    let request = BatchRequest::new(clips, args.input, args.output_dir);

    let (sink, mut events) = ChannelEventSink::channel();
    container
        .batch_interactor()
        .start(request, Arc::new(sink))
        .await?;

    let renderer: Box<dyn EventSink> = if config.json_events() {
        Box::new(JsonLinesEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stdout())
    };

    match render_events(&mut events, renderer.as_ref()).await {
        BatchEnd::Completed => Ok(()),
        BatchEnd::Failed => {
            warn!("Batch stopped after an extraction failure");
            anyhow::bail!("Batch aborted")
        }
        BatchEnd::Interrupted => {
            anyhow::bail!("Batch ended without reporting completion")
        }
    }
}

/// How the event stream of a batch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchEnd {
    /// The completion ETA arrived
    Completed,
    /// An error event arrived
    Failed,
    /// The channel closed with neither
    Interrupted,
}

/// Render and log every event until the batch task drops its sink
async fn render_events(
    events: &mut UnboundedReceiver<ProcessingEvent>,
    renderer: &dyn EventSink,
) -> BatchEnd {
    let log_sink = TracingEventSink;
    let mut end = BatchEnd::Interrupted;

    while let Some(event) = events.recv().await {
        if event.is_error() {
            end = BatchEnd::Failed;
        } else if end == BatchEnd::Interrupted
            && event == ProcessingEvent::Eta(COMPLETION_ETA.to_string())
        {
            end = BatchEnd::Completed;
        }
        log_sink.emit(event.clone());
        renderer.emit(event);
    }

    end
}
