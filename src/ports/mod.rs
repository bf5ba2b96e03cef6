// Ports - Interface definitions (contracts)

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;

/// Port for reading a source file's duration
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Total container duration in seconds
    async fn probe_duration(&self, file_path: &str) -> Result<f64, ProbeError>;
}

/// Port for running one stream-copy extraction.
///
/// The call must not return before the underlying process has exited and
/// its output has been collected.
#[async_trait]
pub trait ExtractPort: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ToolOutput, ToolError>;
}

/// Receiver of batch notifications.
///
/// Called from the batch's background task, never from the thread that
/// started the batch.
pub trait EventSink: Send + Sync {
    fn on_status(&self, status: String);

    /// Fraction of clips completed, in `[0, 1]`
    fn on_progress(&self, progress: f64);

    fn on_eta(&self, eta: String);

    fn on_error(&self, error: String);

    /// Dispatch a typed event to the matching callback
    fn emit(&self, event: ProcessingEvent) {
        match event {
            ProcessingEvent::Status(text) => self.on_status(text),
            ProcessingEvent::Progress(fraction) => self.on_progress(fraction),
            ProcessingEvent::Eta(text) => self.on_eta(text),
            ProcessingEvent::Error(text) => self.on_error(text),
        }
    }
}
