// Event sink adapters - Where batch notifications end up

use std::io::{self, Write};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::domain::model::ProcessingEvent;
use crate::ports::EventSink;

/// Forwards every event into an unbounded channel.
///
/// The receiving side sees `None` once the batch task has finished and
/// dropped its sink.
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    sender: mpsc::UnboundedSender<ProcessingEvent>,
}

impl ChannelEventSink {
    pub fn new(sender: mpsc::UnboundedSender<ProcessingEvent>) -> Self {
        Self { sender }
    }

    /// Create a sink together with the receiver for its events
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProcessingEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    fn send(&self, event: ProcessingEvent) {
        if let Err(e) = self.sender.send(event) {
            debug!("Event receiver dropped, discarding {}", e.0.name());
        }
    }
}

impl EventSink for ChannelEventSink {
    fn on_status(&self, status: String) {
        self.send(ProcessingEvent::Status(status));
    }

    fn on_progress(&self, progress: f64) {
        self.send(ProcessingEvent::Progress(progress));
    }

    fn on_eta(&self, eta: String) {
        self.send(ProcessingEvent::Eta(eta));
    }

    fn on_error(&self, error: String) {
        self.send(ProcessingEvent::Error(error));
    }
}

/// Mirrors events into the tracing log
#[derive(Debug, Clone, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn on_status(&self, status: String) {
        info!(event = ProcessingEvent::STATUS, "{}", status);
    }

    fn on_progress(&self, progress: f64) {
        debug!(event = ProcessingEvent::PROGRESS, progress, "{:.0}%", progress * 100.0);
    }

    fn on_eta(&self, eta: String) {
        debug!(event = ProcessingEvent::ETA, "ETA {}", eta);
    }

    fn on_error(&self, error: String) {
        error!(event = ProcessingEvent::ERROR, "{}", error);
    }
}

/// Human-readable, one line per event
pub struct ConsoleEventSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl ConsoleEventSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleEventSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl<W: Write + Send> EventSink for ConsoleEventSink<W> {
    fn on_status(&self, status: String) {
        self.write_line(&status);
    }

    fn on_progress(&self, progress: f64) {
        self.write_line(&format!("Progress: {:.0}%", progress * 100.0));
    }

    fn on_eta(&self, eta: String) {
        self.write_line(&format!("ETA: {}", eta));
    }

    fn on_error(&self, error: String) {
        self.write_line(&format!("ERROR: {}", error));
    }
}

/// One JSON object per line, `{"event": "...", "payload": ...}`, for a
/// front end reading our stdout
pub struct JsonLinesEventSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl JsonLinesEventSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonLinesEventSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_event(&self, event: &ProcessingEvent) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize {}: {}", event.name(), e);
                return;
            }
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl<W: Write + Send> EventSink for JsonLinesEventSink<W> {
    fn on_status(&self, status: String) {
        self.write_event(&ProcessingEvent::Status(status));
    }

    fn on_progress(&self, progress: f64) {
        self.write_event(&ProcessingEvent::Progress(progress));
    }

    fn on_eta(&self, eta: String) {
        self.write_event(&ProcessingEvent::Eta(eta));
    }

    fn on_error(&self, error: String) {
        self.write_event(&ProcessingEvent::Error(error));
    }
}
