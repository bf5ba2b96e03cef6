//! Cropper batch clip extractor library
//!
//! Cuts named, time-bounded clips out of one source video by running
//! ffmpeg with stream copy, one clip at a time, and reports status,
//! progress, remaining time and errors to an event sink.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::{ParseError, ProbeError, ToolError, ValidationError};
pub use domain::model::{BatchJob, Clip, ProcessingEvent, TimeSpec};
pub use engine::BatchProcessor;
pub use error::{CropperError, CropperResult};
pub use ports::{EventSink, ExtractPort, ProbePort};
