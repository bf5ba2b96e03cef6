//! Error handling module for Cropper

use thiserror::Error;

use crate::domain::errors::{BatchValidationError, ProbeError};

/// Main error type for Cropper operations
#[derive(Error, Debug)]
pub enum CropperError {
    #[error("Invalid clip {0}")]
    InvalidClip(#[from] BatchValidationError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// A batch was requested with no clips
    #[error("No clips to process")]
    EmptyBatch,

    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Clip manifest could not be read or understood
    #[error("Invalid clip list {path}: {message}")]
    Manifest { path: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Cropper operations
pub type CropperResult<T> = std::result::Result<T, CropperError>;
