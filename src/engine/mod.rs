//! Batch processing engine module

pub mod batch;
pub mod eta;

pub use batch::{BatchOutcome, BatchProcessor, COMPLETION_ETA, COMPLETION_STATUS};
pub use eta::EtaEstimator;
