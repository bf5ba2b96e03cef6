use std::sync::Arc;

use crate::adapters::{AppConfig, FFmpegAdapter, FFprobeAdapter};
use crate::app::batch_interactor::BatchInteractor;
use crate::ports::{ExtractPort, ProbePort};

/// Wires the ffmpeg/ffprobe adapters into the interactors
pub struct DefaultAppContainer {
    batch_interactor: Arc<BatchInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::new(config.ffprobe_path.clone()));
        let execute_port = Arc::new(FFmpegAdapter::new(config.ffmpeg_path.clone()));

        let batch_interactor = Arc::new(BatchInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            execute_port as Arc<dyn ExtractPort>,
            config.output_extension.clone(),
        ));

        Self { batch_interactor }
    }

    pub fn batch_interactor(&self) -> Arc<BatchInteractor> {
        Arc::clone(&self.batch_interactor)
    }
}
