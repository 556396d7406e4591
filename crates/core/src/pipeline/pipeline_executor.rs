use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::pipeline::frame_processor::FrameProcessor;
use crate::pipeline::overlay_presenter::OverlayPresenter;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::video::domain::frame_source::FrameSource;

/// Configuration for a pipeline execution run.
#[derive(Clone, Default)]
pub struct PipelineConfig {
    /// Checked between frames by every stage; set it to stop early.
    pub cancelled: Arc<AtomicBool>,
}

/// Abstracts how the read → detect → present pipeline is executed.
///
/// The presenter stays on the calling thread in every implementation;
/// only reading and detection may move elsewhere.
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        source: Box<dyn FrameSource>,
        processor: FrameProcessor,
        presenter: &mut OverlayPresenter,
        logger: &mut dyn PipelineLogger,
        config: PipelineConfig,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
