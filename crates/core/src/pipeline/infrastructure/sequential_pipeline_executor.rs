use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::pipeline::frame_processor::FrameProcessor;
use crate::pipeline::overlay_presenter::OverlayPresenter;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::video::domain::frame_source::FrameSource;

/// Runs read → detect → present on the calling thread, one frame at a
/// time. Never drops frames, so output is deterministic for a given trace.
#[derive(Default)]
pub struct SequentialPipelineExecutor;

impl SequentialPipelineExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineExecutor for SequentialPipelineExecutor {
    fn execute(
        &self,
        mut source: Box<dyn FrameSource>,
        mut processor: FrameProcessor,
        presenter: &mut OverlayPresenter,
        logger: &mut dyn PipelineLogger,
        config: PipelineConfig,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for frame_result in source.frames() {
            if config.cancelled.load(Ordering::Relaxed) {
                logger.info("Cancelled");
                break;
            }
            let frame = match frame_result {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Skipping unreadable frame: {e}");
                    continue;
                }
            };

            let t0 = Instant::now();
            let update = processor.process(&frame);
            logger.timing("detect", t0.elapsed().as_secs_f64() * 1000.0);

            let t1 = Instant::now();
            if let Some(report) = presenter.present(&update) {
                logger.frame_presented(&update, &report);
            }
            logger.timing("present", t1.elapsed().as_secs_f64() * 1000.0);
        }
        Ok(())
    }
}
