use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use crate::pipeline::frame_processor::FrameProcessor;
use crate::pipeline::frame_update::FrameUpdate;
use crate::pipeline::infrastructure::latest_frame_slot::{latest_frame_slot, LatestFrameSender};
use crate::pipeline::overlay_presenter::OverlayPresenter;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// An update plus how long detection took for it.
type TimedUpdate = (FrameUpdate, f64);

/// Executes the overlay pipeline with dedicated threads for reading and
/// detection.
///
/// Layout: `reader → latest-frame slot → detect → main [present]`
///
/// The reader never waits on detection: a frame still pending when the
/// next one arrives is dropped. Updates reach the calling thread in frame
/// order over a single channel, and only that thread touches the sink.
pub struct ThreadedPipelineExecutor;

impl ThreadedPipelineExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThreadedPipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineExecutor for ThreadedPipelineExecutor {
    fn execute(
        &self,
        source: Box<dyn FrameSource>,
        processor: FrameProcessor,
        presenter: &mut OverlayPresenter,
        logger: &mut dyn PipelineLogger,
        config: PipelineConfig,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (frame_tx, frame_rx) = latest_frame_slot();
        let (update_tx, update_rx) = crossbeam_channel::unbounded::<TimedUpdate>();

        let reader_handle = spawn_reader(source, frame_tx, config.cancelled.clone());
        let detect_handle = spawn_detector(
            processor,
            frame_rx,
            update_tx,
            config.cancelled.clone(),
        );

        run_main_loop(update_rx, presenter, logger, &config.cancelled);

        join_threads(reader_handle, detect_handle, logger)
    }
}

/// What the reader thread saw, reported after it finishes.
struct ReadStats {
    dropped: usize,
    unreadable: usize,
}

fn spawn_reader(
    mut source: Box<dyn FrameSource>,
    frame_tx: LatestFrameSender,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<ReadStats> {
    std::thread::spawn(move || {
        let mut stats = ReadStats {
            dropped: 0,
            unreadable: 0,
        };
        for frame_result in source.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            match frame_result {
                Ok(frame) => stats.dropped += frame_tx.publish(frame),
                Err(e) => {
                    log::warn!("Skipping unreadable frame: {e}");
                    stats.unreadable += 1;
                }
            }
        }
        stats
    })
}

fn spawn_detector(
    mut processor: FrameProcessor,
    frame_rx: Receiver<Frame>,
    update_tx: Sender<TimedUpdate>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for frame in frame_rx {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let t0 = Instant::now();
            let update = processor.process(&frame);
            let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
            if update_tx.send((update, elapsed_ms)).is_err() {
                break;
            }
        }
    })
}

/// Presents updates as they arrive until the detector hangs up.
fn run_main_loop(
    update_rx: Receiver<TimedUpdate>,
    presenter: &mut OverlayPresenter,
    logger: &mut dyn PipelineLogger,
    cancelled: &AtomicBool,
) {
    for (update, detect_ms) in update_rx {
        if cancelled.load(Ordering::Relaxed) {
            logger.info("Cancelled");
            break;
        }
        logger.timing("detect", detect_ms);

        let t0 = Instant::now();
        if let Some(report) = presenter.present(&update) {
            logger.frame_presented(&update, &report);
        }
        logger.timing("present", t0.elapsed().as_secs_f64() * 1000.0);
    }
}

/// Joins both worker threads and coalesces the first error encountered.
fn join_threads(
    reader_handle: JoinHandle<ReadStats>,
    detect_handle: JoinHandle<()>,
    logger: &mut dyn PipelineLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut first_error: Option<Box<dyn std::error::Error>> = None;

    fn set_if_none(slot: &mut Option<Box<dyn std::error::Error>>, err: Box<dyn std::error::Error>) {
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    match reader_handle.join() {
        Ok(stats) => {
            logger.frames_dropped(stats.dropped);
            if stats.unreadable > 0 {
                logger.info(&format!("Skipped {} unreadable frames", stats.unreadable));
            }
        }
        Err(_) => set_if_none(&mut first_error, "Reader thread panicked".into()),
    }

    if detect_handle.join().is_err() {
        set_if_none(&mut first_error, "Detect thread panicked".into());
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
