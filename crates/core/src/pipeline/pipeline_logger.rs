use std::collections::HashMap;
use std::time::Instant;

use crate::pipeline::frame_update::FrameUpdate;
use crate::pipeline::overlay_presenter::PresentReport;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Executors report what happened to each frame here so callers can observe
/// throughput and degradation without touching the orchestration code.
pub trait PipelineLogger: Send {
    /// A frame's update reached the sink.
    fn frame_presented(&mut self, update: &FrameUpdate, report: &PresentReport);

    /// Frames superseded by a newer one before detection ran.
    fn frames_dropped(&mut self, count: usize);

    /// Record how long a named pipeline stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn frame_presented(&mut self, _update: &FrameUpdate, _report: &PresentReport) {}
    fn frames_dropped(&mut self, _count: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running count and total duration for one pipeline stage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageTiming {
    pub count: usize,
    pub total_ms: f64,
}

impl StageTiming {
    pub fn average_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms / self.count as f64
        }
    }
}

/// CLI-oriented logger that counts frames, placements and per-stage timing,
/// and prints a summary when the run ends.
///
/// Progress goes out every `throttle_frames` presented frames. Memory stays
/// constant over a run: only counters and per-stage totals are kept.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, StageTiming>,
    issues: HashMap<&'static str, usize>,
    start_time: Instant,
    frames_presented: usize,
    frames_with_faces: usize,
    frames_dropped: usize,
    placements_applied: usize,
    overlays_cleared: usize,
    surface_transitions: usize,
    sink_failures: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            issues: HashMap::new(),
            start_time: Instant::now(),
            frames_presented: 0,
            frames_with_faces: 0,
            frames_dropped: 0,
            placements_applied: 0,
            overlays_cleared: 0,
            surface_transitions: 0,
            sink_failures: 0,
        }
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    pub fn dropped(&self) -> usize {
        self.frames_dropped
    }

    pub fn placements_applied(&self) -> usize {
        self.placements_applied
    }

    pub fn sink_failures(&self) -> usize {
        self.sink_failures
    }

    pub fn issue_count(&self, name: &str) -> usize {
        self.issues.get(name).copied().unwrap_or(0)
    }

    /// Returns the formatted summary string, or `None` if nothing happened.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames_presented == 0 && self.frames_dropped == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames_presented;
        let mut lines = vec![
            format!(
                "Pipeline summary ({frames} frames presented, {} dropped, {:.1}s total):",
                self.frames_dropped,
                elapsed_ms / 1000.0
            ),
            format!(
                "  faces in {} frames, {} placements applied, {} overlays cleared, \
                 {} surface changes",
                self.frames_with_faces,
                self.placements_applied,
                self.overlays_cleared,
                self.surface_transitions
            ),
        ];
        if self.sink_failures > 0 {
            lines.push(format!("  sink failures: {}", self.sink_failures));
        }

        let mut issue_names: Vec<_> = self.issues.keys().collect();
        issue_names.sort();
        for name in issue_names {
            lines.push(format!("  {name}: {} frames", self.issues[name]));
        }

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let timing = &self.timings[stage];
            lines.push(format!(
                "  {stage:12}: avg {:6.1}ms  total {:7.0}ms",
                timing.average_ms(),
                timing.total_ms
            ));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn stage_timing(&self, stage: &str) -> Option<StageTiming> {
        self.timings.get(stage).copied()
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn frame_presented(&mut self, update: &FrameUpdate, report: &PresentReport) {
        self.frames_presented += 1;
        if update.has_faces() {
            self.frames_with_faces += 1;
        }
        if let Some(issue) = update.issue {
            *self.issues.entry(issue.name()).or_default() += 1;
        }
        self.placements_applied += report.applied;
        self.overlays_cleared += report.cleared;
        self.sink_failures += report.sink_failures;
        if let Some(transition) = report.transition {
            self.surface_transitions += 1;
            log::info!("Frame {}: surface {transition:?}", update.frame_index);
        }
        if self.frames_presented % self.throttle_frames == 0 {
            log::info!(
                "Presented {} frames ({} dropped)",
                self.frames_presented,
                self.frames_dropped
            );
        }
    }

    fn frames_dropped(&mut self, count: usize) {
        self.frames_dropped += count;
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        let timing = self.timings.entry(stage.to_string()).or_default();
        timing.count += 1;
        timing.total_ms += duration_ms;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
