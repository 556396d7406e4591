use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use faceoverlay_core::detection::infrastructure::detection_trace::DetectionTrace;
use faceoverlay_core::detection::infrastructure::replay_face_detector::ReplayFaceDetector;
use faceoverlay_core::overlay::domain::overlay_layers::StalePlacementPolicy;
use faceoverlay_core::overlay::domain::overlay_sink::OverlaySink;
use faceoverlay_core::overlay::domain::placement_engine::PlacementEngine;
use faceoverlay_core::overlay::infrastructure::image_asset_source::ImageAssetSource;
use faceoverlay_core::overlay::infrastructure::json_lines_overlay_sink::JsonLinesOverlaySink;
use faceoverlay_core::overlay::infrastructure::logging_overlay_sink::LoggingOverlaySink;
use faceoverlay_core::pipeline::frame_processor::FrameProcessor;
use faceoverlay_core::pipeline::infrastructure::sequential_pipeline_executor::SequentialPipelineExecutor;
use faceoverlay_core::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
use faceoverlay_core::pipeline::overlay_presenter::OverlayPresenter;
use faceoverlay_core::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor};
use faceoverlay_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use faceoverlay_core::shared::geometry::ViewportSize;
use faceoverlay_core::shared::overlay_config::OverlayConfig;
use faceoverlay_core::video::domain::frame_source::FrameSource;
use faceoverlay_core::video::infrastructure::blank_frame_source::BlankFrameSource;
use faceoverlay_core::video::infrastructure::image_sequence_reader::ImageSequenceReader;

/// Replays recorded face detections and emits nose and ear overlay commands.
#[derive(Parser)]
#[command(name = "faceoverlay")]
struct Cli {
    /// Detection trace (JSON) to replay.
    trace: PathBuf,

    /// Config file (defaults to the per-user config if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport size as WIDTHxHEIGHT, e.g. 375x812.
    #[arg(long)]
    viewport: Option<String>,

    /// Directory holding nose.png, left_ear.png and right_ear.png.
    /// Not allowed together with --output.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Directory of frame images to feed the pipeline instead of blank frames.
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Run reading and detection on worker threads, dropping frames that
    /// fall behind.
    #[arg(long)]
    live: bool,

    /// Write overlay commands as JSON lines to this file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// What to do with overlays whose landmarks are missing: retain or clear.
    #[arg(long)]
    stale_policy: Option<String>,

    /// Sepia intensity applied to overlay assets (0.0-1.0).
    #[arg(long)]
    sepia: Option<f32>,

    /// Print the resolved config as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = resolve_config(&cli)?;
    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let trace = DetectionTrace::load(&cli.trace)?;
    let viewport = config.viewport.or(trace.viewport);
    if viewport.is_none() {
        log::warn!("No viewport given; faces will be detected but not placed");
    }

    let source = open_source(cli.frames.as_deref(), trace.frame_count())?;
    let processor = FrameProcessor::new(
        Box::new(ReplayFaceDetector::new(trace)),
        PlacementEngine::new(config.tuning.clone()),
    )
    .with_viewport(viewport);

    let sink = build_sink(&cli, &config)?;
    let mut presenter = OverlayPresenter::new(sink, config.stale_policy);
    let mut logger = StdoutPipelineLogger::default();

    let executor: Box<dyn PipelineExecutor> = if cli.live {
        Box::new(ThreadedPipelineExecutor::new())
    } else {
        Box::new(SequentialPipelineExecutor::new())
    };
    executor.execute(
        source,
        processor,
        &mut presenter,
        &mut logger,
        PipelineConfig::default(),
    )?;
    logger.summary();

    if let Some(output) = &cli.output {
        log::info!("Commands written to {}", output.display());
    }
    Ok(())
}

/// Config file values, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<OverlayConfig, Box<dyn std::error::Error>> {
    let mut config = OverlayConfig::resolve(cli.config.as_deref())?;
    if let Some(viewport) = &cli.viewport {
        config.viewport = Some(parse_viewport(viewport)?);
    }
    if let Some(policy) = &cli.stale_policy {
        config.stale_policy = parse_stale_policy(policy)?;
    }
    if let Some(sepia) = cli.sepia {
        config.sepia_intensity = sepia;
    }
    config.validate()?;
    Ok(config)
}

fn open_source(
    frames_dir: Option<&Path>,
    trace_frames: usize,
) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    match frames_dir {
        Some(dir) => {
            let reader = ImageSequenceReader::open(dir)?;
            if reader.len_hint() != Some(trace_frames) {
                log::warn!(
                    "{} has {:?} frames but the trace covers {trace_frames}",
                    dir.display(),
                    reader.len_hint()
                );
            }
            Ok(Box::new(reader))
        }
        None => Ok(Box::new(BlankFrameSource::new(trace_frames))),
    }
}

fn build_sink(
    cli: &Cli,
    config: &OverlayConfig,
) -> Result<Box<dyn OverlaySink>, Box<dyn std::error::Error>> {
    if let Some(output) = &cli.output {
        let file = File::create(output)?;
        return Ok(Box::new(JsonLinesOverlaySink::new(BufWriter::new(file))));
    }
    match &cli.assets {
        Some(dir) => {
            let assets = ImageAssetSource::load(dir, config.sepia_intensity)?;
            log::info!("Loaded overlay assets from {}", dir.display());
            Ok(Box::new(LoggingOverlaySink::with_assets(Box::new(assets))))
        }
        None => Ok(Box::new(LoggingOverlaySink::new())),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.trace.exists() {
        return Err(format!("Trace file not found: {}", cli.trace.display()).into());
    }
    if let Some(dir) = &cli.frames {
        if !dir.is_dir() {
            return Err(format!("Frames directory not found: {}", dir.display()).into());
        }
    }
    if let Some(dir) = &cli.assets {
        if cli.output.is_some() {
            return Err("--assets has no effect with --output; pass only one".into());
        }
        if !dir.is_dir() {
            return Err(format!("Assets directory not found: {}", dir.display()).into());
        }
    }
    if let Some(viewport) = &cli.viewport {
        parse_viewport(viewport)?;
    }
    if let Some(policy) = &cli.stale_policy {
        parse_stale_policy(policy)?;
    }
    if let Some(sepia) = cli.sepia {
        if !(0.0..=1.0).contains(&sepia) {
            return Err(format!("Sepia must be between 0.0 and 1.0, got {sepia}").into());
        }
    }
    Ok(())
}

fn parse_viewport(value: &str) -> Result<ViewportSize, Box<dyn std::error::Error>> {
    let invalid = || format!("Viewport must look like 375x812, got '{value}'");
    let (w, h) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: f64 = w.trim().parse().map_err(|_| invalid())?;
    let height: f64 = h.trim().parse().map_err(|_| invalid())?;
    let viewport = ViewportSize::new(width, height);
    if viewport.is_empty() {
        return Err(format!("Viewport must be positive, got '{value}'").into());
    }
    Ok(viewport)
}

fn parse_stale_policy(value: &str) -> Result<StalePlacementPolicy, Box<dyn std::error::Error>> {
    match value {
        "retain" => Ok(StalePlacementPolicy::Retain),
        "clear" => Ok(StalePlacementPolicy::Clear),
        other => Err(format!("Stale policy must be 'retain' or 'clear', got '{other}'").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("375x812", 375.0, 812.0)]
    #[case("1920X1080", 1920.0, 1080.0)]
    #[case(" 10.5 x 20 ", 10.5, 20.0)]
    fn test_parse_viewport(#[case] input: &str, #[case] w: f64, #[case] h: f64) {
        let v = parse_viewport(input).unwrap();
        assert_relative_eq!(v.width, w);
        assert_relative_eq!(v.height, h);
    }

    #[rstest]
    #[case("375")]
    #[case("axb")]
    #[case("0x812")]
    #[case("-5x10")]
    fn test_parse_viewport_rejects(#[case] input: &str) {
        assert!(parse_viewport(input).is_err());
    }

    #[test]
    fn test_parse_stale_policy() {
        assert_eq!(
            parse_stale_policy("clear").unwrap(),
            StalePlacementPolicy::Clear
        );
        assert_eq!(
            parse_stale_policy("retain").unwrap(),
            StalePlacementPolicy::Retain
        );
        assert!(parse_stale_policy("keep").is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(
            &config_path,
            r#"{ "stale_policy": "clear", "viewport": { "width": 100.0, "height": 200.0 } }"#,
        )
        .unwrap();
        let cli = Cli::parse_from([
            "faceoverlay",
            "trace.json",
            "--config",
            config_path.to_str().unwrap(),
            "--viewport",
            "375x812",
            "--sepia",
            "0.5",
        ]);

        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.viewport, Some(ViewportSize::new(375.0, 812.0)));
        assert_eq!(config.stale_policy, StalePlacementPolicy::Clear);
        assert_relative_eq!(config.sepia_intensity, 0.5);
    }

    #[test]
    fn test_validate_rejects_assets_with_output() {
        let dir = tempfile::tempdir().unwrap();
        let trace = dir.path().join("trace.json");
        std::fs::write(&trace, r#"{ "frames": [] }"#).unwrap();
        let base = ["faceoverlay", trace.to_str().unwrap()];
        let assets = dir.path().to_str().unwrap();
        let output = dir.path().join("commands.jsonl");

        let both = Cli::parse_from(
            base.into_iter()
                .chain(["--assets", assets, "--output", output.to_str().unwrap()]),
        );
        let err = validate(&both).unwrap_err();
        assert!(err.to_string().contains("--assets"));

        let assets_only = Cli::parse_from(base.into_iter().chain(["--assets", assets]));
        assert!(validate(&assets_only).is_ok());

        let output_only =
            Cli::parse_from(base.into_iter().chain(["--output", output.to_str().unwrap()]));
        assert!(validate(&output_only).is_ok());
    }
}
