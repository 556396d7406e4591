pub mod image_asset_source;
pub mod json_lines_overlay_sink;
pub mod logging_overlay_sink;
pub mod recording_overlay_sink;
mod sepia;
