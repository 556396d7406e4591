use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// Reads a directory of still images as a frame sequence.
///
/// Files are ordered by name, so zero-padded names (`frame_0001.png`)
/// give capture order. Each file is decoded lazily to RGB.
pub struct ImageSequenceReader {
    paths: Vec<PathBuf>,
}

impl ImageSequenceReader {
    pub fn open(dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image(p))
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(format!("No image files found in {}", dir.display()).into());
        }
        log::info!("Found {} frames in {}", paths.len(), dir.display());
        Ok(Self { paths })
    }
}

impl FrameSource for ImageSequenceReader {
    fn len_hint(&self) -> Option<usize> {
        Some(self.paths.len())
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        Box::new(
            self.paths
                .iter()
                .enumerate()
                .map(|(index, path)| decode(path, index)),
        )
    }
}

fn decode(path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    Ok(Frame::new(img.into_raw(), width, height, 3, index))
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
