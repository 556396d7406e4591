use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::overlay::domain::asset_source::{AssetSource, OverlayAsset};
use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::overlay::infrastructure::sepia::apply_sepia;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("overlay asset not found: {0}")]
    Missing(PathBuf),
    #[error("failed to decode overlay asset {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Loads `nose.png`, `left_ear.png` and `right_ear.png` from a directory,
/// sepia-toning each one up front so rendering never touches pixels.
pub struct ImageAssetSource {
    assets: HashMap<OverlayKind, OverlayAsset>,
}

impl ImageAssetSource {
    pub fn load(dir: &Path, sepia_intensity: f32) -> Result<Self, AssetError> {
        let mut assets = HashMap::new();
        for kind in OverlayKind::ALL {
            let path = dir.join(format!("{}.png", kind.asset_name()));
            let asset = load_asset(&path, kind, sepia_intensity)?;
            log::debug!(
                "Loaded {kind} asset {}x{} from {}",
                asset.width,
                asset.height,
                path.display()
            );
            assets.insert(kind, asset);
        }
        Ok(Self { assets })
    }
}

impl AssetSource for ImageAssetSource {
    fn asset(&self, kind: OverlayKind) -> Option<&OverlayAsset> {
        self.assets.get(&kind)
    }
}

fn load_asset(path: &Path, kind: OverlayKind, sepia: f32) -> Result<OverlayAsset, AssetError> {
    if !path.exists() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    let img = image::open(path)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let mut rgba = img.into_raw();
    apply_sepia(&mut rgba, sepia);
    Ok(OverlayAsset {
        kind,
        width,
        height,
        rgba,
    })
}
