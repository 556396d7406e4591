use crate::overlay::domain::asset_source::AssetSource;
use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::overlay::domain::overlay_placement::OverlayPlacement;
use crate::overlay::domain::overlay_sink::OverlaySink;

/// Stand-in renderer that reports each command through the `log` facade.
///
/// When given an asset source it resolves the graphic for every placement
/// the way a compositing renderer would, and fails if one is missing.
pub struct LoggingOverlaySink {
    assets: Option<Box<dyn AssetSource>>,
}

impl LoggingOverlaySink {
    pub fn new() -> Self {
        Self { assets: None }
    }

    pub fn with_assets(assets: Box<dyn AssetSource>) -> Self {
        Self {
            assets: Some(assets),
        }
    }
}

impl Default for LoggingOverlaySink {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySink for LoggingOverlaySink {
    fn attach_surface(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("Face found, attaching overlay surface");
        Ok(())
    }

    fn detach_surface(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("Face lost, detaching overlay surface");
        Ok(())
    }

    fn clear_overlay(&mut self, kind: OverlayKind) -> Result<(), Box<dyn std::error::Error>> {
        log::debug!("Clearing {kind} overlay");
        Ok(())
    }

    fn apply_placement(
        &mut self,
        placement: &OverlayPlacement,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let kind = placement.kind;
        let asset_desc = match &self.assets {
            Some(assets) => {
                let asset = assets
                    .asset(kind)
                    .ok_or_else(|| format!("No asset loaded for {kind} overlay"))?;
                format!(" ({}x{} asset)", asset.width, asset.height)
            }
            None => String::new(),
        };
        log::info!(
            "Placing {kind}{asset_desc} at ({:.1}, {:.1}) scale {:.3}",
            placement.position.x,
            placement.position.y,
            placement.scale
        );
        Ok(())
    }
}
