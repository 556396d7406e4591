use crate::overlay::domain::overlay_kind::OverlayKind;

/// A decoded overlay graphic: RGBA8 pixels in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayAsset {
    pub kind: OverlayKind,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Resolves an overlay kind to the graphic drawn for it.
pub trait AssetSource: Send {
    fn asset(&self, kind: OverlayKind) -> Option<&OverlayAsset>;
}
