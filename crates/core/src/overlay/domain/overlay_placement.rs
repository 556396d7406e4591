use serde::{Deserialize, Serialize};

use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::shared::geometry::ScreenPoint;

/// Axis flips the renderer applies on top of the scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mirror {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Mirror {
    pub const BOTH: Mirror = Mirror {
        horizontal: true,
        vertical: true,
    };
}

/// Where and how one overlay is drawn for one frame.
///
/// `scale` is uniform and signed: a negative value flips the asset about
/// its anchor, matching the flipped geometry of the overlay surface.
/// Placements are recomputed every frame and never updated in place.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayPlacement {
    pub kind: OverlayKind,
    pub position: ScreenPoint,
    pub scale: f64,
    pub mirror: Mirror,
}
