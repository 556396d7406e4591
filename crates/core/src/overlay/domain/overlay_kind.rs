use serde::{Deserialize, Serialize};

use crate::detection::domain::face_observation::LandmarkRegion;

/// The overlay graphics the pipeline knows how to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Nose,
    LeftEar,
    RightEar,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 3] = [
        OverlayKind::Nose,
        OverlayKind::LeftEar,
        OverlayKind::RightEar,
    ];

    /// Landmark region that drives this overlay.
    ///
    /// Ears are crossed: the left ear follows the right eyebrow and the
    /// right ear follows the left eyebrow. The front camera image is
    /// mirrored, so this keeps each ear on the side the viewer expects.
    pub fn landmark_region(self) -> LandmarkRegion {
        match self {
            OverlayKind::Nose => LandmarkRegion::MedianLine,
            OverlayKind::LeftEar => LandmarkRegion::RightEyebrow,
            OverlayKind::RightEar => LandmarkRegion::LeftEyebrow,
        }
    }

    /// File stem of the asset graphic for this overlay.
    pub fn asset_name(self) -> &'static str {
        match self {
            OverlayKind::Nose => "nose",
            OverlayKind::LeftEar => "left_ear",
            OverlayKind::RightEar => "right_ear",
        }
    }
}

impl std::fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayKind::Nose => write!(f, "nose"),
            OverlayKind::LeftEar => write!(f, "left ear"),
            OverlayKind::RightEar => write!(f, "right ear"),
        }
    }
}
