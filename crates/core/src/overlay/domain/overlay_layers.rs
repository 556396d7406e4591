use serde::{Deserialize, Serialize};

use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::overlay::domain::overlay_placement::OverlayPlacement;

/// What happens to an overlay whose landmarks were missing this frame
/// while a face was still detected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePlacementPolicy {
    /// Keep the last placement on screen (partial occlusion).
    #[default]
    Retain,
    /// Clear every overlay before applying the frame's placements.
    Clear,
}

/// Last applied placement per overlay kind, owned by the rendering thread.
#[derive(Debug, Default)]
pub struct OverlayLayers {
    nose: Option<OverlayPlacement>,
    left_ear: Option<OverlayPlacement>,
    right_ear: Option<OverlayPlacement>,
}

impl OverlayLayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: OverlayKind) -> Option<&OverlayPlacement> {
        self.slot(kind).as_ref()
    }

    pub fn set(&mut self, placement: OverlayPlacement) {
        *self.slot_mut(placement.kind) = Some(placement);
    }

    /// Forgets the placement, returning whether one was showing.
    pub fn clear(&mut self, kind: OverlayKind) -> bool {
        self.slot_mut(kind).take().is_some()
    }

    /// Kinds that currently hold a placement.
    pub fn occupied(&self) -> Vec<OverlayKind> {
        OverlayKind::ALL
            .into_iter()
            .filter(|k| self.get(*k).is_some())
            .collect()
    }

    fn slot(&self, kind: OverlayKind) -> &Option<OverlayPlacement> {
        match kind {
            OverlayKind::Nose => &self.nose,
            OverlayKind::LeftEar => &self.left_ear,
            OverlayKind::RightEar => &self.right_ear,
        }
    }

    fn slot_mut(&mut self, kind: OverlayKind) -> &mut Option<OverlayPlacement> {
        match kind {
            OverlayKind::Nose => &mut self.nose,
            OverlayKind::LeftEar => &mut self.left_ear,
            OverlayKind::RightEar => &mut self.right_ear,
        }
    }
}
