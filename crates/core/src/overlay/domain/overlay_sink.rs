use serde::{Deserialize, Serialize};

use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::overlay::domain::overlay_placement::OverlayPlacement;

/// Receives overlay updates on the rendering thread, in issue order.
///
/// The surface is the container all overlays draw into; detaching it hides
/// every overlay at once without forgetting their placements.
pub trait OverlaySink: Send {
    fn attach_surface(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    fn detach_surface(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    fn clear_overlay(&mut self, kind: OverlayKind) -> Result<(), Box<dyn std::error::Error>>;

    fn apply_placement(
        &mut self,
        placement: &OverlayPlacement,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// A sink call as data, for sinks that record or serialize what they receive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum OverlayCommand {
    AttachSurface,
    DetachSurface,
    Clear { kind: OverlayKind },
    Apply { placement: OverlayPlacement },
}

impl OverlayCommand {
    pub fn placement(&self) -> Option<&OverlayPlacement> {
        match self {
            OverlayCommand::Apply { placement } => Some(placement),
            _ => None,
        }
    }
}
