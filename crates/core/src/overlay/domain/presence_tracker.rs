/// Whether the overlay surface is currently attached to the view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresenceState {
    #[default]
    Hidden,
    Visible,
}

/// Signal emitted when the presence state flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceTransition {
    Attach,
    Detach,
}

/// Debounces overlay surface attach/detach against per-frame face counts.
///
/// Only a change between "some faces" and "no faces" produces a signal;
/// consecutive frames with the same outcome are silent.
#[derive(Debug, Default)]
pub struct PresenceTracker {
    state: PresenceState,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    pub fn observe(&mut self, face_count: usize) -> Option<SurfaceTransition> {
        match (self.state, face_count > 0) {
            (PresenceState::Hidden, true) => {
                self.state = PresenceState::Visible;
                Some(SurfaceTransition::Attach)
            }
            (PresenceState::Visible, false) => {
                self.state = PresenceState::Hidden;
                Some(SurfaceTransition::Detach)
            }
            _ => None,
        }
    }

    /// Undoes `transition` after the surface failed to carry it out, so the
    /// next frame signals it again.
    pub fn revert(&mut self, transition: SurfaceTransition) {
        self.state = match transition {
            SurfaceTransition::Attach => PresenceState::Hidden,
            SurfaceTransition::Detach => PresenceState::Visible,
        };
    }
}
