use crate::overlay::domain::overlay_placement::OverlayPlacement;

/// Why a frame with faces produced no placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameIssue {
    /// Face detection failed; the frame counts as having no faces.
    DetectionUnavailable,
    /// Faces were found but landmark detection failed.
    LandmarksUnavailable,
    /// Viewport size not known yet, so nothing can be mapped.
    ViewportUnavailable,
}

impl FrameIssue {
    pub fn name(self) -> &'static str {
        match self {
            FrameIssue::DetectionUnavailable => "detection_unavailable",
            FrameIssue::LandmarksUnavailable => "landmarks_unavailable",
            FrameIssue::ViewportUnavailable => "viewport_unavailable",
        }
    }
}

/// Result of processing one frame, sent from the detection worker to the
/// rendering thread.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameUpdate {
    pub frame_index: usize,
    pub face_count: usize,
    /// In detector face order, then nose / left ear / right ear per face.
    pub placements: Vec<OverlayPlacement>,
    pub issue: Option<FrameIssue>,
}

impl FrameUpdate {
    pub fn new(frame_index: usize, face_count: usize) -> Self {
        Self {
            frame_index,
            face_count,
            placements: Vec::new(),
            issue: None,
        }
    }

    pub fn with_issue(mut self, issue: FrameIssue) -> Self {
        self.issue = Some(issue);
        self
    }

    pub fn has_faces(&self) -> bool {
        self.face_count > 0
    }
}
