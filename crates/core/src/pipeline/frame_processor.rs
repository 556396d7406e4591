use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::face_observation::FaceObservation;
use crate::overlay::domain::coordinate_mapper;
use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::overlay::domain::overlay_placement::OverlayPlacement;
use crate::overlay::domain::placement_engine::PlacementEngine;
use crate::pipeline::frame_update::{FrameIssue, FrameUpdate};
use crate::shared::frame::Frame;
use crate::shared::geometry::ViewportSize;

/// Turns one frame into a [`FrameUpdate`]: detect faces, detect landmarks,
/// map each overlay's landmark region into the viewport and place it.
///
/// Holds no per-frame state, so it can live on a worker thread while the
/// presence tracker and sink stay on the rendering thread. Nothing in here
/// fails: every error degrades to an update with fewer (or no) placements.
pub struct FrameProcessor {
    detector: Box<dyn FaceDetector>,
    engine: PlacementEngine,
    viewport: Option<ViewportSize>,
}

impl FrameProcessor {
    pub fn new(detector: Box<dyn FaceDetector>, engine: PlacementEngine) -> Self {
        Self {
            detector,
            engine,
            viewport: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Option<ViewportSize>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = Some(viewport);
    }

    pub fn process(&mut self, frame: &Frame) -> FrameUpdate {
        let index = frame.index();

        let faces = match self.detector.detect_faces(frame) {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("Frame {index}: {e}; treating as no faces");
                return FrameUpdate::new(index, 0).with_issue(FrameIssue::DetectionUnavailable);
            }
        };

        let update = FrameUpdate::new(index, faces.len());
        if faces.is_empty() {
            return update;
        }

        let Some(viewport) = self.viewport.filter(|v| !v.is_empty()) else {
            log::debug!("Frame {index}: viewport not laid out yet, dropping placements");
            return update.with_issue(FrameIssue::ViewportUnavailable);
        };

        let observations = match self.detector.detect_landmarks(frame, &faces) {
            Ok(observations) => observations,
            Err(e) => {
                log::warn!("Frame {index}: {e}");
                return update.with_issue(FrameIssue::LandmarksUnavailable);
            }
        };

        let placements = observations
            .iter()
            .flat_map(|obs| self.place_face(obs, viewport, index))
            .collect();
        FrameUpdate {
            placements,
            ..update
        }
    }

    fn place_face(
        &self,
        obs: &FaceObservation,
        viewport: ViewportSize,
        index: usize,
    ) -> Vec<OverlayPlacement> {
        let face_box = obs.bounding_box.scaled_to(viewport);
        OverlayKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let points = coordinate_mapper::map(obs.points(kind.landmark_region()), &face_box);
                let placement = self.engine.place(kind, &points, face_box.size());
                if placement.is_none() {
                    log::debug!("Frame {index}: no landmarks for {kind}, skipping");
                }
                placement
            })
            .collect()
    }
}
