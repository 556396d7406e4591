use std::collections::HashMap;

use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::detection::domain::face_observation::{DetectionHandle, FaceDetection, FaceObservation};
use crate::detection::infrastructure::detection_trace::{DetectionTrace, TraceFrame};
use crate::shared::frame::Frame;

/// Replays recorded detector output by frame index.
///
/// Frames missing from the trace have no faces. Handles are the face's
/// position within its trace frame, so landmark requests resolve back to
/// the same recorded face.
pub struct ReplayFaceDetector {
    frames: HashMap<usize, TraceFrame>,
}

impl ReplayFaceDetector {
    pub fn new(trace: DetectionTrace) -> Self {
        Self {
            frames: trace.frames.into_iter().map(|f| (f.index, f)).collect(),
        }
    }
}

impl FaceDetector for ReplayFaceDetector {
    fn detect_faces(&mut self, frame: &Frame) -> Result<Vec<FaceDetection>, DetectionError> {
        let Some(recorded) = self.frames.get(&frame.index()) else {
            return Ok(Vec::new());
        };
        if recorded.unavailable {
            return Err(DetectionError::Unavailable(format!(
                "recorded failure at frame {}",
                frame.index()
            )));
        }
        Ok(recorded
            .faces
            .iter()
            .enumerate()
            .map(|(i, face)| FaceDetection {
                bounding_box: face.bounding_box,
                handle: DetectionHandle(i as u64),
            })
            .collect())
    }

    fn detect_landmarks(
        &mut self,
        frame: &Frame,
        faces: &[FaceDetection],
    ) -> Result<Vec<FaceObservation>, DetectionError> {
        let recorded = self
            .frames
            .get(&frame.index())
            .ok_or(DetectionError::UnknownFrame(frame.index()))?;
        if recorded.landmarks_unavailable {
            return Err(DetectionError::Landmarks(format!(
                "recorded failure at frame {}",
                frame.index()
            )));
        }

        Ok(faces
            .iter()
            .filter_map(|face| recorded.faces.get(face.handle.0 as usize))
            .map(|face| {
                face.landmarks.iter().fold(
                    FaceObservation::new(face.bounding_box),
                    |obs, (region, group)| obs.with_group(*region, group.clone()),
                )
            })
            .collect())
    }
}
