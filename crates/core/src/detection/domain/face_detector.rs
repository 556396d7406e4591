use thiserror::Error;

use crate::detection::domain::face_observation::{FaceDetection, FaceObservation};
use crate::shared::frame::Frame;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("face detector unavailable: {0}")]
    Unavailable(String),
    #[error("landmark detection failed: {0}")]
    Landmarks(String),
    #[error("no detection data for frame {0}")]
    UnknownFrame(usize),
}

/// Domain interface for the external face and landmark detector.
///
/// Implementations may be stateful (e.g. sequence request handlers that
/// track across frames), hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect_faces(&mut self, frame: &Frame) -> Result<Vec<FaceDetection>, DetectionError>;

    /// Landmarks for the given faces of `frame`, one observation per face
    /// the detector could resolve.
    fn detect_landmarks(
        &mut self,
        frame: &Frame,
        faces: &[FaceDetection],
    ) -> Result<Vec<FaceObservation>, DetectionError>;
}
