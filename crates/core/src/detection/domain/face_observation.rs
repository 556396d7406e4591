use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::shared::geometry::{NormalizedPoint, NormalizedRect};

/// Opaque token a detector hands out with each face so landmark
/// detection can be requested for that specific face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectionHandle(pub u64);

/// One face found in one frame. Discarded when the frame is done.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceDetection {
    pub bounding_box: NormalizedRect,
    pub handle: DetectionHandle,
}

/// Named landmark clusters a detector may report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LandmarkRegion {
    FaceContour,
    LeftEye,
    RightEye,
    LeftEyebrow,
    RightEyebrow,
    Nose,
    NoseCrest,
    MedianLine,
    OuterLips,
    InnerLips,
    LeftPupil,
    RightPupil,
}

/// Ordered points outlining one facial feature.
///
/// Order is whatever the detector produced; placement heuristics index
/// into it (first, last, middle), so it is never re-sorted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkGroup {
    points: Vec<NormalizedPoint>,
}

impl LandmarkGroup {
    pub fn new(points: Vec<NormalizedPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }
}

impl From<Vec<(f64, f64)>> for LandmarkGroup {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(NormalizedPoint::from).collect())
    }
}

/// Landmark detection result for one face.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceObservation {
    pub bounding_box: NormalizedRect,
    landmarks: HashMap<LandmarkRegion, LandmarkGroup>,
}

impl FaceObservation {
    pub fn new(bounding_box: NormalizedRect) -> Self {
        Self {
            bounding_box,
            landmarks: HashMap::new(),
        }
    }

    pub fn with_group(mut self, region: LandmarkRegion, group: impl Into<LandmarkGroup>) -> Self {
        self.landmarks.insert(region, group.into());
        self
    }

    /// Points for `region`; empty when the detector did not report it.
    pub fn points(&self, region: LandmarkRegion) -> &[NormalizedPoint] {
        self.landmarks
            .get(&region)
            .map(LandmarkGroup::points)
            .unwrap_or(&[])
    }

    pub fn regions(&self) -> impl Iterator<Item = LandmarkRegion> + '_ {
        self.landmarks.keys().copied()
    }
}
