//! Recorded detector output, one entry per captured frame.
//!
//! ```json
//! {
//!   "viewport": { "width": 375.0, "height": 812.0 },
//!   "frames": [
//!     { "index": 0 },
//!     { "index": 1, "faces": [ {
//!         "bounding_box": { "x": 0.3, "y": 0.4, "width": 0.4, "height": 0.3 },
//!         "landmarks": { "medianLine": [[0.5, 0.2], [0.5, 0.5], [0.5, 0.8]] }
//!     } ] },
//!     { "index": 2, "unavailable": true }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::face_observation::{LandmarkGroup, LandmarkRegion};
use crate::shared::geometry::{NormalizedRect, ViewportSize};

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read detection trace: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid detection trace: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionTrace {
    /// Viewport the trace was recorded against, if known.
    #[serde(default)]
    pub viewport: Option<ViewportSize>,
    pub frames: Vec<TraceFrame>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub index: usize,
    /// Face detection failed outright for this frame.
    #[serde(default)]
    pub unavailable: bool,
    /// Faces were found but the landmark pass failed.
    #[serde(default)]
    pub landmarks_unavailable: bool,
    #[serde(default)]
    pub faces: Vec<TraceFace>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceFace {
    pub bounding_box: NormalizedRect,
    #[serde(default)]
    pub landmarks: HashMap<LandmarkRegion, LandmarkGroup>,
}

impl DetectionTrace {
    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of frames needed to cover every recorded index.
    pub fn frame_count(&self) -> usize {
        self.frames.iter().map(|f| f.index + 1).max().unwrap_or(0)
    }
}
