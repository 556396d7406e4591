//! Per-overlay placement heuristics.
//!
//! Each overlay is pinned to one landmark of its mapped point sequence,
//! nudged by a fixed horizontal offset plus a fraction of the face height,
//! and scaled by face width over a reference width. The reference values
//! are empirically tuned against the stock overlay graphics and live in
//! [`PlacementTuning`] so they can be adjusted without touching code.

use serde::{Deserialize, Serialize};

use crate::overlay::domain::overlay_kind::OverlayKind;
use crate::overlay::domain::overlay_placement::{Mirror, OverlayPlacement};
use crate::shared::constants::{
    EAR_HEIGHT_DIVISOR, EAR_OFFSET_X, LEFT_EAR_WIDTH_DIVISOR, NOSE_HEIGHT_DIVISOR,
    NOSE_WIDTH_DIVISOR, RIGHT_EAR_WIDTH_DIVISOR,
};
use crate::shared::geometry::{ScreenPoint, Size};

/// Which element of the mapped landmark sequence anchors an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPoint {
    First,
    /// Element at `len / 2` (integer division).
    Middle,
    Last,
}

impl AnchorPoint {
    pub fn index(self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match self {
            AnchorPoint::First => 0,
            AnchorPoint::Middle => len / 2,
            AnchorPoint::Last => len - 1,
        })
    }
}

/// Tunables for a single overlay kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayTuning {
    pub anchor: AnchorPoint,
    /// Added to the anchor's x, in viewport units.
    pub offset_x: f64,
    /// Anchor's y is pushed down by `face_height / height_divisor`.
    pub height_divisor: f64,
    /// Face width at which the overlay renders at unit scale.
    pub width_divisor: f64,
}

/// Tuning table keyed by overlay kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementTuning {
    pub nose: OverlayTuning,
    pub left_ear: OverlayTuning,
    pub right_ear: OverlayTuning,
}

impl Default for PlacementTuning {
    fn default() -> Self {
        Self {
            nose: OverlayTuning {
                anchor: AnchorPoint::Middle,
                offset_x: 0.0,
                height_divisor: NOSE_HEIGHT_DIVISOR,
                width_divisor: NOSE_WIDTH_DIVISOR,
            },
            left_ear: OverlayTuning {
                anchor: AnchorPoint::Last,
                offset_x: EAR_OFFSET_X,
                height_divisor: EAR_HEIGHT_DIVISOR,
                width_divisor: LEFT_EAR_WIDTH_DIVISOR,
            },
            right_ear: OverlayTuning {
                anchor: AnchorPoint::First,
                offset_x: -EAR_OFFSET_X,
                height_divisor: EAR_HEIGHT_DIVISOR,
                width_divisor: RIGHT_EAR_WIDTH_DIVISOR,
            },
        }
    }
}

impl PlacementTuning {
    pub fn for_kind(&self, kind: OverlayKind) -> &OverlayTuning {
        match kind {
            OverlayKind::Nose => &self.nose,
            OverlayKind::LeftEar => &self.left_ear,
            OverlayKind::RightEar => &self.right_ear,
        }
    }

    /// Rejects divisors that would produce infinite or NaN placements.
    pub fn validate(&self) -> Result<(), String> {
        for kind in OverlayKind::ALL {
            let t = self.for_kind(kind);
            if !(t.height_divisor.is_finite() && t.height_divisor != 0.0) {
                return Err(format!(
                    "{kind} height divisor must be finite and non-zero, got {}",
                    t.height_divisor
                ));
            }
            if !(t.width_divisor.is_finite() && t.width_divisor != 0.0) {
                return Err(format!(
                    "{kind} width divisor must be finite and non-zero, got {}",
                    t.width_divisor
                ));
            }
            if !t.offset_x.is_finite() {
                return Err(format!("{kind} offset must be finite, got {}", t.offset_x));
            }
        }
        Ok(())
    }
}

/// Computes overlay placements from mapped landmark points.
#[derive(Clone, Debug, Default)]
pub struct PlacementEngine {
    tuning: PlacementTuning,
}

impl PlacementEngine {
    pub fn new(tuning: PlacementTuning) -> Self {
        Self { tuning }
    }

    /// Returns `None` when `points` is empty; the caller skips this kind
    /// for the frame.
    pub fn place(
        &self,
        kind: OverlayKind,
        points: &[ScreenPoint],
        face_size: Size,
    ) -> Option<OverlayPlacement> {
        let t = self.tuning.for_kind(kind);
        let anchor = points[t.anchor.index(points.len())?];

        Some(OverlayPlacement {
            kind,
            position: anchor.offset(t.offset_x, face_size.height / t.height_divisor),
            scale: -(face_size.width / t.width_divisor),
            mirror: Mirror::BOTH,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn line(len: usize) -> Vec<ScreenPoint> {
        (0..len)
            .map(|i| ScreenPoint::new(i as f64 * 10.0, 100.0 + i as f64))
            .collect()
    }

    #[rstest]
    #[case::odd(7, 3)]
    #[case::even(8, 4)]
    #[case::single(1, 0)]
    #[case::pair(2, 1)]
    fn test_nose_anchor_is_middle_by_integer_division(#[case] len: usize, #[case] idx: usize) {
        let engine = PlacementEngine::default();
        let pts = line(len);
        let p = engine
            .place(OverlayKind::Nose, &pts, Size::new(400.0, 100.0))
            .unwrap();
        assert_relative_eq!(p.position.x, pts[idx].x);
        // height 100 / 10 = 10
        assert_relative_eq!(p.position.y, pts[idx].y + 10.0);
    }

    #[test]
    fn test_nose_scale_pinned() {
        let engine = PlacementEngine::default();
        let p = engine
            .place(OverlayKind::Nose, &line(3), Size::new(400.0, 100.0))
            .unwrap();
        assert_eq!(p.scale, -1.0);
        assert_eq!(p.mirror, Mirror::BOTH);
    }

    #[test]
    fn test_left_ear_uses_last_point() {
        let engine = PlacementEngine::default();
        let pts = line(5);
        let p = engine
            .place(OverlayKind::LeftEar, &pts, Size::new(350.0, 120.0))
            .unwrap();
        assert_relative_eq!(p.position.x, pts[4].x + 10.0);
        assert_relative_eq!(p.position.y, pts[4].y + 60.0);
        assert_eq!(p.scale, -1.0);
    }

    #[test]
    fn test_right_ear_uses_first_point() {
        let engine = PlacementEngine::default();
        let pts = line(5);
        let p = engine
            .place(OverlayKind::RightEar, &pts, Size::new(375.0, 120.0))
            .unwrap();
        assert_relative_eq!(p.position.x, pts[0].x - 10.0);
        assert_relative_eq!(p.position.y, pts[0].y + 60.0);
        assert_eq!(p.scale, -1.0);
    }

    #[rstest]
    #[case::nose(OverlayKind::Nose, 800.0, -2.0)]
    #[case::left_ear(OverlayKind::LeftEar, 175.0, -0.5)]
    #[case::right_ear(OverlayKind::RightEar, 750.0, -2.0)]
    fn test_scale_tracks_face_width(
        #[case] kind: OverlayKind,
        #[case] width: f64,
        #[case] expected: f64,
    ) {
        let engine = PlacementEngine::default();
        let p = engine.place(kind, &line(4), Size::new(width, 100.0)).unwrap();
        assert_relative_eq!(p.scale, expected);
    }

    #[rstest]
    #[case::nose(OverlayKind::Nose)]
    #[case::left_ear(OverlayKind::LeftEar)]
    #[case::right_ear(OverlayKind::RightEar)]
    fn test_empty_points_yield_no_placement(#[case] kind: OverlayKind) {
        let engine = PlacementEngine::default();
        assert!(engine.place(kind, &[], Size::new(400.0, 100.0)).is_none());
    }

    #[test]
    fn test_custom_tuning_is_honoured() {
        let mut tuning = PlacementTuning::default();
        tuning.nose.anchor = AnchorPoint::First;
        tuning.nose.width_divisor = 200.0;
        let engine = PlacementEngine::new(tuning);
        let pts = line(5);
        let p = engine
            .place(OverlayKind::Nose, &pts, Size::new(400.0, 100.0))
            .unwrap();
        assert_relative_eq!(p.position.x, pts[0].x);
        assert_relative_eq!(p.scale, -2.0);
    }

    #[test]
    fn test_default_tuning_values() {
        let t = PlacementTuning::default();
        assert_relative_eq!(t.nose.width_divisor, 400.0);
        assert_relative_eq!(t.nose.height_divisor, 10.0);
        assert_relative_eq!(t.left_ear.width_divisor, 350.0);
        assert_relative_eq!(t.left_ear.offset_x, 10.0);
        assert_relative_eq!(t.right_ear.width_divisor, 375.0);
        assert_relative_eq!(t.right_ear.offset_x, -10.0);
        assert_relative_eq!(t.left_ear.height_divisor, 2.0);
        assert_relative_eq!(t.right_ear.height_divisor, 2.0);
    }

    #[test]
    fn test_validate_rejects_zero_divisor() {
        let mut tuning = PlacementTuning::default();
        tuning.right_ear.width_divisor = 0.0;
        let err = tuning.validate().unwrap_err();
        assert!(err.contains("right ear"));
    }

    #[test]
    fn test_partial_tuning_json_fills_defaults() {
        let json = r#"{
            "nose": {
                "anchor": "last",
                "offset_x": 2.0,
                "height_divisor": 5.0,
                "width_divisor": 100.0
            }
        }"#;
        let tuning: PlacementTuning = serde_json::from_str(json).unwrap();
        assert_eq!(tuning.nose.anchor, AnchorPoint::Last);
        assert_eq!(tuning.left_ear, PlacementTuning::default().left_ear);
    }
}
