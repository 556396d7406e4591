use crate::shared::geometry::{NormalizedPoint, Rect, ScreenPoint};

/// Maps face-relative landmark points into viewport space.
///
/// `face_box` must already be in viewport units (see
/// [`NormalizedRect::scaled_to`](crate::shared::geometry::NormalizedRect::scaled_to)).
/// No clamping: noisy detections may land outside the viewport and the
/// renderer is expected to clip.
pub fn map(points: &[NormalizedPoint], face_box: &Rect) -> Vec<ScreenPoint> {
    points
        .iter()
        .map(|p| ScreenPoint {
            x: p.x * face_box.width + face_box.x,
            y: p.y * face_box.height + face_box.y,
        })
        .collect()
}
