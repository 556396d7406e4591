//! Point and rectangle types for the two coordinate spaces the pipeline
//! works in: detector-normalized `[0, 1]` space and absolute viewport space.

use serde::{Deserialize, Serialize};

/// A landmark point relative to its face bounding box, nominally in `[0, 1]`.
///
/// Serialized as a two-element array `[x, y]` to keep traces compact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for NormalizedPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<NormalizedPoint> for (f64, f64) {
    fn from(p: NormalizedPoint) -> Self {
        (p.x, p.y)
    }
}

/// An absolute position in viewport units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A zero or negative extent means layout has not happened yet.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Size of the view the overlays are drawn into.
pub type ViewportSize = Size;

/// Face bounding box as reported by the detector, relative to the frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Scales origin and extent into viewport units.
    pub fn scaled_to(&self, viewport: ViewportSize) -> Rect {
        Rect {
            x: self.x * viewport.width,
            y: self.y * viewport.height,
            width: self.width * viewport.width,
            height: self.height * viewport.height,
        }
    }
}

/// Axis-aligned rectangle in viewport units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Boundary-inclusive containment.
    pub fn contains(&self, p: ScreenPoint) -> bool {
        p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_scaled_to_multiplies_origin_and_extent() {
        let r = NormalizedRect::new(0.25, 0.5, 0.5, 0.25).scaled_to(Size::new(400.0, 800.0));
        assert_relative_eq!(r.x, 100.0);
        assert_relative_eq!(r.y, 400.0);
        assert_relative_eq!(r.width, 200.0);
        assert_relative_eq!(r.height, 200.0);
    }

    #[rstest]
    #[case::zero_width(Size::new(0.0, 100.0), true)]
    #[case::zero_height(Size::new(100.0, 0.0), true)]
    #[case::negative(Size::new(-1.0, 100.0), true)]
    #[case::laid_out(Size::new(375.0, 812.0), false)]
    fn test_size_is_empty(#[case] size: Size, #[case] expected: bool) {
        assert_eq!(size.is_empty(), expected);
    }

    #[rstest]
    #[case::inside(ScreenPoint::new(15.0, 25.0), true)]
    #[case::top_left_corner(ScreenPoint::new(10.0, 20.0), true)]
    #[case::bottom_right_corner(ScreenPoint::new(40.0, 60.0), true)]
    #[case::left_of(ScreenPoint::new(9.9, 25.0), false)]
    #[case::below(ScreenPoint::new(15.0, 60.1), false)]
    fn test_rect_contains_is_inclusive(#[case] p: ScreenPoint, #[case] expected: bool) {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.contains(p), expected);
    }

    #[test]
    fn test_normalized_point_serializes_as_pair() {
        let json = serde_json::to_string(&NormalizedPoint::new(0.5, 0.25)).unwrap();
        assert_eq!(json, "[0.5,0.25]");
        let back: NormalizedPoint = serde_json::from_str("[0.1,0.9]").unwrap();
        assert_eq!(back, NormalizedPoint::new(0.1, 0.9));
    }

    #[test]
    fn test_offset() {
        let p = ScreenPoint::new(1.0, 2.0).offset(-10.0, 5.0);
        assert_eq!(p, ScreenPoint::new(-9.0, 7.0));
    }
}
