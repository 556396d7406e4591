/// Horizontal nudge applied to both ear anchors, in viewport units.
pub const EAR_OFFSET_X: f64 = 10.0;

/// Nose drops by a tenth of the face height below its median-line anchor.
pub const NOSE_HEIGHT_DIVISOR: f64 = 10.0;
/// Ears drop by half the face height below their eyebrow anchor.
pub const EAR_HEIGHT_DIVISOR: f64 = 2.0;

/// Face widths (viewport units) at which each overlay renders at unit scale.
pub const NOSE_WIDTH_DIVISOR: f64 = 400.0;
pub const LEFT_EAR_WIDTH_DIVISOR: f64 = 350.0;
pub const RIGHT_EAR_WIDTH_DIVISOR: f64 = 375.0;

/// Strength of the sepia tone baked into overlay assets.
pub const DEFAULT_SEPIA_INTENSITY: f32 = 0.8;

pub const CONFIG_DIR_NAME: &str = "FaceOverlay";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
