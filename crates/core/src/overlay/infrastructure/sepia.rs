/// Classic sepia matrix rows for R, G and B output channels.
const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Blends RGBA8 pixels toward their sepia-toned colour in place.
///
/// `intensity` 0.0 leaves the image untouched, 1.0 is full sepia.
/// Alpha is preserved.
pub fn apply_sepia(rgba: &mut [u8], intensity: f32) {
    let t = intensity.clamp(0.0, 1.0);
    if t == 0.0 {
        return;
    }
    for px in rgba.chunks_exact_mut(4) {
        let src = [px[0] as f32, px[1] as f32, px[2] as f32];
        for (c, row) in SEPIA.iter().enumerate() {
            let toned = (row[0] * src[0] + row[1] * src[1] + row[2] * src[2]).min(255.0);
            let blended = src[c] + (toned - src[c]) * t;
            px[c] = blended.round().clamp(0.0, 255.0) as u8;
        }
    }
}
