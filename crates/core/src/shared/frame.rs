/// A single video frame: contiguous pixel bytes in row-major order.
///
/// The overlay pipeline never inspects pixels itself; they are handed to
/// the detector untouched. `index` is the capture order and is what keeps
/// overlay updates from being applied out of order downstream.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Zero-sized placeholder, for detectors that key purely on `index`.
    pub fn blank(index: usize) -> Self {
        Self::new(Vec::new(), 0, 0, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_blank(&self) -> bool {
        self.data.is_empty()
    }
}
