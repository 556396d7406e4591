use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// Emits `count` zero-sized frames indexed `0..count`.
///
/// Pairs with detectors that only look at the frame index, such as
/// trace replay.
pub struct BlankFrameSource {
    count: usize,
}

impl BlankFrameSource {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl FrameSource for BlankFrameSource {
    fn len_hint(&self) -> Option<usize> {
        Some(self.count)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        Box::new((0..self.count).map(|i| Ok(Frame::blank(i))))
    }
}
