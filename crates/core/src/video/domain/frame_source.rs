use crate::shared::frame::Frame;

/// Produces frames in capture order.
///
/// Implementations handle where frames come from (camera, image files,
/// recorded traces) while the pipeline only sees indexed [`Frame`]s.
pub trait FrameSource: Send {
    /// Hint for progress reporting; `None` for open-ended streams.
    fn len_hint(&self) -> Option<usize> {
        None
    }

    /// Iterates frames in capture order. A failed read yields an `Err`
    /// item; later frames may still succeed.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;
}
