use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::shared::frame::Frame;

/// Producer half of a one-frame mailbox.
///
/// Holds a clone of the receiver so it can evict a frame nobody picked up
/// yet. The consumer therefore only ever sees the newest pending frame,
/// and the channel disconnects once this sender is dropped.
pub struct LatestFrameSender {
    tx: Sender<Frame>,
    evict: Receiver<Frame>,
}

/// Creates a slot holding at most one pending frame.
pub fn latest_frame_slot() -> (LatestFrameSender, Receiver<Frame>) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let evict = rx.clone();
    (LatestFrameSender { tx, evict }, rx)
}

impl LatestFrameSender {
    /// Publishes `frame`, replacing any frame still waiting.
    ///
    /// Returns how many pending frames were evicted. The consumer may take
    /// the pending frame between a full send and the eviction, in which
    /// case nothing is counted and the send is retried.
    pub fn publish(&self, frame: Frame) -> usize {
        let mut dropped = 0;
        let mut frame = frame;
        loop {
            match self.tx.try_send(frame) {
                Ok(()) => return dropped,
                Err(TrySendError::Full(f)) => {
                    if self.evict.try_recv().is_ok() {
                        dropped += 1;
                    }
                    frame = f;
                }
                Err(TrySendError::Disconnected(_)) => return dropped + 1,
            }
        }
    }
}
