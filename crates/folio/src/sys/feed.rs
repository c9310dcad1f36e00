use crate::gallery::Frame;
use parking_lot::RwLock;
use std::sync::Arc;

/// Latest published frame, shared between the main loop (single writer)
/// and control connections (readers).
#[derive(Clone, Default)]
pub struct FrameFeed {
    frame: Arc<RwLock<Option<Frame>>>,
}

impl FrameFeed {
    pub fn publish(&self, frame: Frame) {
        *self.frame.write() = Some(frame);
    }

    pub fn frame_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&*self.frame.read())
    }

    pub fn modal_json(&self) -> Result<String, serde_json::Error> {
        let guard = self.frame.read();
        serde_json::to_string(&guard.as_ref().and_then(|f| f.modal.as_ref()))
    }
}
