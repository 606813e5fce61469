// Frame hub - renderer that fans frames out to HTTP subscribers
use crate::application::renderer::{RenderFrame, Renderer};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

const FRAME_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct FrameHub {
    latest: Arc<RwLock<Option<Arc<RenderFrame>>>>,
    tx: broadcast::Sender<Arc<RenderFrame>>,
}

impl FrameHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FRAME_CHANNEL_CAPACITY);
        Self {
            latest: Arc::new(RwLock::new(None)),
            tx,
        }
    }

    pub fn latest(&self) -> Option<Arc<RenderFrame>> {
        match self.latest.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<RenderFrame>> {
        self.tx.subscribe()
    }
}

impl Default for FrameHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for FrameHub {
    fn render(&self, frame: RenderFrame) {
        let frame = Arc::new(frame);
        match self.latest.write() {
            Ok(mut guard) => *guard = Some(frame.clone()),
            Err(poisoned) => *poisoned.into_inner() = Some(frame.clone()),
        }

        // No subscribers is fine, the latest frame is still kept
        if let Ok(receivers) = self.tx.send(frame) {
            tracing::trace!("Frame delivered to {} subscribers", receivers);
        }
    }
}
