// Application state for HTTP handlers
use crate::application::session::Phase;
use crate::infrastructure::frame_hub::FrameHub;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    pub frames: FrameHub,
    pub phase: watch::Receiver<Phase>,
}
