// Renderer trait - the drawing collaborator and the frame it consumes
use crate::domain::axis::AxisDomain;
use crate::domain::scroll::{PixelShift, ShiftPlan};
use crate::domain::viewport::Viewport;
use crate::domain::window::{SeriesBuffer, WindowState};
use serde::Serialize;

/// Everything a renderer needs to redraw the window after an update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub sequence: u64,
    pub emitted_at_ms: i64,
    pub domain_x: AxisDomain,
    pub domain_y: AxisDomain,
    pub time: Vec<f64>,
    pub series: Vec<SeriesBuffer>,
    /// Absent on the bootstrap frame, which is drawn without animation.
    pub shift: Option<ShiftPlan>,
    pub pixel_shift: Option<PixelShift>,
}

impl RenderFrame {
    pub fn capture(
        sequence: u64,
        state: &WindowState,
        shift: Option<ShiftPlan>,
        viewport: &Viewport,
    ) -> Self {
        let pixel_shift = shift.map(|plan| plan.to_pixels(&viewport.x_scale(state.domain_x())));
        Self {
            sequence,
            emitted_at_ms: chrono::Utc::now().timestamp_millis(),
            domain_x: state.domain_x(),
            domain_y: state.domain_y(),
            time: state.time().to_vec(),
            series: state.series().to_vec(),
            shift,
            pixel_shift,
        }
    }
}

/// Receives frames. Implementations must not block the caller.
pub trait Renderer: Send + Sync {
    fn render(&self, frame: RenderFrame);
}
