// Scroll planner - per-update horizontal shift handed to the renderer
use super::axis::{AxisDomain, LinearScale};
use serde::Serialize;

/// Offsets in X-domain units. The renderer draws at `start_offset` right away
/// and animates linearly to `end_offset` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftPlan {
    pub start_offset: f64,
    pub end_offset: f64,
    pub duration_ms: f64,
}

/// A [`ShiftPlan`] projected onto the plot's pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelShift {
    pub start_px: f64,
    pub end_px: f64,
    pub duration_ms: f64,
}

/// Plans the continuous-scroll animation for one applied update.
///
/// The new data enters already displaced by the forward move of the window and
/// settles on the new lower edge. The animation runs for `transition_fraction`
/// of the tick interval so it finishes before the next tick arrives.
pub fn plan_shift(
    prior_domain_x: AxisDomain,
    new_domain_x: AxisDomain,
    tick_interval_ms: f64,
    transition_fraction: f64,
) -> ShiftPlan {
    let delta = new_domain_x.hi - prior_domain_x.hi;
    ShiftPlan {
        start_offset: new_domain_x.lo + delta,
        end_offset: new_domain_x.lo,
        duration_ms: transition_fraction * tick_interval_ms,
    }
}

impl ShiftPlan {
    pub fn to_pixels(&self, scale: &LinearScale) -> PixelShift {
        PixelShift {
            start_px: scale.apply(self.start_offset),
            end_px: scale.apply(self.end_offset),
            duration_ms: self.duration_ms,
        }
    }
}
