use std::time::Duration;

use crate::{
    animation::ease::Ease,
    driver::boundary::ScrollTick,
    foundation::error::{ChoreoError, ChoreoResult},
};

/// Targets closer than this (in pixels) to the current position are not animated.
const MIN_SNAP_TRAVEL_PX: f64 = 0.5;

/// Options for the snap controller.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnapOpts {
    /// Margin around each pinned range, as a fraction of total scroll.
    pub tolerance: f64,
    /// Shortest settle animation.
    pub duration_min_secs: f64,
    /// Longest settle animation.
    pub duration_max_secs: f64,
    /// Settle animation curve.
    pub ease: Ease,
}

impl Default for SnapOpts {
    fn default() -> Self {
        Self {
            tolerance: 0.02,
            duration_min_secs: 0.35,
            duration_max_secs: 0.65,
            ease: Ease::InOutCubic,
        }
    }
}

impl SnapOpts {
    /// Reject tolerances and duration windows that cannot be honored.
    pub fn validate(&self) -> ChoreoResult<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ChoreoError::validation("snap tolerance must be >= 0"));
        }
        if !(self.duration_min_secs.is_finite() && self.duration_max_secs.is_finite())
            || self.duration_min_secs < 0.0
            || self.duration_min_secs > self.duration_max_secs
        {
            return Err(ChoreoError::validation(
                "snap durations must satisfy 0 <= min <= max",
            ));
        }
        Ok(())
    }
}

/// A request for the scroll driver to settle onto a snap target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SnapRequest {
    /// Target as a fraction of total scroll.
    pub target_fraction: f64,
    /// Target in absolute pixels.
    pub target_px: f64,
    /// Animation length, inside the configured window.
    pub duration: Duration,
    /// Animation curve.
    pub ease: Ease,
}

/// Turn a snap target into a driver request, or `None` when the position is already there.
///
/// Duration grows with the travel distance measured in viewport heights: one full viewport (or
/// more) uses the maximum.
pub(crate) fn plan_settle(
    tick: &ScrollTick,
    target_fraction: f64,
    opts: &SnapOpts,
) -> Option<SnapRequest> {
    if tick.max_scroll_px <= 0.0 {
        return None;
    }
    let target_px = target_fraction * tick.max_scroll_px;
    let travel = (target_px - tick.scroll_px).abs();
    if travel < MIN_SNAP_TRAVEL_PX {
        return None;
    }

    let t = if tick.viewport.height > 0.0 {
        (travel / tick.viewport.height).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let secs = opts.duration_min_secs * (1.0 - t) + opts.duration_max_secs * t;

    Some(SnapRequest {
        target_fraction,
        target_px,
        duration: Duration::from_secs_f64(secs),
        ease: opts.ease,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/snap/settle.rs"]
mod tests;
