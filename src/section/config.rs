use crate::foundation::{
    core::Viewport,
    error::{ChoreoError, ChoreoResult},
};

/// Options for pinned sections.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PinOpts {
    /// Extra scroll distance consumed while pinned, as a fraction of viewport height.
    pub pin_distance_ratio: f64,
    /// Viewports narrower than this never pin.
    pub desktop_min_width_px: f64,
}

impl Default for PinOpts {
    fn default() -> Self {
        Self {
            pin_distance_ratio: 1.3,
            desktop_min_width_px: 768.0,
        }
    }
}

impl PinOpts {
    /// Reject ratios and thresholds that cannot describe a pin.
    pub fn validate(&self) -> ChoreoResult<()> {
        if !self.pin_distance_ratio.is_finite() || self.pin_distance_ratio <= 0.0 {
            return Err(ChoreoError::validation("pin_distance_ratio must be > 0"));
        }
        if !self.desktop_min_width_px.is_finite() || self.desktop_min_width_px < 0.0 {
            return Err(ChoreoError::validation("desktop_min_width_px must be >= 0"));
        }
        Ok(())
    }
}

/// Platform signals sampled once per layout pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Environment {
    /// Current viewport.
    pub viewport: Viewport,
    /// The platform accessibility preference for reduced motion.
    #[serde(default)]
    pub reduced_motion: bool,
}

impl Environment {
    /// Whether the viewport counts as desktop under `opts`.
    pub fn is_desktop(&self, opts: &PinOpts) -> bool {
        self.viewport.width >= opts.desktop_min_width_px
    }
}

/// Capability decision for one layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MotionMode {
    /// Scroll-driven animation is allowed.
    Pinned,
    /// Render settled frames statically; never request pins.
    StaticFallback,
}

impl MotionMode {
    /// Run the capability check.
    pub fn detect(env: &Environment, opts: &PinOpts) -> Self {
        if env.reduced_motion || !env.is_desktop(opts) {
            Self::StaticFallback
        } else {
            Self::Pinned
        }
    }
}
