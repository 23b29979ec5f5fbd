use crate::{
    animation::{ease::Ease, state::ElementState},
    foundation::error::{ChoreoError, ChoreoResult},
};

/// A sub-range of section progress, `0 <= start < end <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressRange {
    /// First progress value of the band.
    pub start: f64,
    /// Last progress value of the band.
    pub end: f64,
}

impl ProgressRange {
    /// Canonical entrance band.
    pub const ENTRANCE: ProgressRange = ProgressRange {
        start: 0.0,
        end: 0.3,
    };
    /// Canonical mid-hold band where every element is settled.
    pub const HOLD: ProgressRange = ProgressRange {
        start: 0.3,
        end: 0.7,
    };
    /// Canonical exit band.
    pub const EXIT: ProgressRange = ProgressRange {
        start: 0.7,
        end: 1.0,
    };
    /// The whole progress domain.
    pub const FULL: ProgressRange = ProgressRange {
        start: 0.0,
        end: 1.0,
    };

    /// Build a range, validating its bounds.
    pub fn new(start: f64, end: f64) -> ChoreoResult<Self> {
        let r = Self { start, end };
        r.validate()?;
        Ok(r)
    }

    /// Band width.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    pub(crate) fn validate(self) -> ChoreoResult<()> {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(ChoreoError::timeline("progress range bounds must be finite"));
        }
        if self.start < 0.0 || self.end > 1.0 || self.start >= self.end {
            return Err(ChoreoError::timeline(format!(
                "progress range [{}, {}] must satisfy 0 <= start < end <= 1",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Label of a timeline segment.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SegmentLabel {
    /// Elements travel from their entry state into the settled state.
    Entrance,
    /// Elements leave the settled state.
    Exit,
    /// Any other authored band.
    Custom(String),
}

/// One element's transition inside a segment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    /// Element key the tween drives.
    pub element: String,
    /// State at the start of the tween window.
    pub from: ElementState,
    /// State at the end of the tween window.
    pub to: ElementState,
    /// Curve applied to local progress.
    #[serde(default)]
    pub ease: Ease,
    /// Stagger shift into the segment, in progress units. Must stay below the segment width.
    #[serde(default)]
    pub delay: f64,
}

impl Tween {
    /// Tween from `from` into the settled state.
    pub fn enter(element: impl Into<String>, from: ElementState) -> Self {
        Self {
            element: element.into(),
            from,
            to: ElementState::SETTLED,
            ease: Ease::Linear,
            delay: 0.0,
        }
    }

    /// Tween from the settled state into `to`.
    pub fn leave(element: impl Into<String>, to: ElementState) -> Self {
        Self {
            element: element.into(),
            from: ElementState::SETTLED,
            to,
            ease: Ease::Linear,
            delay: 0.0,
        }
    }

    /// Set the easing curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Set the stagger delay.
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// A labeled band of progress and the tweens that play inside it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Segment label.
    pub label: SegmentLabel,
    /// Progress band.
    pub range: ProgressRange,
    /// Tweens playing in this band.
    pub tweens: Vec<Tween>,
}

impl Segment {
    pub(crate) fn validate(&self) -> ChoreoResult<()> {
        self.range.validate()?;
        for tw in &self.tweens {
            if tw.element.trim().is_empty() {
                return Err(ChoreoError::timeline("tween element key must be non-empty"));
            }
            if !(tw.from.is_finite() && tw.to.is_finite()) {
                return Err(ChoreoError::timeline(format!(
                    "tween for '{}' has non-finite state",
                    tw.element
                )));
            }
            if !tw.delay.is_finite() || tw.delay < 0.0 || tw.delay >= self.range.len() {
                return Err(ChoreoError::timeline(format!(
                    "tween for '{}' has delay {} outside [0, {})",
                    tw.element,
                    tw.delay,
                    self.range.len()
                )));
            }
            match self.label {
                SegmentLabel::Entrance if !tw.to.is_settled() => {
                    return Err(ChoreoError::timeline(format!(
                        "entrance tween for '{}' must end settled",
                        tw.element
                    )));
                }
                SegmentLabel::Exit if !tw.from.is_settled() => {
                    return Err(ChoreoError::timeline(format!(
                        "exit tween for '{}' must start settled",
                        tw.element
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}
