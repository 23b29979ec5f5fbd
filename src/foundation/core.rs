use crate::foundation::error::{ChoreoError, ChoreoResult};

pub use kurbo::Vec2;

/// Stable section identifier, assigned in creation order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SectionId(pub u32);

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, rejecting non-finite or negative sizes.
    pub fn new(width: f64, height: f64) -> ChoreoResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(ChoreoError::validation(
                "viewport width/height must be finite and >= 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Absolute scroll-position interval `[start, end]` in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelRange {
    /// First scroll position of the range.
    pub start: f64,
    /// Last scroll position of the range (inclusive).
    pub end: f64,
}

impl PixelRange {
    /// Build a range; `end` must not precede `start`.
    pub fn new(start: f64, end: f64) -> ChoreoResult<Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(ChoreoError::validation("PixelRange bounds must be finite"));
        }
        if end < start {
            return Err(ChoreoError::validation("PixelRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Scroll distance covered by the range.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// True when the range covers no scroll distance.
    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Inclusive containment test.
    pub fn contains(self, px: f64) -> bool {
        self.start <= px && px <= self.end
    }
}

/// Rendered extent of a section as measured by layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionExtent {
    /// Document offset of the section's top edge in pixels.
    pub top_px: f64,
    /// Rendered height in pixels. Zero means "not laid out yet".
    pub height_px: f64,
}

impl SectionExtent {
    /// True once layout has produced a usable, non-zero height.
    pub fn is_measured(self) -> bool {
        self.height_px.is_finite() && self.height_px > 0.0 && self.top_px.is_finite()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
