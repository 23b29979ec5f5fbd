use crate::foundation::{
    core::{PixelRange, SectionId},
    error::{ChoreoError, ChoreoResult},
};

/// One section's scroll-locked region. Immutable for a given layout pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinnedSegment {
    /// Owning section.
    pub id: SectionId,
    /// Absolute scroll bounds of the pin.
    pub range: PixelRange,
}

impl PinnedSegment {
    /// Build a segment. Zero-length ranges are rejected: a section that has not been laid out
    /// must not register.
    pub fn new(id: SectionId, range: PixelRange) -> ChoreoResult<Self> {
        if range.is_empty() {
            return Err(ChoreoError::LayoutNotReady { section: id });
        }
        Ok(Self { id, range })
    }

    /// Scroll position where the pin starts.
    pub fn pixel_start(&self) -> f64 {
        self.range.start
    }

    /// Scroll position where the pin releases.
    pub fn pixel_end(&self) -> f64 {
        self.range.end
    }

    /// Clamped progress of `scroll_px` through the pin.
    pub fn progress_at(&self, scroll_px: f64) -> f64 {
        crate::foundation::math::inverse_lerp_clamped(self.range.start, self.range.end, scroll_px)
    }
}

/// A [`PinnedSegment`] expressed as fractions of the total scrollable distance.
///
/// Always satisfies `0 <= start <= center <= end <= 1`. Derived against one `max_scroll`; never
/// reused after it changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedRange {
    /// Owning section.
    pub id: SectionId,
    /// Normalized start.
    pub start: f64,
    /// Normalized end.
    pub end: f64,
    /// Midpoint, the snap rest position.
    pub center: f64,
}

impl NormalizedRange {
    /// Normalize `seg` against `max_scroll` pixels.
    pub fn from_segment(seg: &PinnedSegment, max_scroll: f64) -> ChoreoResult<Self> {
        if !(max_scroll.is_finite() && max_scroll > 0.0) {
            return Err(ChoreoError::DegenerateScrollRange { max_scroll });
        }
        let start = (seg.range.start / max_scroll).clamp(0.0, 1.0);
        let end = (seg.range.end / max_scroll).clamp(start, 1.0);
        let center = (start + (end - start) * 0.5).clamp(start, end);
        Ok(Self {
            id: seg.id,
            start,
            end,
            center,
        })
    }

    /// Membership in `[start - tolerance, end + tolerance]`.
    pub fn contains_within(&self, value: f64, tolerance: f64) -> bool {
        value >= self.start - tolerance && value <= self.end + tolerance
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snap/range.rs"]
mod tests;
