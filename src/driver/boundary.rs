use crate::{
    foundation::core::{PixelRange, SectionId, Viewport},
    snap::{range::PinnedSegment, settle::SnapRequest},
};

/// What the scroll driver reports on every tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollTick {
    /// Absolute scroll position in pixels.
    pub scroll_px: f64,
    /// Total scrollable distance in pixels.
    pub max_scroll_px: f64,
    /// Current viewport.
    pub viewport: Viewport,
}

impl ScrollTick {
    /// Scroll position as a fraction of `max_scroll_px`, or `None` when the document cannot scroll.
    pub fn fraction(&self) -> Option<f64> {
        if self.max_scroll_px > 0.0 {
            Some((self.scroll_px / self.max_scroll_px).clamp(0.0, 1.0))
        } else {
            None
        }
    }
}

/// Host scrolling mechanism.
///
/// The driver owns the document scroll position. The engine only asks it to pin sections and to
/// animate toward a snap target; it never writes the position itself.
pub trait ScrollDriver {
    /// Current position, scrollable distance and viewport.
    fn metrics(&self) -> ScrollTick;

    /// Lock `section` to the viewport while the scroll position is inside `range`.
    fn pin(&mut self, section: SectionId, range: PixelRange);

    /// Release a pin previously requested for `section`. Unknown sections are ignored.
    fn unpin(&mut self, section: SectionId);

    /// All currently registered pinned ranges, in any order.
    fn pinned_ranges(&self) -> Vec<PinnedSegment>;

    /// Animate the scroll position toward `request.target_px`.
    fn animate_to(&mut self, request: &SnapRequest);

    /// Abort an in-flight `animate_to`, leaving the position where it is.
    fn cancel_animation(&mut self);
}
