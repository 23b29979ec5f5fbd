use std::collections::BTreeMap;

use crate::{
    driver::boundary::{ScrollDriver, ScrollTick},
    foundation::core::{PixelRange, SectionId, Viewport},
    snap::{range::PinnedSegment, settle::SnapRequest},
};

/// A request recorded by [`SimDriver`].
#[derive(Clone, Debug, PartialEq)]
pub enum DriverCall {
    /// `pin(section, range)`.
    Pin(SectionId, PixelRange),
    /// `unpin(section)`.
    Unpin(SectionId),
    /// `animate_to(request)`.
    AnimateTo(SnapRequest),
    /// `cancel_animation()`.
    CancelAnimation,
}

/// In-memory scroll driver for tests, the CLI and debugging.
///
/// Animations complete only when [`SimDriver::finish_animation`] is called.
#[derive(Clone, Debug)]
pub struct SimDriver {
    scroll_px: f64,
    max_scroll_px: f64,
    viewport: Viewport,
    pins: BTreeMap<SectionId, PixelRange>,
    animation: Option<SnapRequest>,
    calls: Vec<DriverCall>,
}

impl SimDriver {
    /// A document scrolled to the top.
    pub fn new(viewport: Viewport, max_scroll_px: f64) -> Self {
        Self {
            scroll_px: 0.0,
            max_scroll_px: max_scroll_px.max(0.0),
            viewport,
            pins: BTreeMap::new(),
            animation: None,
            calls: Vec::new(),
        }
    }

    /// Move to `px` (clamped) and report the tick.
    pub fn scroll_to(&mut self, px: f64) -> ScrollTick {
        self.scroll_px = px.clamp(0.0, self.max_scroll_px);
        self.metrics()
    }

    /// Apply a resize or reflow.
    pub fn relayout(&mut self, viewport: Viewport, max_scroll_px: f64) -> ScrollTick {
        self.viewport = viewport;
        self.max_scroll_px = max_scroll_px.max(0.0);
        self.scroll_px = self.scroll_px.clamp(0.0, self.max_scroll_px);
        self.metrics()
    }

    /// In-flight settle animation, if any.
    pub fn animation(&self) -> Option<&SnapRequest> {
        self.animation.as_ref()
    }

    /// Jump to the in-flight animation's target and report the tick.
    pub fn finish_animation(&mut self) -> Option<ScrollTick> {
        let req = self.animation.take()?;
        Some(self.scroll_to(req.target_px))
    }

    /// Currently pinned ranges by section.
    pub fn pins(&self) -> &BTreeMap<SectionId, PixelRange> {
        &self.pins
    }

    /// Every request received, in order.
    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }
}

impl ScrollDriver for SimDriver {
    fn metrics(&self) -> ScrollTick {
        ScrollTick {
            scroll_px: self.scroll_px,
            max_scroll_px: self.max_scroll_px,
            viewport: self.viewport,
        }
    }

    fn pin(&mut self, section: SectionId, range: PixelRange) {
        self.calls.push(DriverCall::Pin(section, range));
        self.pins.insert(section, range);
    }

    fn unpin(&mut self, section: SectionId) {
        self.calls.push(DriverCall::Unpin(section));
        self.pins.remove(&section);
    }

    fn pinned_ranges(&self) -> Vec<PinnedSegment> {
        self.pins
            .iter()
            .filter_map(|(&id, &range)| PinnedSegment::new(id, range).ok())
            .collect()
    }

    fn animate_to(&mut self, request: &SnapRequest) {
        self.calls.push(DriverCall::AnimateTo(*request));
        self.animation = Some(*request);
    }

    fn cancel_animation(&mut self) {
        self.calls.push(DriverCall::CancelAnimation);
        self.animation = None;
    }
}
