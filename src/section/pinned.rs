use crate::{
    animation::{state::AnimationFrameState, timeline::ProgressTimeline},
    driver::boundary::{ScrollDriver, ScrollTick},
    foundation::core::{PixelRange, SectionExtent, SectionId},
    section::config::{Environment, MotionMode, PinOpts},
    snap::range::PinnedSegment,
};

/// Lifecycle of a pinned section within one layout pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum PinPhase {
    /// Created, not yet activated.
    Idle,
    /// Activated, but the section had no measurable height; registration is deferred.
    AwaitingLayout,
    /// Pinned over the given segment.
    Pinned(PinnedSegment),
    /// Capability check said no: rendered settled, never pinned.
    Static,
    /// Pin released on teardown or invalidation.
    Released,
}

/// Drives one section's scroll lock and its progress timeline.
#[derive(Clone, Debug)]
pub struct PinnedSectionController {
    id: SectionId,
    name: String,
    timeline: ProgressTimeline,
    opts: PinOpts,
    phase: PinPhase,
    last_progress: Option<f64>,
}

impl PinnedSectionController {
    /// Create an idle controller.
    pub fn new(
        id: SectionId,
        name: impl Into<String>,
        timeline: ProgressTimeline,
        opts: PinOpts,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            timeline,
            opts,
            phase: PinPhase::Idle,
            last_progress: None,
        }
    }

    /// Section id.
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Authoring name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PinPhase {
        self.phase
    }

    /// The section's timeline.
    pub fn timeline(&self) -> &ProgressTimeline {
        &self.timeline
    }

    /// The resolved segment, once pinned. `None` means "not yet available" (or never, for static
    /// sections); callers poll again after the next layout pass.
    pub fn segment(&self) -> Option<PinnedSegment> {
        match self.phase {
            PinPhase::Pinned(seg) => Some(seg),
            _ => None,
        }
    }

    /// True once the section has either registered a segment or settled into the static fallback.
    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, PinPhase::Pinned(_) | PinPhase::Static)
    }

    /// Run the capability check and lay the section out for this pass.
    ///
    /// Any previous pin is released first; segments are never patched in place. Returns the frame
    /// to write now, or `None` while waiting for a measurable extent.
    pub fn activate(
        &mut self,
        extent: SectionExtent,
        env: &Environment,
        driver: &mut dyn ScrollDriver,
    ) -> Option<AnimationFrameState> {
        if let PinPhase::Pinned(_) = self.phase {
            driver.unpin(self.id);
        }
        self.last_progress = None;

        if MotionMode::detect(env, &self.opts) == MotionMode::StaticFallback {
            self.phase = PinPhase::Static;
            return Some(self.timeline.settled());
        }

        let segment = if extent.is_measured() {
            let end = extent.top_px + self.opts.pin_distance_ratio * env.viewport.height;
            PixelRange::new(extent.top_px, end).and_then(|range| PinnedSegment::new(self.id, range))
        } else {
            Err(crate::foundation::error::ChoreoError::LayoutNotReady { section: self.id })
        };

        match segment {
            Ok(seg) => {
                driver.pin(self.id, seg.range);
                self.phase = PinPhase::Pinned(seg);
                let progress = seg.progress_at(driver.metrics().scroll_px);
                self.last_progress = Some(progress);
                Some(self.timeline.evaluate(progress))
            }
            Err(err) => {
                if err.is_transient_guard() {
                    tracing::debug!(section = %self.id, name = %self.name, "pin deferred");
                } else {
                    tracing::warn!(section = %self.id, name = %self.name, %err, "pin rejected");
                }
                self.phase = PinPhase::AwaitingLayout;
                // Unmeasured sections never show a mid-transition state.
                Some(self.timeline.settled())
            }
        }
    }

    /// Per-tick update. Returns the frame to write this tick, or `None` when nothing changed.
    pub fn on_scroll(&mut self, tick: &ScrollTick) -> Option<AnimationFrameState> {
        let PinPhase::Pinned(seg) = self.phase else {
            return None;
        };
        let progress = seg.progress_at(tick.scroll_px);
        if self.last_progress == Some(progress) {
            return None;
        }
        self.last_progress = Some(progress);
        Some(self.timeline.evaluate(progress))
    }

    /// Release the pin immediately and return the settled frame.
    pub fn deactivate(&mut self, driver: &mut dyn ScrollDriver) -> AnimationFrameState {
        if let PinPhase::Pinned(_) = self.phase {
            driver.unpin(self.id);
        }
        self.phase = PinPhase::Released;
        self.last_progress = None;
        self.timeline.settled()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/pinned.rs"]
mod tests;
