use crate::{
    animation::{segment::ProgressRange, state::AnimationFrameState, timeline::ProgressTimeline},
    driver::boundary::ScrollTick,
    foundation::{
        core::{PixelRange, SectionExtent, SectionId},
        error::{ChoreoError, ChoreoResult},
        math::inverse_lerp_clamped,
    },
    section::config::{Environment, MotionMode, PinOpts},
};

/// Viewport lines (fractions of viewport height, from the top) that the section's top edge crosses.
///
/// Progress runs from 0 when the top edge reaches `start_line` to 1 when it reaches `end_line`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealTrigger {
    /// Line where the reveal begins.
    pub start_line: f64,
    /// Line where the reveal completes. Must be above `start_line`.
    pub end_line: f64,
}

impl Default for RevealTrigger {
    fn default() -> Self {
        Self {
            start_line: 0.8,
            end_line: 0.4,
        }
    }
}

impl RevealTrigger {
    /// Check line ordering.
    pub fn validate(&self) -> ChoreoResult<()> {
        if !(self.start_line.is_finite() && self.end_line.is_finite())
            || self.end_line >= self.start_line
        {
            return Err(ChoreoError::validation(
                "reveal trigger end_line must be above (less than) start_line",
            ));
        }
        Ok(())
    }

    /// Scroll positions at which the reveal starts and completes.
    pub fn scroll_range(
        &self,
        extent: SectionExtent,
        viewport_height: f64,
    ) -> ChoreoResult<PixelRange> {
        PixelRange::new(
            extent.top_px - self.start_line * viewport_height,
            extent.top_px - self.end_line * viewport_height,
        )
    }
}

/// Lifecycle of a reveal section.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum RevealPhase {
    /// Created, not yet activated.
    Idle,
    /// No measurable extent yet.
    AwaitingLayout,
    /// Animating across the given scroll range.
    Active(PixelRange),
    /// Rendered settled.
    Static,
    /// Torn down.
    Released,
}

/// A free-scrolling section whose elements animate in as it enters the viewport.
///
/// Reveal progress plays the timeline's entrance band only, so a completed reveal rests in the
/// settled hold. It never pins and never takes part in snapping.
#[derive(Clone, Debug)]
pub struct RevealController {
    id: SectionId,
    name: String,
    timeline: ProgressTimeline,
    trigger: RevealTrigger,
    opts: PinOpts,
    phase: RevealPhase,
    last_progress: Option<f64>,
}

impl RevealController {
    /// Create an idle reveal controller.
    pub fn new(
        id: SectionId,
        name: impl Into<String>,
        timeline: ProgressTimeline,
        trigger: RevealTrigger,
        opts: PinOpts,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            timeline,
            trigger,
            opts,
            phase: RevealPhase::Idle,
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
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Capability check plus layout for this pass; returns the frame to write now.
    pub fn activate(
        &mut self,
        extent: SectionExtent,
        env: &Environment,
        scroll_px: f64,
    ) -> AnimationFrameState {
        self.last_progress = None;
        if MotionMode::detect(env, &self.opts) == MotionMode::StaticFallback {
            self.phase = RevealPhase::Static;
            return self.timeline.settled();
        }
        if !extent.is_measured() {
            tracing::debug!(section = %self.id, name = %self.name, "reveal deferred until layout");
            self.phase = RevealPhase::AwaitingLayout;
            return self.timeline.settled();
        }
        match self.trigger.scroll_range(extent, env.viewport.height) {
            Ok(range) => {
                self.phase = RevealPhase::Active(range);
                let progress = inverse_lerp_clamped(range.start, range.end, scroll_px);
                self.last_progress = Some(progress);
                self.frame_at(progress)
            }
            Err(err) => {
                tracing::debug!(section = %self.id, %err, "reveal range rejected");
                self.phase = RevealPhase::Static;
                self.timeline.settled()
            }
        }
    }

    /// Per-tick update; `None` when nothing changed.
    pub fn on_scroll(&mut self, tick: &ScrollTick) -> Option<AnimationFrameState> {
        let RevealPhase::Active(range) = self.phase else {
            return None;
        };
        let progress = inverse_lerp_clamped(range.start, range.end, tick.scroll_px);
        if self.last_progress == Some(progress) {
            return None;
        }
        self.last_progress = Some(progress);
        Some(self.frame_at(progress))
    }

    fn frame_at(&self, progress: f64) -> AnimationFrameState {
        let band = ProgressRange::ENTRANCE;
        self.timeline.evaluate(band.start + band.len() * progress)
    }

    /// Tear down, leaving the settled frame.
    pub fn deactivate(&mut self) -> AnimationFrameState {
        self.phase = RevealPhase::Released;
        self.last_progress = None;
        self.timeline.settled()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/reveal.rs"]
mod tests;
