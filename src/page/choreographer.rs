use std::time::Duration;

use crate::{
    animation::{state::AnimationFrameState, timeline::ProgressTimeline},
    driver::boundary::{ScrollDriver, ScrollTick},
    foundation::{
        core::{SectionExtent, SectionId},
        error::{ChoreoError, ChoreoResult},
    },
    page::model::ChoreoOpts,
    section::{
        config::Environment,
        pinned::PinnedSectionController,
        reveal::{RevealController, RevealTrigger},
    },
    snap::{
        discovery::{DiscoveryGate, DiscoveryTicket},
        registry::{SnapEngine, SnapRegistry},
        settle::{SnapRequest, plan_settle},
    },
};

/// Who currently owns scroll-position writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum ScrollControl {
    /// The user's own scrolling; the engine only observes.
    #[default]
    User,
    /// A snap settle animation is in flight.
    SnapSettle,
}

/// One section's frame for this pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionFrame {
    /// Section the frame belongs to.
    pub section: SectionId,
    /// Authoring name.
    pub name: String,
    /// Element states to write.
    pub frame: AnimationFrameState,
}

/// Frames to write after a layout pass, tick or teardown. Sections with nothing new are omitted.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameBatch {
    /// Frames in section registration order.
    pub frames: Vec<SectionFrame>,
}

impl FrameBatch {
    /// True when nothing needs writing.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame for `section`, if it changed.
    pub fn get(&self, section: SectionId) -> Option<&AnimationFrameState> {
        self.frames.iter().find(|f| f.section == section).map(|f| &f.frame)
    }

    fn push(&mut self, section: SectionId, name: &str, frame: AnimationFrameState) {
        self.frames.push(SectionFrame {
            section,
            name: name.to_owned(),
            frame,
        });
    }
}

#[derive(Clone, Debug)]
enum SectionSlot {
    Pinned(PinnedSectionController),
    Reveal(RevealController),
}

impl SectionSlot {
    fn id(&self) -> SectionId {
        match self {
            Self::Pinned(c) => c.id(),
            Self::Reveal(c) => c.id(),
        }
    }
}

/// Page-level controller.
///
/// Owns every section controller, the deferred discovery trigger and the snap engine built from
/// it. Only the snap path ever asks the driver to move the scroll position, and only while
/// [`ScrollControl::User`] has handed over control at the end of a gesture.
#[derive(Debug)]
pub struct Choreographer {
    opts: ChoreoOpts,
    sections: Vec<SectionSlot>,
    gate: Option<DiscoveryGate>,
    generation: u64,
    snap: Option<SnapEngine>,
    snap_built_for: f64,
    control: ScrollControl,
}

impl Choreographer {
    /// Create an empty, unmounted page.
    pub fn new(opts: ChoreoOpts) -> ChoreoResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            sections: Vec::new(),
            gate: None,
            generation: 0,
            snap: None,
            snap_built_for: 0.0,
            control: ScrollControl::User,
        })
    }

    /// Options in effect.
    pub fn opts(&self) -> &ChoreoOpts {
        &self.opts
    }

    fn next_id(&self) -> SectionId {
        SectionId(self.sections.len() as u32)
    }

    /// Register a pinned section.
    pub fn add_pinned(&mut self, name: impl Into<String>, timeline: ProgressTimeline) -> SectionId {
        let id = self.next_id();
        self.sections.push(SectionSlot::Pinned(PinnedSectionController::new(
            id,
            name,
            timeline,
            self.opts.pin,
        )));
        if let Some(gate) = self.gate.as_mut() {
            gate.expect(id);
        }
        id
    }

    /// Register a reveal section.
    pub fn add_reveal(
        &mut self,
        name: impl Into<String>,
        trigger: RevealTrigger,
        timeline: ProgressTimeline,
    ) -> ChoreoResult<SectionId> {
        trigger.validate()?;
        let id = self.next_id();
        self.sections.push(SectionSlot::Reveal(RevealController::new(
            id,
            name,
            timeline,
            trigger,
            self.opts.pin,
        )));
        Ok(id)
    }

    /// Pinned section controller by id.
    pub fn pinned(&self, id: SectionId) -> Option<&PinnedSectionController> {
        self.sections.iter().find_map(|s| match s {
            SectionSlot::Pinned(c) if c.id() == id => Some(c),
            _ => None,
        })
    }

    /// Reveal section controller by id.
    pub fn reveal(&self, id: SectionId) -> Option<&RevealController> {
        self.sections.iter().find_map(|s| match s {
            SectionSlot::Reveal(c) if c.id() == id => Some(c),
            _ => None,
        })
    }

    /// Installed snap engine; `None` until discovery has run.
    pub fn snap_engine(&self) -> Option<&SnapEngine> {
        self.snap.as_ref()
    }

    /// Current scroll-write owner.
    pub fn control(&self) -> ScrollControl {
        self.control
    }

    /// Start a mount cycle: arm deferred discovery and return the ticket the host hands back when
    /// its settle timer fires. Any previous cycle's tickets go stale.
    pub fn mount(&mut self, now: Duration) -> DiscoveryTicket {
        if let Some(gate) = self.gate.as_mut() {
            gate.cancel();
        }
        self.generation += 1;
        self.snap = None;
        let pinned: Vec<SectionId> = self
            .sections
            .iter()
            .filter(|s| matches!(s, SectionSlot::Pinned(c) if !c.is_resolved()))
            .map(SectionSlot::id)
            .collect();
        let (gate, ticket) = DiscoveryGate::arm(now, self.generation, pinned, &self.opts.discovery);
        self.gate = Some(gate);
        tracing::debug!(generation = self.generation, due_at = ?ticket.due_at(), "discovery armed");
        ticket
    }

    /// Lay every section out against fresh measurements. Sections missing from `extents` are
    /// treated as unmeasured.
    ///
    /// Recomputes wholesale: pins are re-registered, an in-flight snap is abandoned and an already
    /// installed snap engine is rebuilt from the new pins.
    #[tracing::instrument(level = "debug", skip_all, fields(sections = self.sections.len()))]
    pub fn layout(
        &mut self,
        extents: &[(SectionId, SectionExtent)],
        env: &Environment,
        driver: &mut dyn ScrollDriver,
    ) -> FrameBatch {
        if self.control == ScrollControl::SnapSettle {
            driver.cancel_animation();
            self.control = ScrollControl::User;
        }

        let extent_of = |id: SectionId| {
            extents
                .iter()
                .find(|(sid, _)| *sid == id)
                .map_or_else(SectionExtent::default, |(_, e)| *e)
        };

        let mut batch = FrameBatch::default();
        for slot in &mut self.sections {
            match slot {
                SectionSlot::Pinned(c) => {
                    if let Some(frame) = c.activate(extent_of(c.id()), env, driver) {
                        batch.push(c.id(), c.name(), frame);
                    }
                    if c.is_resolved()
                        && let Some(gate) = self.gate.as_mut()
                    {
                        gate.resolve(c.id());
                    }
                }
                SectionSlot::Reveal(c) => {
                    let scroll_px = driver.metrics().scroll_px;
                    let frame = c.activate(extent_of(c.id()), env, scroll_px);
                    batch.push(c.id(), c.name(), frame);
                }
            }
        }

        if self.snap.is_some() {
            self.install_snap(driver);
        }
        batch
    }

    /// Advance every section to `tick`.
    pub fn tick(&mut self, tick: &ScrollTick) -> FrameBatch {
        let mut batch = FrameBatch::default();
        for slot in &mut self.sections {
            match slot {
                SectionSlot::Pinned(c) => {
                    if let Some(frame) = c.on_scroll(tick) {
                        batch.push(c.id(), c.name(), frame);
                    }
                }
                SectionSlot::Reveal(c) => {
                    if let Some(frame) = c.on_scroll(tick) {
                        batch.push(c.id(), c.name(), frame);
                    }
                }
            }
        }
        batch
    }

    /// Run discovery if the settle delay has passed or every pinned section is ready.
    ///
    /// Returns true when discovery ran on this call.
    pub fn poll(&mut self, now: Duration, driver: &mut dyn ScrollDriver) -> bool {
        let Some(gate) = self.gate.as_mut() else {
            return false;
        };
        if !gate.is_due(now) || gate.fire().is_err() {
            return false;
        }
        self.install_snap(driver);
        true
    }

    /// Deliver the host's settle-timer callback. Stale tickets (unmounted page, remount, or
    /// discovery already done) are ignored.
    #[tracing::instrument(level = "debug", skip_all, fields(generation = self.generation))]
    pub fn on_discovery_due(
        &mut self,
        ticket: &DiscoveryTicket,
        driver: &mut dyn ScrollDriver,
    ) -> bool {
        let accepted = match self.gate.as_mut() {
            Some(gate) => gate.accept(ticket),
            None => Err(ChoreoError::StaleRegistry),
        };
        match accepted {
            Ok(()) => {
                self.install_snap(driver);
                true
            }
            Err(err) => {
                tracing::debug!(%err, "discovery callback ignored");
                false
            }
        }
    }

    fn install_snap(&mut self, driver: &dyn ScrollDriver) {
        let engine = SnapRegistry::discover(driver, &self.opts.snap);
        self.snap_built_for = driver.metrics().max_scroll_px;
        tracing::info!(
            ranges = engine.ranges().len(),
            max_scroll_px = self.snap_built_for,
            "snap registry installed"
        );
        self.snap = Some(engine);
    }

    /// The user touched the scroll position (wheel, touch, keys). Any snap in flight yields.
    pub fn user_input(&mut self, driver: &mut dyn ScrollDriver) {
        if self.control == ScrollControl::SnapSettle {
            driver.cancel_animation();
            self.control = ScrollControl::User;
            tracing::debug!("snap settle interrupted by user input");
        }
    }

    /// End of a scroll gesture: settle onto the nearest pinned center if within tolerance.
    ///
    /// Returns the request handed to the driver, or `None` when no snap is needed, discovery has
    /// not run yet, or a settle is already in flight.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn gesture_end(&mut self, driver: &mut dyn ScrollDriver) -> Option<SnapRequest> {
        if self.control == ScrollControl::SnapSettle {
            return None;
        }
        let metrics = driver.metrics();
        if self.snap.is_some() && metrics.max_scroll_px != self.snap_built_for {
            tracing::debug!(
                was = self.snap_built_for,
                now = metrics.max_scroll_px,
                "scrollable distance changed; rebuilding snap registry"
            );
            self.install_snap(driver);
        }

        let engine = self.snap.as_ref()?;
        let fraction = metrics.fraction()?;
        let target = engine.snap_target(fraction);
        let request = plan_settle(&metrics, target, &self.opts.snap)?;
        driver.animate_to(&request);
        self.control = ScrollControl::SnapSettle;
        tracing::debug!(from = fraction, to = target, duration = ?request.duration, "snap settle");
        Some(request)
    }

    /// The driver finished (or gave up on) the settle animation.
    pub fn snap_finished(&mut self) {
        self.control = ScrollControl::User;
    }

    /// Tear the page down: pending discovery is cancelled, the snap engine dropped, pins released
    /// and every section left settled.
    pub fn unmount(&mut self, driver: &mut dyn ScrollDriver) -> FrameBatch {
        if let Some(mut gate) = self.gate.take() {
            gate.cancel();
        }
        self.snap = None;
        if self.control == ScrollControl::SnapSettle {
            driver.cancel_animation();
            self.control = ScrollControl::User;
        }

        let mut batch = FrameBatch::default();
        for slot in &mut self.sections {
            match slot {
                SectionSlot::Pinned(c) => {
                    let frame = c.deactivate(driver);
                    batch.push(c.id(), c.name(), frame);
                }
                SectionSlot::Reveal(c) => {
                    let frame = c.deactivate();
                    batch.push(c.id(), c.name(), frame);
                }
            }
        }
        tracing::info!(sections = self.sections.len(), "page unmounted");
        batch
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/choreographer.rs"]
mod tests;
