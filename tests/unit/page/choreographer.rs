use super::*;
use crate::{
    animation::{dsl::TimelineBuilder, ease::Ease, state::ElementState},
    driver::sim::{DriverCall, SimDriver},
    foundation::core::Viewport,
};

const VIEWPORT: Viewport = Viewport {
    width: 1440.0,
    height: 1000.0,
};

fn env() -> Environment {
    Environment {
        viewport: VIEWPORT,
        reduced_motion: false,
    }
}

fn timeline() -> ProgressTimeline {
    TimelineBuilder::new()
        .enter("copy", ElementState::hidden().offset(0.0, 0.1), Ease::OutCubic)
        .leave("copy", ElementState::hidden().offset(0.0, -0.1), Ease::InCubic)
        .build()
        .unwrap()
}

struct Page {
    choreo: Choreographer,
    driver: SimDriver,
    about: SectionId,
    work: SectionId,
    contact: SectionId,
}

impl Page {
    fn new() -> Self {
        let mut choreo = Choreographer::new(ChoreoOpts::default()).unwrap();
        let about = choreo.add_pinned("about", timeline());
        let work = choreo.add_pinned("work", timeline());
        let contact = choreo
            .add_reveal("contact", RevealTrigger::default(), timeline())
            .unwrap();
        Self {
            choreo,
            driver: SimDriver::new(VIEWPORT, 9000.0),
            about,
            work,
            contact,
        }
    }

    fn extents(&self, work_height: f64) -> Vec<(SectionId, SectionExtent)> {
        vec![
            (
                self.work,
                SectionExtent {
                    top_px: 3000.0,
                    height_px: work_height,
                },
            ),
            (
                self.about,
                SectionExtent {
                    top_px: 1000.0,
                    height_px: 1000.0,
                },
            ),
            (
                self.contact,
                SectionExtent {
                    top_px: 6000.0,
                    height_px: 800.0,
                },
            ),
        ]
    }

    fn layout(&mut self, work_height: f64) -> FrameBatch {
        let extents = self.extents(work_height);
        self.choreo.layout(&extents, &env(), &mut self.driver)
    }

    fn ready() -> Self {
        let mut page = Self::new();
        page.choreo.mount(Duration::ZERO);
        page.layout(1000.0);
        assert!(page.choreo.poll(Duration::ZERO, &mut page.driver));
        page
    }
}

fn animate_calls(d: &SimDriver) -> usize {
    d.calls()
        .iter()
        .filter(|c| matches!(c, DriverCall::AnimateTo(_)))
        .count()
}

#[test]
fn barrier_fires_discovery_once_every_pin_resolves() {
    let page = Page::ready();
    let engine = page.choreo.snap_engine().unwrap();
    assert!(engine.is_active());
    let ids: Vec<_> = engine.ranges().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![page.about, page.work]);
}

#[test]
fn unmeasured_pin_waits_for_settle_delay() {
    let mut page = Page::new();
    page.choreo.mount(Duration::ZERO);
    page.layout(0.0);
    assert!(!page.choreo.poll(Duration::from_millis(100), &mut page.driver));
    assert!(page.choreo.snap_engine().is_none());

    assert!(page.choreo.poll(Duration::from_millis(500), &mut page.driver));
    assert_eq!(page.choreo.snap_engine().unwrap().ranges().len(), 1);
    // Discovery runs once per mount.
    assert!(!page.choreo.poll(Duration::from_millis(900), &mut page.driver));
}

#[test]
fn timer_delivery_after_early_discovery_is_ignored() {
    let mut page = Page::new();
    let ticket = page.choreo.mount(Duration::ZERO);
    page.layout(1000.0);
    assert!(page.choreo.poll(Duration::ZERO, &mut page.driver));
    assert!(!page.choreo.on_discovery_due(&ticket, &mut page.driver));
}

#[test]
fn ticket_delivery_installs_registry() {
    let mut page = Page::new();
    let ticket = page.choreo.mount(Duration::ZERO);
    page.layout(0.0);
    assert!(page.choreo.on_discovery_due(&ticket, &mut page.driver));
    assert!(page.choreo.snap_engine().unwrap().is_active());
}

#[test]
fn stale_tickets_are_no_ops() {
    let mut page = Page::new();
    let first = page.choreo.mount(Duration::ZERO);
    let second = page.choreo.mount(Duration::ZERO);
    assert!(!first.is_live());
    assert!(!page.choreo.on_discovery_due(&first, &mut page.driver));
    assert!(page.choreo.snap_engine().is_none());

    page.choreo.unmount(&mut page.driver);
    assert!(!second.is_live());
    assert!(!page.choreo.on_discovery_due(&second, &mut page.driver));
    assert!(page.choreo.snap_engine().is_none());
}

#[test]
fn gesture_end_settles_onto_nearest_center() {
    let mut page = Page::ready();
    page.driver.scroll_to(1700.0);
    let req = page.choreo.gesture_end(&mut page.driver).unwrap();
    // About pins 1000..2300: center 1650.
    assert!((req.target_px - 1650.0).abs() < 1e-6);
    assert!(req.duration >= Duration::from_secs_f64(0.35));
    assert!(req.duration <= Duration::from_secs_f64(0.65));
    assert_eq!(page.choreo.control(), ScrollControl::SnapSettle);
    assert_eq!(page.driver.animation(), Some(&req));
}

#[test]
fn settle_in_flight_is_the_only_writer() {
    let mut page = Page::ready();
    page.driver.scroll_to(1700.0);
    page.choreo.gesture_end(&mut page.driver).unwrap();
    assert!(page.choreo.gesture_end(&mut page.driver).is_none());
    assert_eq!(animate_calls(&page.driver), 1);

    page.choreo.user_input(&mut page.driver);
    assert_eq!(page.choreo.control(), ScrollControl::User);
    assert!(page.driver.animation().is_none());
    assert_eq!(page.driver.calls().last(), Some(&DriverCall::CancelAnimation));
}

#[test]
fn settled_position_needs_no_further_snap() {
    let mut page = Page::ready();
    page.driver.scroll_to(1700.0);
    page.choreo.gesture_end(&mut page.driver).unwrap();
    page.driver.finish_animation().unwrap();
    page.choreo.snap_finished();
    assert!(page.choreo.gesture_end(&mut page.driver).is_none());
}

#[test]
fn outside_every_band_nothing_moves() {
    let mut page = Page::ready();
    page.driver.scroll_to(5000.0);
    assert!(page.choreo.gesture_end(&mut page.driver).is_none());
    assert_eq!(page.choreo.control(), ScrollControl::User);
}

#[test]
fn no_snap_before_discovery() {
    let mut page = Page::new();
    page.choreo.mount(Duration::ZERO);
    page.layout(0.0);
    page.driver.scroll_to(1700.0);
    assert!(page.choreo.gesture_end(&mut page.driver).is_none());
}

#[test]
fn resized_document_rebuilds_registry() {
    let mut page = Page::ready();
    page.driver.relayout(VIEWPORT, 12_000.0);
    page.driver.scroll_to(1700.0);
    let req = page.choreo.gesture_end(&mut page.driver).unwrap();
    assert!((req.target_px - 1650.0).abs() < 1e-6);
    match page.choreo.snap_engine().unwrap() {
        SnapEngine::Active(reg) => assert_eq!(reg.max_scroll_px(), 12_000.0),
        SnapEngine::PassThrough => panic!("expected an active registry"),
    }
}

#[test]
fn relayout_rebuilds_from_new_pins() {
    let mut page = Page::ready();
    let extents = vec![(
        page.about,
        SectionExtent {
            top_px: 1800.0,
            height_px: 1000.0,
        },
    )];
    page.choreo.layout(&extents, &env(), &mut page.driver);
    // Work and contact are unmeasured in this pass: only about stays pinned.
    let engine = page.choreo.snap_engine().unwrap();
    assert_eq!(engine.ranges().len(), 1);
    assert!((engine.ranges()[0].start - 0.2).abs() < 1e-12);
}

#[test]
fn ticks_only_report_changed_sections() {
    let mut page = Page::ready();
    let tick = page.driver.scroll_to(1650.0);
    let batch = page.choreo.tick(&tick);
    assert_eq!(batch.frames.len(), 1);
    assert!(batch.get(page.about).unwrap().is_settled());
    assert!(page.choreo.tick(&tick).is_empty());
}

#[test]
fn reduced_motion_disables_pins_and_snapping() {
    let mut page = Page::new();
    page.choreo.mount(Duration::ZERO);
    let extents = page.extents(1000.0);
    let reduced = Environment {
        reduced_motion: true,
        ..env()
    };
    let batch = page.choreo.layout(&extents, &reduced, &mut page.driver);
    assert_eq!(batch.frames.len(), 3);
    assert!(batch.frames.iter().all(|f| f.frame.is_settled()));
    assert!(page.driver.pins().is_empty());

    assert!(page.choreo.poll(Duration::ZERO, &mut page.driver));
    assert_eq!(page.choreo.snap_engine(), Some(&SnapEngine::PassThrough));
    page.driver.scroll_to(1700.0);
    assert!(page.choreo.gesture_end(&mut page.driver).is_none());
}

#[test]
fn unmount_releases_everything() {
    let mut page = Page::ready();
    page.driver.scroll_to(1700.0);
    page.choreo.gesture_end(&mut page.driver).unwrap();

    let batch = page.choreo.unmount(&mut page.driver);
    assert!(batch.frames.iter().all(|f| f.frame.is_settled()));
    assert!(page.driver.pins().is_empty());
    assert!(page.driver.animation().is_none());
    assert!(page.choreo.snap_engine().is_none());
    assert_eq!(page.choreo.control(), ScrollControl::User);
    assert!(!page.choreo.poll(Duration::from_secs(5), &mut page.driver));
}

#[test]
fn invalid_opts_are_rejected() {
    let mut opts = ChoreoOpts::default();
    opts.snap.tolerance = -1.0;
    assert!(Choreographer::new(opts).is_err());
}
