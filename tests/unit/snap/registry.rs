use super::*;
use crate::foundation::core::{PixelRange, SectionId};

fn seg(id: u32, start: f64, end: f64) -> PinnedSegment {
    PinnedSegment::new(SectionId(id), PixelRange::new(start, end).unwrap()).unwrap()
}

fn two_ranges() -> SnapEngine {
    // Centers at 0.2 and 0.6.
    SnapRegistry::from_segments(
        &[seg(0, 100.0, 300.0), seg(1, 500.0, 700.0)],
        1000.0,
        &SnapOpts::default(),
    )
}

#[test]
fn snaps_inside_band_and_passes_outside() {
    let engine = two_ranges();
    assert!((engine.snap_target(0.21) - 0.2).abs() < 1e-12);
    assert!((engine.snap_target(0.59) - 0.6).abs() < 1e-12);
    assert_eq!(engine.snap_target(0.40), 0.40);
    assert_eq!(engine.snap_target(0.0), 0.0);
    assert_eq!(engine.snap_target(0.95), 0.95);
}

#[test]
fn tolerance_band_edges_snap() {
    let engine = two_ranges();
    assert!((engine.snap_target(0.085) - 0.2).abs() < 1e-12);
    assert!((engine.snap_target(0.715) - 0.6).abs() < 1e-12);
    assert_eq!(engine.snap_target(0.075), 0.075);
}

#[test]
fn snap_is_a_fixed_point() {
    let engine = two_ranges();
    for i in 0..=1000 {
        let v = f64::from(i) / 1000.0;
        let once = engine.snap_target(v);
        assert_eq!(engine.snap_target(once).to_bits(), once.to_bits(), "v={v}");
    }
}

#[test]
fn ranges_sort_by_position_not_registration() {
    let engine = SnapRegistry::from_segments(
        &[
            seg(2, 900.0, 950.0),
            seg(0, 100.0, 150.0),
            seg(1, 500.0, 550.0),
        ],
        1000.0,
        &SnapOpts::default(),
    );
    let starts: Vec<f64> = engine.ranges().iter().map(|r| r.start).collect();
    assert_eq!(starts, vec![0.1, 0.5, 0.9]);
    let ids: Vec<SectionId> = engine.ranges().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![SectionId(0), SectionId(1), SectionId(2)]);
}

#[test]
fn overlapping_ranges_pick_nearest_center() {
    // [0.1, 0.5] center 0.3 and [0.4, 0.6] center 0.5.
    let engine = SnapRegistry::from_segments(
        &[seg(0, 100.0, 500.0), seg(1, 400.0, 600.0)],
        1000.0,
        &SnapOpts::default(),
    );
    assert!((engine.snap_target(0.42) - 0.5).abs() < 1e-12);
    assert!((engine.snap_target(0.35) - 0.3).abs() < 1e-12);
}

#[test]
fn equidistant_centers_prefer_earlier_range() {
    // Centers 0.375 and 0.625; 0.5 sits exactly between them and inside both bands.
    let engine = SnapRegistry::from_segments(
        &[seg(1, 512.0, 768.0), seg(0, 256.0, 512.0)],
        1024.0,
        &SnapOpts::default(),
    );
    assert_eq!(engine.snap_target(0.5), 0.375);
}

#[test]
fn empty_or_degenerate_input_is_identity() {
    let opts = SnapOpts::default();
    let none = SnapRegistry::from_segments(&[], 1000.0, &opts);
    let flat = SnapRegistry::from_segments(&[seg(0, 0.0, 100.0)], 0.0, &opts);
    for engine in [none, flat] {
        assert!(!engine.is_active());
        assert!(engine.ranges().is_empty());
        for v in [0.0, 0.02, 0.5, 1.0] {
            assert_eq!(engine.snap_target(v), v);
        }
    }
}

#[test]
fn band_gates_but_every_center_competes() {
    // A long range [0, 0.5] (center 0.25) next to a short one [0.52, 0.56] (center 0.54).
    let engine = SnapRegistry::from_segments(
        &[seg(0, 0.0, 500.0), seg(1, 520.0, 560.0)],
        1000.0,
        &SnapOpts::default(),
    );
    // Only the long range's band holds 0.49, yet the short range's center is nearer.
    assert!((engine.snap_target(0.49) - 0.54).abs() < 1e-12);
    assert!((engine.snap_target(0.2) - 0.25).abs() < 1e-12);
    assert_eq!(engine.snap_target(0.8), 0.8);
    for i in 0..=1000 {
        let v = f64::from(i) / 1000.0;
        let once = engine.snap_target(v);
        assert_eq!(engine.snap_target(once), once, "v={v}");
    }
}
