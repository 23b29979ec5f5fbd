use super::*;

#[test]
fn builder_places_tweens_in_canonical_bands() {
    let tl = TimelineBuilder::new()
        .enter("header", ElementState::hidden().offset(0.0, -0.1), Ease::OutCubic)
        .leave("header", ElementState::hidden().offset(0.0, -0.18), Ease::InCubic)
        .build()
        .unwrap();
    let labels: Vec<_> = tl.segments().iter().map(|s| s.label.clone()).collect();
    assert_eq!(labels, vec![SegmentLabel::Entrance, SegmentLabel::Exit]);
    assert_eq!(tl.segments()[0].range, ProgressRange::ENTRANCE);
    assert_eq!(tl.segments()[1].range, ProgressRange::EXIT);
}

#[test]
fn exit_only_timeline_is_settled_before_exit() {
    let tl = TimelineBuilder::new()
        .leave("cta", ElementState::hidden().offset(0.0, 0.1), Ease::InCubic)
        .build()
        .unwrap();
    assert!(tl.evaluate(0.0).is_settled());
    assert!(tl.evaluate(0.69).is_settled());
    assert!(!tl.evaluate(0.85).is_settled());
}

#[test]
fn stagger_assigns_increasing_delays() {
    let tweens = stagger(
        vec![
            Tween::enter("line0", ElementState::hidden()),
            Tween::enter("line1", ElementState::hidden()),
            Tween::enter("line2", ElementState::hidden()),
        ],
        0.05,
        0.02,
    );
    let delays: Vec<f64> = tweens.iter().map(|t| t.delay).collect();
    assert_eq!(delays[0], 0.05);
    assert!((delays[1] - 0.07).abs() < 1e-12);
    assert!((delays[2] - 0.09).abs() < 1e-12);

    let tl = TimelineBuilder::new()
        .segment(SegmentLabel::Entrance, ProgressRange::ENTRANCE, tweens)
        .build()
        .unwrap();
    let f = tl.evaluate(0.06);
    assert!(f.get("line0").unwrap().opacity > f.get("line1").unwrap().opacity);
    assert_eq!(f.get("line2").unwrap().opacity, 0.0);
}

#[test]
fn empty_builder_yields_empty_timeline() {
    let tl = TimelineBuilder::new().build().unwrap();
    assert_eq!(tl.element_keys().count(), 0);
}
