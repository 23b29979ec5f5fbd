use super::*;

#[test]
fn lerp_endpoints_match_inputs() {
    let a = ElementState::hidden().offset(-0.6, 0.0).scale(0.96);
    let b = ElementState::SETTLED;
    assert_eq!(ElementState::lerp(&a, &b, 0.0), a);
    assert_eq!(ElementState::lerp(&a, &b, 1.0), b);
}

#[test]
fn lerp_midpoint_blends_every_channel() {
    let a = ElementState::hidden()
        .offset(-0.5, 0.2)
        .scale(0.9)
        .rotation_deg(-2.0);
    let m = ElementState::lerp(&a, &ElementState::SETTLED, 0.5);
    assert_eq!(m.offset, Vec2::new(-0.25, 0.1));
    assert_eq!(m.opacity, 0.5);
    assert!((m.scale - 0.95).abs() < 1e-12);
    assert_eq!(m.rotation_deg, -1.0);
}

#[test]
fn offset_resolves_against_viewport() {
    let s = ElementState::SETTLED.offset(-0.12, 0.1);
    let px = s.offset_px(Viewport {
        width: 1000.0,
        height: 800.0,
    });
    assert!((px.x + 120.0).abs() < 1e-9);
    assert!((px.y - 80.0).abs() < 1e-9);
}

#[test]
fn settled_frame_lists_every_key() {
    let f = AnimationFrameState::settled(["image", "headline"]);
    assert_eq!(f.elements.len(), 2);
    assert!(f.is_settled());
    assert_eq!(f.get("image"), Some(&ElementState::SETTLED));
}

#[test]
fn missing_fields_deserialize_as_settled() {
    let s: ElementState = serde_json::from_str(r#"{"opacity":0.0}"#).unwrap();
    assert_eq!(s, ElementState::hidden());
}
