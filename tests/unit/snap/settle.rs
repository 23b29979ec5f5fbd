use super::*;
use crate::foundation::core::Viewport;

fn tick(scroll_px: f64) -> ScrollTick {
    ScrollTick {
        scroll_px,
        max_scroll_px: 10_000.0,
        viewport: Viewport {
            width: 1440.0,
            height: 900.0,
        },
    }
}

#[test]
fn no_request_when_already_on_target() {
    let opts = SnapOpts::default();
    assert!(plan_settle(&tick(2000.0), 0.2, &opts).is_none());
    assert!(plan_settle(&tick(2000.3), 0.2, &opts).is_none());
}

#[test]
fn duration_scales_with_travel_inside_window() {
    let opts = SnapOpts::default();
    let short = plan_settle(&tick(1990.0), 0.2, &opts).unwrap();
    let long = plan_settle(&tick(500.0), 0.2, &opts).unwrap();
    assert!(short.duration >= Duration::from_secs_f64(0.35));
    assert!(short.duration < long.duration);
    assert_eq!(long.duration, Duration::from_secs_f64(0.65));
    assert_eq!(long.target_px, 2000.0);
    assert_eq!(long.ease, Ease::InOutCubic);
}

#[test]
fn degenerate_scroll_never_plans() {
    let mut t = tick(0.0);
    t.max_scroll_px = 0.0;
    assert!(plan_settle(&t, 0.5, &SnapOpts::default()).is_none());
}

#[test]
fn inverted_duration_window_is_invalid() {
    let opts = SnapOpts {
        duration_min_secs: 1.0,
        duration_max_secs: 0.5,
        ..SnapOpts::default()
    };
    assert!(opts.validate().is_err());
    assert!(SnapOpts::default().validate().is_ok());
}
