/// Saturate `t` into `[0, 1]`. NaN maps to 0 so callers never observe it.
pub(crate) fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` inside `[a, b]` as a clamped fraction. A zero-length span is a step at `a`.
pub(crate) fn inverse_lerp_clamped(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if span <= 0.0 {
        return if v >= a { 1.0 } else { 0.0 };
    }
    clamp_unit((v - a) / span)
}
