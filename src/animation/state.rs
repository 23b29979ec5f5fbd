use std::collections::BTreeMap;

use crate::foundation::core::{Vec2, Viewport};

/// Interpolation contract for element state values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        crate::foundation::math::lerp(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Visual state of one animated element.
///
/// `offset` is expressed in viewport units: `x` as a fraction of the viewport width and `y` as a
/// fraction of the viewport height, so a timeline stays valid across resizes. Use
/// [`ElementState::offset_px`] to resolve it for a concrete viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementState {
    /// Translation in viewport units.
    #[serde(default)]
    pub offset: Vec2,
    /// Opacity in `[0, 1]`.
    #[serde(default = "one")]
    pub opacity: f64,
    /// Uniform scale factor.
    #[serde(default = "one")]
    pub scale: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation_deg: f64,
}

fn one() -> f64 {
    1.0
}

impl ElementState {
    /// The mid-hold state: fully visible, untransformed.
    pub const SETTLED: ElementState = ElementState {
        offset: Vec2::ZERO,
        opacity: 1.0,
        scale: 1.0,
        rotation_deg: 0.0,
    };

    /// Settled state with zero opacity; the usual starting point for builder chains.
    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            ..Self::SETTLED
        }
    }

    /// Replace the translation (viewport units).
    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Replace the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Replace the scale.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the rotation.
    pub fn rotation_deg(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    /// True when this is exactly the settled state.
    pub fn is_settled(&self) -> bool {
        *self == Self::SETTLED
    }

    /// Translation resolved to pixels for `viewport`.
    pub fn offset_px(&self, viewport: Viewport) -> Vec2 {
        Vec2::new(self.offset.x * viewport.width, self.offset.y * viewport.height)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.offset.is_finite()
            && self.opacity.is_finite()
            && self.scale.is_finite()
            && self.rotation_deg.is_finite()
    }
}

impl Default for ElementState {
    fn default() -> Self {
        Self::SETTLED
    }
}

impl Lerp for ElementState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            offset: <Vec2 as Lerp>::lerp(&a.offset, &b.offset, t),
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t).clamp(0.0, 1.0),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
            rotation_deg: <f64 as Lerp>::lerp(&a.rotation_deg, &b.rotation_deg, t),
        }
    }
}

/// Per-element states for one section at one progress value, keyed by element key.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationFrameState {
    /// Element states in key order.
    pub elements: BTreeMap<String, ElementState>,
}

impl AnimationFrameState {
    /// Frame where every listed element is settled.
    pub fn settled<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            elements: keys
                .into_iter()
                .map(|k| (k.to_owned(), ElementState::SETTLED))
                .collect(),
        }
    }

    /// State of one element, if the frame contains it.
    pub fn get(&self, key: &str) -> Option<&ElementState> {
        self.elements.get(key)
    }

    /// True when every element is settled.
    pub fn is_settled(&self) -> bool {
        self.elements.values().all(ElementState::is_settled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
