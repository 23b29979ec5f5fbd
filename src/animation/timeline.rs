use std::collections::BTreeMap;

use crate::{
    animation::{
        ease::Ease,
        segment::{ProgressRange, Segment},
        state::{AnimationFrameState, ElementState, Lerp},
    },
    foundation::error::{ChoreoError, ChoreoResult},
    foundation::math::{clamp_unit, inverse_lerp_clamped},
};

/// Serialized form of a [`ProgressTimeline`]: just its segments.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TimelineDef {
    /// Labeled segments, in any order.
    pub segments: Vec<Segment>,
}

/// Pure mapping from section progress to per-element animation state.
///
/// Built from labeled [`Segment`]s. Each element's tweens are flattened into non-overlapping
/// windows sorted by start, so evaluation is a binary search plus one interpolation per element.
/// Outside every window an element holds the nearest boundary state. Every element is settled
/// across [`ProgressRange::HOLD`]; timelines that animate there are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TimelineDef", into = "TimelineDef")]
pub struct ProgressTimeline {
    segments: Vec<Segment>,
    tracks: BTreeMap<String, Vec<Window>>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Window {
    start: f64,
    end: f64,
    from: ElementState,
    to: ElementState,
    ease: Ease,
}

impl Window {
    fn sample(&self, progress: f64) -> ElementState {
        let t = inverse_lerp_clamped(self.start, self.end, progress);
        ElementState::lerp(&self.from, &self.to, self.ease.apply(t))
    }
}

impl ProgressTimeline {
    /// Validate and compile a set of segments.
    pub fn new(mut segments: Vec<Segment>) -> ChoreoResult<Self> {
        for seg in &segments {
            seg.validate()?;
        }
        segments.sort_by(|a, b| a.range.start.total_cmp(&b.range.start));

        let mut tracks: BTreeMap<String, Vec<Window>> = BTreeMap::new();
        for seg in &segments {
            for tw in &seg.tweens {
                tracks.entry(tw.element.clone()).or_default().push(Window {
                    start: seg.range.start + tw.delay,
                    end: seg.range.end,
                    from: tw.from,
                    to: tw.to,
                    ease: tw.ease,
                });
            }
        }

        for (key, windows) in tracks.iter_mut() {
            windows.sort_by(|a, b| a.start.total_cmp(&b.start));
            if let Some(w) = windows.windows(2).find(|w| w[0].end > w[1].start) {
                return Err(ChoreoError::timeline(format!(
                    "element '{key}' has overlapping tweens ([{}, {}] and [{}, {}])",
                    w[0].start, w[0].end, w[1].start, w[1].end
                )));
            }
        }

        // Every element rests settled across the hold band.
        let hold = ProgressRange::HOLD;
        for (key, windows) in &tracks {
            if let Some(w) = windows.iter().find(|w| w.start < hold.end && w.end > hold.start) {
                return Err(ChoreoError::timeline(format!(
                    "element '{key}' animates inside the hold band ([{}, {}])",
                    w.start, w.end
                )));
            }
            if !(sample_track(windows, hold.start).is_settled()
                && sample_track(windows, hold.end).is_settled())
            {
                return Err(ChoreoError::timeline(format!(
                    "element '{key}' is not settled across the hold band"
                )));
            }
        }

        Ok(Self { segments, tracks })
    }

    /// A timeline with no segments; evaluates to an empty frame.
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            tracks: BTreeMap::new(),
        }
    }

    /// Segments sorted by band start.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Keys of every animated element, in key order.
    pub fn element_keys(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    /// Evaluate every element at `progress`. Input outside `[0, 1]` is saturated.
    pub fn evaluate(&self, progress: f64) -> AnimationFrameState {
        let p = clamp_unit(progress);
        let elements = self
            .tracks
            .iter()
            .map(|(key, windows)| (key.clone(), sample_track(windows, p)))
            .collect();
        AnimationFrameState { elements }
    }

    /// The static mid-hold frame used when pinning is disabled or released.
    pub fn settled(&self) -> AnimationFrameState {
        AnimationFrameState::settled(self.element_keys())
    }
}

fn sample_track(windows: &[Window], p: f64) -> ElementState {
    let idx = windows.partition_point(|w| w.start <= p);
    if idx == 0 {
        return windows
            .first()
            .map(|w| w.from)
            .unwrap_or(ElementState::SETTLED);
    }
    let w = &windows[idx - 1];
    if p >= w.end { w.to } else { w.sample(p) }
}

impl TryFrom<TimelineDef> for ProgressTimeline {
    type Error = ChoreoError;

    fn try_from(def: TimelineDef) -> Result<Self, Self::Error> {
        Self::new(def.segments)
    }
}

impl From<ProgressTimeline> for TimelineDef {
    fn from(tl: ProgressTimeline) -> Self {
        Self {
            segments: tl.segments,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
