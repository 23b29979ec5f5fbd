use crate::{
    animation::{
        ease::Ease,
        segment::{ProgressRange, Segment, SegmentLabel, Tween},
        state::ElementState,
        timeline::ProgressTimeline,
    },
    foundation::error::ChoreoResult,
};

/// Incremental builder for [`ProgressTimeline`].
///
/// ```
/// use scroll_choreo::{Ease, ElementState, TimelineBuilder};
///
/// let tl = TimelineBuilder::new()
///     .enter("image", ElementState::hidden().offset(-0.6, 0.0), Ease::OutCubic)
///     .leave("image", ElementState::hidden().offset(-0.18, 0.0), Ease::InCubic)
///     .build()
///     .unwrap();
/// assert!(tl.evaluate(0.5).is_settled());
/// ```
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    segments: Vec<Segment>,
    entrance: Vec<Tween>,
    exit: Vec<Tween>,
}

impl TimelineBuilder {
    /// Start an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entrance tween (canonical entrance band) ending in the settled state.
    pub fn enter(self, element: impl Into<String>, from: ElementState, ease: Ease) -> Self {
        self.enter_tween(Tween::enter(element, from).ease(ease))
    }

    /// Add a fully specified entrance tween.
    pub fn enter_tween(mut self, tween: Tween) -> Self {
        self.entrance.push(tween);
        self
    }

    /// Add an exit tween (canonical exit band) starting from the settled state.
    pub fn leave(self, element: impl Into<String>, to: ElementState, ease: Ease) -> Self {
        self.leave_tween(Tween::leave(element, to).ease(ease))
    }

    /// Add a fully specified exit tween.
    pub fn leave_tween(mut self, tween: Tween) -> Self {
        self.exit.push(tween);
        self
    }

    /// Add a custom segment as-is.
    pub fn segment(
        mut self,
        label: SegmentLabel,
        range: ProgressRange,
        tweens: Vec<Tween>,
    ) -> Self {
        self.segments.push(Segment {
            label,
            range,
            tweens,
        });
        self
    }

    /// Validate and compile the timeline.
    pub fn build(self) -> ChoreoResult<ProgressTimeline> {
        let mut segments = self.segments;
        if !self.entrance.is_empty() {
            segments.push(Segment {
                label: SegmentLabel::Entrance,
                range: ProgressRange::ENTRANCE,
                tweens: self.entrance,
            });
        }
        if !self.exit.is_empty() {
            segments.push(Segment {
                label: SegmentLabel::Exit,
                range: ProgressRange::EXIT,
                tweens: self.exit,
            });
        }
        ProgressTimeline::new(segments)
    }
}

/// Give each tween a delay of `offset + i * each`, in input order.
pub fn stagger(tweens: Vec<Tween>, offset: f64, each: f64) -> Vec<Tween> {
    tweens
        .into_iter()
        .enumerate()
        .map(|(i, tw)| tw.delay(offset + each * i as f64))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/dsl.rs"]
mod tests;
