use crate::{
    driver::boundary::ScrollDriver,
    snap::{
        range::{NormalizedRange, PinnedSegment},
        settle::SnapOpts,
    },
};

/// Ordered snap ranges for one page layout.
///
/// Owned by the page controller and rebuilt wholesale whenever the scrollable distance changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SnapRegistry {
    ranges: Vec<NormalizedRange>,
    tolerance: f64,
    max_scroll_px: f64,
}

/// The installed snapping behavior.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum SnapEngine {
    /// No pinned segments, or nothing to scroll: every value is left as-is.
    PassThrough,
    /// Snapping toward pinned-section centers.
    Active(SnapRegistry),
}

impl SnapRegistry {
    /// Normalize `segments` against `max_scroll_px`, in any registration order.
    pub fn from_segments(
        segments: &[PinnedSegment],
        max_scroll_px: f64,
        opts: &SnapOpts,
    ) -> SnapEngine {
        if segments.is_empty() {
            tracing::debug!("no pinned segments; snapping disabled");
            return SnapEngine::PassThrough;
        }

        let mut ranges = Vec::with_capacity(segments.len());
        for seg in segments {
            match NormalizedRange::from_segment(seg, max_scroll_px) {
                Ok(r) => ranges.push(r),
                Err(err) => {
                    tracing::debug!(%err, "snapping disabled");
                    return SnapEngine::PassThrough;
                }
            }
        }
        ranges.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.id.cmp(&b.id)));

        SnapEngine::Active(Self {
            ranges,
            tolerance: opts.tolerance,
            max_scroll_px,
        })
    }

    /// Build from whatever the driver currently has pinned.
    pub fn discover(driver: &dyn ScrollDriver, opts: &SnapOpts) -> SnapEngine {
        let segments = driver.pinned_ranges();
        let max_scroll_px = driver.metrics().max_scroll_px;
        Self::from_segments(&segments, max_scroll_px, opts)
    }

    /// Ranges sorted ascending by start.
    pub fn ranges(&self) -> &[NormalizedRange] {
        &self.ranges
    }

    /// Scrollable distance the ranges were normalized against.
    pub fn max_scroll_px(&self) -> f64 {
        self.max_scroll_px
    }

    /// Snap `value` (a scroll fraction) to the nearest range center, or return it unchanged when
    /// it lies outside every tolerance-expanded range.
    ///
    /// Being inside any band is only the gate: once it passes, every range competes on center
    /// distance. Ties go to the earlier range.
    pub fn snap_target(&self, value: f64) -> f64 {
        let in_band = self
            .ranges
            .iter()
            .any(|r| r.contains_within(value, self.tolerance));
        if !in_band {
            return value;
        }
        let mut best: Option<&NormalizedRange> = None;
        for r in &self.ranges {
            match best {
                Some(b) if (r.center - value).abs() >= (b.center - value).abs() => {}
                _ => best = Some(r),
            }
        }
        best.map_or(value, |r| r.center)
    }
}

impl SnapEngine {
    /// Snap `value`; identity when passing through.
    pub fn snap_target(&self, value: f64) -> f64 {
        match self {
            Self::PassThrough => value,
            Self::Active(reg) => reg.snap_target(value),
        }
    }

    /// True when snapping is installed.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Normalized ranges; empty when passing through.
    pub fn ranges(&self) -> &[NormalizedRange] {
        match self {
            Self::PassThrough => &[],
            Self::Active(reg) => reg.ranges(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snap/registry.rs"]
mod tests;
