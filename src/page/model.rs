use crate::{
    animation::timeline::ProgressTimeline,
    foundation::{
        core::{SectionExtent, SectionId, Viewport},
        error::{ChoreoError, ChoreoResult},
    },
    page::choreographer::Choreographer,
    section::{config::Environment, config::PinOpts, reveal::RevealTrigger},
    snap::{discovery::DiscoveryOpts, settle::SnapOpts},
};

/// Engine configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChoreoOpts {
    /// Pinned-section options.
    pub pin: PinOpts,
    /// Snap controller options.
    pub snap: SnapOpts,
    /// Discovery scheduling options.
    pub discovery: DiscoveryOpts,
}

impl ChoreoOpts {
    /// Validate every option group.
    pub fn validate(&self) -> ChoreoResult<()> {
        self.pin.validate()?;
        self.snap.validate()?;
        Ok(())
    }
}

/// Serializable description of a laid-out page: what the host measured plus section timelines.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageLayout {
    /// Viewport at measurement time.
    pub viewport: Viewport,
    /// Full document height, pin spacing included.
    pub document_height_px: f64,
    /// Reduced-motion preference at measurement time.
    #[serde(default)]
    pub reduced_motion: bool,
    /// Engine options.
    #[serde(default)]
    pub opts: ChoreoOpts,
    /// Sections in document order.
    pub sections: Vec<SectionDef>,
}

/// One section of a [`PageLayout`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SectionDef {
    /// Authoring name, unique within the page.
    pub name: String,
    /// Measured extent.
    pub extent: SectionExtent,
    /// Behavior.
    pub kind: SectionKind,
}

/// How a section participates in scroll choreography.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum SectionKind {
    /// Pins for a viewport-relative distance while its timeline plays.
    Pinned {
        /// Progress timeline.
        timeline: ProgressTimeline,
    },
    /// Free-scrolling reveal.
    Reveal {
        /// Trigger lines.
        #[serde(default)]
        trigger: RevealTrigger,
        /// Progress timeline.
        timeline: ProgressTimeline,
    },
    /// Plain content; no animation.
    Static,
}

impl PageLayout {
    /// Parse and validate a page description.
    pub fn from_json(s: &str) -> ChoreoResult<Self> {
        let page: Self = serde_json::from_str(s)?;
        page.validate()?;
        Ok(page)
    }

    /// Check document geometry, names and options.
    pub fn validate(&self) -> ChoreoResult<()> {
        self.opts.validate()?;
        Viewport::new(self.viewport.width, self.viewport.height)?;
        if !self.document_height_px.is_finite() || self.document_height_px < 0.0 {
            return Err(ChoreoError::validation("document_height_px must be finite and >= 0"));
        }

        let mut names = std::collections::BTreeSet::new();
        for s in &self.sections {
            if s.name.trim().is_empty() {
                return Err(ChoreoError::validation("section name must be non-empty"));
            }
            if !names.insert(s.name.as_str()) {
                return Err(ChoreoError::validation(format!(
                    "duplicate section name '{}'",
                    s.name
                )));
            }
            if !(s.extent.top_px.is_finite() && s.extent.height_px.is_finite())
                || s.extent.height_px < 0.0
            {
                return Err(ChoreoError::validation(format!(
                    "section '{}' has an invalid extent",
                    s.name
                )));
            }
            if let SectionKind::Reveal { trigger, .. } = &s.kind {
                trigger.validate()?;
            }
        }
        Ok(())
    }

    /// Total scrollable distance.
    pub fn max_scroll_px(&self) -> f64 {
        (self.document_height_px - self.viewport.height).max(0.0)
    }

    /// Environment signals for this layout.
    pub fn environment(&self) -> Environment {
        Environment {
            viewport: self.viewport,
            reduced_motion: self.reduced_motion,
        }
    }

    /// Build a choreographer with every animated section registered, plus the measured extents
    /// to feed into its first layout pass. Static sections are skipped.
    pub fn build(&self) -> ChoreoResult<(Choreographer, Vec<(SectionId, SectionExtent)>)> {
        self.validate()?;
        let mut choreo = Choreographer::new(self.opts)?;
        let mut extents = Vec::with_capacity(self.sections.len());
        for s in &self.sections {
            let id = match &s.kind {
                SectionKind::Pinned { timeline } => {
                    choreo.add_pinned(s.name.clone(), timeline.clone())
                }
                SectionKind::Reveal { trigger, timeline } => {
                    choreo.add_reveal(s.name.clone(), *trigger, timeline.clone())?
                }
                SectionKind::Static => continue,
            };
            extents.push((id, s.extent));
        }
        Ok((choreo, extents))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
