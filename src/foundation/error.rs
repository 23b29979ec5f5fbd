use crate::foundation::core::SectionId;

/// Convenience result type used across the choreography engine.
pub type ChoreoResult<T> = Result<T, ChoreoError>;

/// Top-level error taxonomy used by engine APIs.
///
/// `LayoutNotReady`, `DegenerateScrollRange` and `StaleRegistry` are invariant guards: the engine
/// resolves them locally (defer, pass-through, no-op) and never surfaces them to the page.
#[derive(thiserror::Error, Debug)]
pub enum ChoreoError {
    /// Invalid user-provided page, section or option data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A progress timeline declaration is inconsistent.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// A section was queried before it had a non-zero measured extent.
    #[error("layout not ready: section {section} has no measured extent yet")]
    LayoutNotReady {
        /// Section that has not been laid out.
        section: SectionId,
    },

    /// The document cannot scroll (`max_scroll == 0`).
    #[error("degenerate scroll range: max scroll is {max_scroll}")]
    DegenerateScrollRange {
        /// Reported total scrollable distance in pixels.
        max_scroll: f64,
    },

    /// A discovery callback fired after its page was torn down.
    #[error("stale registry access")]
    StaleRegistry,

    /// Errors when serializing or deserializing page data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChoreoError {
    /// Build a [`ChoreoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChoreoError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`ChoreoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for the internal guards that resolve on the next layout pass instead of failing.
    pub fn is_transient_guard(&self) -> bool {
        matches!(
            self,
            Self::LayoutNotReady { .. } | Self::DegenerateScrollRange { .. } | Self::StaleRegistry
        )
    }
}

impl From<serde_json::Error> for ChoreoError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
