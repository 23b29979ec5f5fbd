//! Scroll choreography engine for single-page sites.
//!
//! Sections of a page either **pin** (lock to the viewport for a distance proportional to the
//! viewport height while a progress timeline plays) or **reveal** (animate in as they cross
//! viewport trigger lines). Once layout has settled, the pinned ranges are normalized into a
//! [`SnapRegistry`] that pulls the end of a scroll gesture onto the nearest pinned section's
//! center.
//!
//! # Flow
//!
//! 1. **Register**: add sections to a [`Choreographer`] (or build one from a [`PageLayout`]).
//! 2. **Mount**: arm deferred discovery and keep the returned [`DiscoveryTicket`].
//! 3. **Layout**: feed measured [`SectionExtent`]s; pins are requested from the [`ScrollDriver`].
//! 4. **Tick**: per scroll tick, evaluate every timeline into an [`AnimationFrameState`].
//! 5. **Snap**: at gesture end, hand a [`SnapRequest`] to the driver.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure timelines**: evaluation depends only on progress, so any scroll position renders the
//!   same frame no matter how it was reached.
//! - **Single writer**: the engine never moves the scroll position except through one in-flight
//!   snap settle, which yields to user input.
//! - **Graceful fallback**: reduced motion and narrow viewports render every section settled.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod driver;
mod foundation;
mod page;
mod section;
mod snap;

pub use animation::dsl::{TimelineBuilder, stagger};
pub use animation::ease::Ease;
pub use animation::segment::{ProgressRange, Segment, SegmentLabel, Tween};
pub use animation::state::{AnimationFrameState, ElementState};
pub use animation::timeline::{ProgressTimeline, TimelineDef};
pub use driver::boundary::{ScrollDriver, ScrollTick};
pub use driver::sim::{DriverCall, SimDriver};
pub use foundation::core::{PixelRange, SectionExtent, SectionId, Vec2, Viewport};
pub use foundation::error::{ChoreoError, ChoreoResult};
pub use page::choreographer::{Choreographer, FrameBatch, ScrollControl, SectionFrame};
pub use page::model::{ChoreoOpts, PageLayout, SectionDef, SectionKind};
pub use section::config::{Environment, MotionMode, PinOpts};
pub use section::pinned::{PinPhase, PinnedSectionController};
pub use section::reveal::{RevealController, RevealPhase, RevealTrigger};
pub use snap::discovery::{DiscoveryOpts, DiscoveryTicket};
pub use snap::range::{NormalizedRange, PinnedSegment};
pub use snap::registry::{SnapEngine, SnapRegistry};
pub use snap::settle::{SnapOpts, SnapRequest};
