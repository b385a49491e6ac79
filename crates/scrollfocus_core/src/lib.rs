//! Scrollfocus Core
//!
//! Minimal scroll targeting for nested scroll containers:
//!
//! - **Frame geometry**: boxes and points in chained frames of reference
//! - **Point specs**: `"left top"`, `"center middle"` anchor reduction
//! - **Range repair**: usable bounds for degenerate text selections
//! - **Scroll delta**: the smallest per-axis adjustment that reveals a target
//! - **Focus**: the measure, compute, scroll loop across containers
//!
//! Documents are reached only through the [`FrameProvider`] trait.
//!
//! # Example
//!
//! ```rust
//! use scrollfocus_core::{scroll_delta, FrameRect, PointSpec, ScrollDelta};
//!
//! let target = PointSpec::LEFT_TOP.reduce(&FrameRect::new(0.0, 0.0, 10.0, 10.0));
//! let viewport = FrameRect::new(50.0, 0.0, 150.0, 100.0);
//! assert_eq!(scroll_delta(&target, &viewport), ScrollDelta::new(-50.0, 0.0));
//! ```

pub mod delta;
pub mod error;
pub mod focus;
pub mod geometry;
pub mod inset;
pub mod point_spec;
pub mod provider;
pub mod range;

pub use delta::{axis_delta, scroll_delta, ScrollDelta};
pub use error::{FocusError, Result};
pub use focus::{measure_target, scroll_focus, FocusConfig, FocusReport, FocusTarget, ScrollStep};
pub use geometry::{
    absolute_origin, Frame, FrameChain, FramePoint, FrameRect, FrameRef, OffsetFrame, Point,
    RootFrame, ScrollFrame, Size,
};
pub use inset::{inset, PartialRect};
pub use point_spec::{reduce, HorizontalAnchor, PointSpec, VerticalAnchor};
pub use provider::{FrameProvider, Viewport};
pub use range::{repair_range_bounds, Boundary, RepairOutcome, TextRange};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{FocusError, Result};
    pub use crate::focus::{scroll_focus, FocusConfig, FocusReport, FocusTarget, ScrollStep};
    pub use crate::geometry::{Frame, FramePoint, FrameRect, FrameRef, Point, Size};
    pub use crate::inset::PartialRect;
    pub use crate::point_spec::PointSpec;
    pub use crate::provider::{FrameProvider, Viewport};
    pub use crate::range::{Boundary, TextRange};
}
