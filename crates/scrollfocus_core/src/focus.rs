//! Scroll focus across nested scroll containers
//!
//! Containers are supplied root to descendant and processed descendant
//! first. Each container strictly interleaves measure, compute and scroll:
//! the target is re-measured before every container because scrolling an
//! inner container (or the page) moves it.
//!
//! # Example
//!
//! ```rust,ignore
//! use scrollfocus_core::prelude::*;
//!
//! let config = FocusConfig::default().point("left middle").padding(8.0);
//! let report = scroll_focus(&mut document, &[window, sidebar], &FocusTarget::Element(item), &config)?;
//! for step in &report.steps {
//!     println!("{:?} scrolled by {:?}", step.container, step.delta);
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::delta::{scroll_delta, ScrollDelta};
use crate::error::Result;
use crate::geometry::{FrameRect, Point};
use crate::inset::{inset, PartialRect};
use crate::point_spec::{reduce, PointSpec};
use crate::provider::FrameProvider;
use crate::range::{repair_range_bounds, RepairOutcome, TextRange};

/// What to reveal
#[derive(Clone, Debug, PartialEq)]
pub enum FocusTarget<N> {
    /// An element's box
    Element(N),
    /// A text selection
    Range(TextRange<N>),
    /// A point in an element's box coordinates
    Point { anchor: N, point: Point },
}

/// Options for a focus call
///
/// Passed explicitly into every call; there are no process-wide defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Part of the target to aim at (None = `"left top"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<PointSpec>,
    /// Part of the viewport to aim into (None = the whole viewport)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_point: Option<PointSpec>,
    /// Inset applied to every viewport edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    /// Visible region override, relative to the container's visible top-left
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<PartialRect>,
}

impl FocusConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target anchor
    pub fn point(mut self, spec: impl Into<PointSpec>) -> Self {
        self.point = Some(spec.into());
        self
    }

    /// Set the viewport anchor
    pub fn to_point(mut self, spec: impl Into<PointSpec>) -> Self {
        self.to_point = Some(spec.into());
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn viewport(mut self, viewport: PartialRect) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Fill unset fields from `defaults`
    pub fn or(self, defaults: &FocusConfig) -> Self {
        Self {
            point: self.point.or(defaults.point),
            to_point: self.to_point.or(defaults.to_point),
            padding: self.padding.or(defaults.padding),
            viewport: self.viewport.or(defaults.viewport),
        }
    }

    /// Effective target anchor
    pub fn target_point(&self) -> PointSpec {
        self.point.unwrap_or(PointSpec::LEFT_TOP)
    }
}

/// One processed container
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollStep<N> {
    pub container: N,
    /// Container is the window
    pub window: bool,
    /// Reduced target box, in the viewport's frame
    pub target: FrameRect,
    /// Aim region after override, padding and reduction
    pub viewport: FrameRect,
    pub delta: ScrollDelta,
    /// Scroll offset before this step
    pub from: Point,
    /// Offset asked of the provider (`from + delta`)
    pub requested: Point,
    /// Offset after the step, as the provider applied it (hosts may clamp)
    pub to: Point,
}

impl<N> ScrollStep<N> {
    pub fn scrolled(&self) -> bool {
        !self.delta.is_zero()
    }
}

/// Everything a focus call did, in processing order
#[derive(Clone, Debug, PartialEq)]
pub struct FocusReport<N> {
    pub steps: Vec<ScrollStep<N>>,
}

impl<N> Default for FocusReport<N> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<N> FocusReport<N> {
    /// No container was processed
    pub fn is_noop(&self) -> bool {
        self.steps.is_empty()
    }

    /// Containers that actually scrolled
    pub fn scrolled(&self) -> impl Iterator<Item = &ScrollStep<N>> {
        self.steps.iter().filter(|s| s.scrolled())
    }
}

/// Bring `target` into view in each of `containers`
///
/// `containers` is ordered root to descendant. An empty list is a no-op. A
/// provider error aborts the remaining containers; scrolls already applied
/// stay applied.
pub fn scroll_focus<P: FrameProvider>(
    provider: &mut P,
    containers: &[P::Node],
    target: &FocusTarget<P::Node>,
    config: &FocusConfig,
) -> Result<FocusReport<P::Node>> {
    let mut report = FocusReport::default();
    if containers.is_empty() {
        debug!("scroll_focus: no containers, nothing to do");
        return Ok(report);
    }

    let target_point = config.target_point();

    for container in containers.iter().rev() {
        let target_abs = measure_target(provider, target)?;
        let viewport = provider.measure_viewport(container)?;
        let frame = viewport.visible.frame.clone();

        let visible = match &config.viewport {
            Some(region) => region
                .resolve(viewport.visible.size(), frame.clone())
                .translate(viewport.visible.left, viewport.visible.top),
            None => viewport.visible.clone(),
        };
        let aim = reduce(&inset(&visible, config.padding), config.to_point.as_ref());
        let aimed_target = target_point.reduce(&target_abs.relative_to(frame.as_ref()));

        let delta = scroll_delta(&aimed_target, &aim);
        let from = viewport.scroll;
        let requested = Point::new(from.x + delta.x, from.y + delta.y);
        let window = provider.is_window_like(container);

        trace!("target {} aim {}", aimed_target, aim);
        let to = if delta.is_zero() {
            debug!(?container, "target already in view");
            from
        } else {
            debug!(
                ?container,
                window,
                dx = delta.x,
                dy = delta.y,
                "scrolling to ({}, {})",
                requested.x,
                requested.y
            );
            provider.scroll_to(container, requested.x, requested.y)?;
            provider.measure_viewport(container)?.scroll
        };

        report.steps.push(ScrollStep {
            container: container.clone(),
            window,
            target: aimed_target,
            viewport: aim,
            delta,
            from,
            requested,
            to,
        });
    }

    Ok(report)
}

/// Current window-coordinate box of the target
pub fn measure_target<P: FrameProvider>(
    provider: &P,
    target: &FocusTarget<P::Node>,
) -> Result<FrameRect> {
    match target {
        FocusTarget::Element(node) => Ok(provider.measure_box(node)?.absolute()),
        FocusTarget::Range(range) => match repair_range_bounds(provider, range)? {
            RepairOutcome::Measured(rect) => Ok(rect.absolute()),
            RepairOutcome::Fallback(element) => {
                warn!(?element, "using element box for unmeasurable range");
                Ok(provider.measure_box(&element)?.absolute())
            }
        },
        FocusTarget::Point { anchor, point } => {
            let anchor_box = provider.measure_box(anchor)?.absolute();
            let left = anchor_box.left + point.x;
            let top = anchor_box.top + point.y;
            Ok(FrameRect::new(left, top, left, top))
        }
    }
}
