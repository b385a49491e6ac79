//! Box completion and padding inset

use serde::{Deserialize, Serialize};

use crate::geometry::{FrameRef, FrameRect, Size};

/// A box given by any subset of its six fields
///
/// Used for caller supplied viewport overrides, where a config may only name
/// `top` and `height`, say, and the rest is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialRect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl PartialRect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(mut self, left: f32) -> Self {
        self.left = Some(left);
        self
    }

    pub fn top(mut self, top: f32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn right(mut self, right: f32) -> Self {
        self.right = Some(right);
        self
    }

    pub fn bottom(mut self, bottom: f32) -> Self {
        self.bottom = Some(bottom);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Fill every missing field
    ///
    /// Size comes from the explicit size, else the edge pair, else
    /// `fallback`. A missing leading edge is derived from the trailing edge
    /// (or zero), and the trailing edge is always `leading + size`, so an
    /// explicit size wins over an inconsistent trailing edge. Completing a
    /// complete box returns it unchanged.
    pub fn complete(&self, fallback: Size) -> PartialRect {
        let (left, width) = complete_axis(self.left, self.right, self.width, fallback.width);
        let (top, height) = complete_axis(self.top, self.bottom, self.height, fallback.height);
        PartialRect {
            left: Some(left),
            top: Some(top),
            right: Some(left + width),
            bottom: Some(top + height),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Complete and convert into a rect in `frame`
    pub fn resolve(&self, fallback: Size, frame: Option<FrameRef>) -> FrameRect {
        let full = self.complete(fallback);
        FrameRect {
            left: full.left.unwrap_or_default(),
            top: full.top.unwrap_or_default(),
            right: full.right.unwrap_or_default(),
            bottom: full.bottom.unwrap_or_default(),
            frame,
        }
    }
}

fn complete_axis(lead: Option<f32>, trail: Option<f32>, size: Option<f32>, fallback: f32) -> (f32, f32) {
    let size = size
        .or(match (lead, trail) {
            (Some(l), Some(t)) => Some(t - l),
            _ => None,
        })
        .unwrap_or(fallback);
    let lead = lead.or(trail.map(|t| t - size)).unwrap_or(0.0);
    (lead, size)
}

impl From<&FrameRect> for PartialRect {
    fn from(rect: &FrameRect) -> Self {
        PartialRect {
            left: Some(rect.left),
            top: Some(rect.top),
            right: Some(rect.right),
            bottom: Some(rect.bottom),
            width: Some(rect.width()),
            height: Some(rect.height()),
        }
    }
}

/// Shrink `rect` symmetrically by `padding` on every edge
///
/// No padding (or zero) returns the rect unchanged. An axis too small for the
/// padding collapses to its midpoint rather than inverting.
pub fn inset(rect: &FrameRect, padding: Option<f32>) -> FrameRect {
    let padding = match padding {
        Some(p) if p != 0.0 && p.is_finite() => p,
        _ => return rect.clone(),
    };

    let (left, right) = inset_axis(rect.left, rect.right, padding);
    let (top, bottom) = inset_axis(rect.top, rect.bottom, padding);
    FrameRect {
        left,
        top,
        right,
        bottom,
        frame: rect.frame.clone(),
    }
}

fn inset_axis(lead: f32, trail: f32, padding: f32) -> (f32, f32) {
    if trail - lead - 2.0 * padding < 0.0 {
        let mid = (lead + trail) / 2.0;
        (mid, mid)
    } else {
        (lead + padding, trail - padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: Size = Size::new(120.0, 80.0);

    #[test]
    fn test_complete_from_edges() {
        let full = PartialRect::new().left(10.0).right(40.0).top(5.0).bottom(25.0).complete(FALLBACK);
        assert_eq!(full.width, Some(30.0));
        assert_eq!(full.height, Some(20.0));
    }

    #[test]
    fn test_complete_from_size() {
        let full = PartialRect::new().left(10.0).width(30.0).complete(FALLBACK);
        assert_eq!(full.right, Some(40.0));
        // vertical axis falls back entirely
        assert_eq!(full.top, Some(0.0));
        assert_eq!(full.height, Some(80.0));
        assert_eq!(full.bottom, Some(80.0));
    }

    #[test]
    fn test_complete_from_trailing_edge() {
        let full = PartialRect::new().right(100.0).bottom(50.0).height(10.0).complete(FALLBACK);
        assert_eq!(full.left, Some(-20.0));
        assert_eq!(full.width, Some(120.0));
        assert_eq!(full.top, Some(40.0));
    }

    #[test]
    fn test_complete_explicit_size_wins() {
        let full = PartialRect::new().left(0.0).right(10.0).width(4.0).complete(FALLBACK);
        assert_eq!(full.right, Some(4.0));
        assert_eq!(full.width, Some(4.0));
    }

    #[test]
    fn test_complete_idempotent() {
        let cases = [
            PartialRect::new(),
            PartialRect::new().left(3.0),
            PartialRect::new().right(9.5).width(2.25),
            PartialRect::new().top(1.0).bottom(0.0),
            PartialRect::new().left(0.0).right(10.0).width(4.0),
            PartialRect::new().bottom(-7.0).height(3.0).left(2.0).right(1.0),
        ];
        for case in cases {
            let once = case.complete(FALLBACK);
            assert_eq!(once.complete(FALLBACK), once);
            assert_eq!(once.complete(Size::ZERO), once);
        }
    }

    #[test]
    fn test_resolve_round_trip_with_rect() {
        let rect = FrameRect::new(1.0, 2.0, 11.0, 22.0);
        let partial = PartialRect::from(&rect);
        assert_eq!(partial.resolve(Size::ZERO, None), rect);
    }

    #[test]
    fn test_inset_shrinks_symmetrically() {
        let rect = FrameRect::new(0.0, 0.0, 100.0, 60.0);
        let r = inset(&rect, Some(10.0));
        assert_eq!((r.left, r.top, r.right, r.bottom), (10.0, 10.0, 90.0, 50.0));
        assert_eq!((r.width(), r.height()), (80.0, 40.0));
    }

    #[test]
    fn test_inset_without_padding() {
        let rect = FrameRect::new(0.0, 0.0, 100.0, 60.0);
        assert_eq!(inset(&rect, None), rect);
        assert_eq!(inset(&rect, Some(0.0)), rect);
    }

    #[test]
    fn test_inset_oversized_padding_collapses() {
        let rect = FrameRect::new(0.0, 0.0, 100.0, 20.0);
        let r = inset(&rect, Some(15.0));
        // horizontal axis still fits
        assert_eq!((r.left, r.right), (15.0, 85.0));
        // vertical axis collapses to its midpoint
        assert_eq!((r.top, r.bottom), (10.0, 10.0));
        assert_eq!(r.height(), 0.0);
    }
}
