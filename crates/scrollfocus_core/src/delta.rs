//! Minimal scroll delta
//!
//! Scroll only as far as needed, never past, never in the wrong direction.
//! Both boxes must be expressed in the same frame.

use crate::geometry::FrameRect;

/// Per-axis scroll adjustment, added to the container's scroll offset
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollDelta {
    pub x: f32,
    pub y: f32,
}

impl ScrollDelta {
    pub const ZERO: ScrollDelta = ScrollDelta { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Delta on one axis
///
/// A target starting before the viewport may only scroll backwards (its
/// trailing edge meets the viewport's leading edge). Otherwise it may only
/// scroll forwards (its leading edge meets the viewport's trailing edge).
pub fn axis_delta(target_lead: f32, target_trail: f32, view_lead: f32, view_trail: f32) -> f32 {
    if target_lead < view_lead {
        (target_trail - view_lead).min(0.0)
    } else {
        (target_lead - view_trail).max(0.0)
    }
}

/// Delta on both axes for `target` against `viewport`
pub fn scroll_delta(target: &FrameRect, viewport: &FrameRect) -> ScrollDelta {
    ScrollDelta {
        x: axis_delta(target.left, target.right, viewport.left, viewport.right),
        y: axis_delta(target.top, target.bottom, viewport.top, viewport.bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_spec::PointSpec;

    fn viewport() -> FrameRect {
        FrameRect::new(50.0, 0.0, 150.0, 100.0)
    }

    #[test]
    fn test_target_before_viewport_reduced_to_point() {
        let target = PointSpec::LEFT_TOP.reduce(&FrameRect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(scroll_delta(&target, &viewport()), ScrollDelta::new(-50.0, 0.0));
    }

    #[test]
    fn test_contained_target_is_zero() {
        let target = PointSpec::LEFT_TOP.reduce(&FrameRect::new(60.0, 10.0, 70.0, 20.0));
        assert_eq!((target.left, target.top), (60.0, 10.0));
        assert!(scroll_delta(&target, &viewport()).is_zero());

        let cases = [
            FrameRect::new(50.0, 0.0, 150.0, 100.0),
            FrameRect::new(51.0, 1.0, 149.0, 99.0),
            FrameRect::new(100.0, 50.0, 100.0, 50.0),
        ];
        for target in cases {
            assert_eq!(scroll_delta(&target, &viewport()), ScrollDelta::ZERO);
        }
    }

    #[test]
    fn test_target_entirely_before_aligns_trailing_edge() {
        let cases = [(0.0, 10.0), (-300.0, -200.0), (20.0, 49.5)];
        for (lead, trail) in cases {
            let delta = axis_delta(lead, trail, 50.0, 150.0);
            assert!(delta <= 0.0);
            // scrolling by delta moves content by -delta
            assert_eq!(trail - delta, 50.0);
        }
    }

    #[test]
    fn test_target_entirely_after_aligns_leading_edge() {
        let delta = axis_delta(400.0, 420.0, 50.0, 150.0);
        assert_eq!(delta, 250.0);
        assert_eq!(400.0 - delta, 150.0);
    }

    #[test]
    fn test_straddling_target_aligns_nearer_edge() {
        // starts before, overlaps into the viewport: never scroll forward
        assert_eq!(axis_delta(40.0, 60.0, 50.0, 150.0), 0.0);
        // starts inside, runs past the trailing edge: leading edge is visible
        assert_eq!(axis_delta(140.0, 200.0, 50.0, 150.0), 0.0);
        // target larger than the viewport on both sides
        assert_eq!(axis_delta(0.0, 500.0, 50.0, 150.0), 0.0);
    }

    #[test]
    fn test_axes_are_independent() {
        let target = FrameRect::new(300.0, -80.0, 310.0, -70.0);
        assert_eq!(scroll_delta(&target, &viewport()), ScrollDelta::new(150.0, -70.0));
    }
}
