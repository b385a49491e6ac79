//! Anchor point specifications
//!
//! A point spec is an unordered, whitespace separated token string drawn from
//! `left`, `right`, `center` (horizontal) and `top`, `bottom`, `middle`
//! (vertical). Each axis resolves independently: the last token for an axis
//! wins, and an axis without a token is left as is. Unknown tokens are
//! ignored.
//!
//! ```rust
//! use scrollfocus_core::{FrameRect, PointSpec};
//!
//! let spec: PointSpec = "right middle".parse().unwrap();
//! let reduced = spec.reduce(&FrameRect::new(0.0, 0.0, 10.0, 20.0));
//! assert_eq!((reduced.left, reduced.top), (10.0, 10.0));
//! assert_eq!((reduced.width(), reduced.height()), (0.0, 0.0));
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::FrameRect;

/// Horizontal anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

/// Vertical anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    Top,
    Middle,
    Bottom,
}

impl HorizontalAnchor {
    fn token(self) -> &'static str {
        match self {
            HorizontalAnchor::Left => "left",
            HorizontalAnchor::Center => "center",
            HorizontalAnchor::Right => "right",
        }
    }
}

impl VerticalAnchor {
    fn token(self) -> &'static str {
        match self {
            VerticalAnchor::Top => "top",
            VerticalAnchor::Middle => "middle",
            VerticalAnchor::Bottom => "bottom",
        }
    }
}

/// Parsed anchor point specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PointSpec {
    /// Horizontal anchor (None = axis untouched)
    pub horizontal: Option<HorizontalAnchor>,
    /// Vertical anchor (None = axis untouched)
    pub vertical: Option<VerticalAnchor>,
}

impl PointSpec {
    /// `"left top"`, the default anchor for a target
    pub const LEFT_TOP: PointSpec = PointSpec {
        horizontal: Some(HorizontalAnchor::Left),
        vertical: Some(VerticalAnchor::Top),
    };

    /// Spec with no axes, reduces nothing
    pub const NONE: PointSpec = PointSpec {
        horizontal: None,
        vertical: None,
    };

    pub const fn new(horizontal: Option<HorizontalAnchor>, vertical: Option<VerticalAnchor>) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Parse a token string, ignoring anything unrecognized
    pub fn parse(spec: &str) -> Self {
        let mut result = PointSpec::NONE;
        for token in spec.split_whitespace() {
            match token {
                "left" => result.horizontal = Some(HorizontalAnchor::Left),
                "center" => result.horizontal = Some(HorizontalAnchor::Center),
                "right" => result.horizontal = Some(HorizontalAnchor::Right),
                "top" => result.vertical = Some(VerticalAnchor::Top),
                "middle" => result.vertical = Some(VerticalAnchor::Middle),
                "bottom" => result.vertical = Some(VerticalAnchor::Bottom),
                other => tracing::trace!("ignoring unknown point token {:?}", other),
            }
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }

    /// Collapse each specified axis of `rect` to a single coordinate
    pub fn reduce(&self, rect: &FrameRect) -> FrameRect {
        let mut out = rect.clone();

        if let Some(h) = self.horizontal {
            let x = match h {
                HorizontalAnchor::Left => rect.left,
                HorizontalAnchor::Center => (rect.left + rect.right) / 2.0,
                HorizontalAnchor::Right => rect.right,
            };
            out.left = x;
            out.right = x;
        }

        if let Some(v) = self.vertical {
            let y = match v {
                VerticalAnchor::Top => rect.top,
                VerticalAnchor::Middle => (rect.top + rect.bottom) / 2.0,
                VerticalAnchor::Bottom => rect.bottom,
            };
            out.top = y;
            out.bottom = y;
        }

        out
    }
}

/// Reduce `rect` by an optional spec; an absent spec returns the rect unchanged
pub fn reduce(rect: &FrameRect, spec: Option<&PointSpec>) -> FrameRect {
    match spec {
        Some(spec) => spec.reduce(rect),
        None => rect.clone(),
    }
}

impl FromStr for PointSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PointSpec::parse(s))
    }
}

impl From<&str> for PointSpec {
    fn from(s: &str) -> Self {
        PointSpec::parse(s)
    }
}

impl From<String> for PointSpec {
    fn from(s: String) -> Self {
        PointSpec::parse(&s)
    }
}

impl From<PointSpec> for String {
    fn from(spec: PointSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for PointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.horizontal, self.vertical) {
            (Some(h), Some(v)) => write!(f, "{} {}", h.token(), v.token()),
            (Some(h), None) => f.write_str(h.token()),
            (None, Some(v)) => f.write_str(v.token()),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrameRect {
        FrameRect::new(10.0, 20.0, 50.0, 100.0)
    }

    #[test]
    fn test_parse_axes_independently() {
        let spec = PointSpec::parse("bottom right");
        assert_eq!(spec.horizontal, Some(HorizontalAnchor::Right));
        assert_eq!(spec.vertical, Some(VerticalAnchor::Bottom));
        assert_eq!(spec.to_string(), "right bottom");
    }

    #[test]
    fn test_last_token_per_axis_wins() {
        let spec = PointSpec::parse("left top right");
        assert_eq!(spec.horizontal, Some(HorizontalAnchor::Right));
        assert_eq!(spec.vertical, Some(VerticalAnchor::Top));

        let reduced = PointSpec::parse("left right").reduce(&sample());
        assert_eq!((reduced.left, reduced.right), (50.0, 50.0));
        // vertical axis untouched
        assert_eq!((reduced.top, reduced.bottom), (20.0, 100.0));
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let spec = PointSpec::parse("  upward center   sideways ");
        assert_eq!(spec, PointSpec::new(Some(HorizontalAnchor::Center), None));
    }

    #[test]
    fn test_reduce_each_anchor() {
        let b = sample();
        let r = PointSpec::parse("left").reduce(&b);
        assert_eq!((r.left, r.right, r.width()), (10.0, 10.0, 0.0));

        let r = PointSpec::parse("bottom").reduce(&b);
        assert_eq!((r.top, r.bottom, r.height()), (100.0, 100.0, 0.0));

        let r = PointSpec::parse("center middle").reduce(&b);
        assert_eq!((r.left, r.right, r.top, r.bottom), (30.0, 30.0, 60.0, 60.0));
    }

    #[test]
    fn test_empty_spec_is_noop() {
        let b = sample();
        assert_eq!(PointSpec::parse("").reduce(&b), b);
        assert_eq!(PointSpec::parse("nonsense").reduce(&b), b);
        assert_eq!(reduce(&b, None), b);
        assert!(PointSpec::default().is_empty());
    }

    #[test]
    fn test_reduce_never_grows() {
        let specs = [
            "", "left", "right", "center", "top", "middle", "bottom", "left top",
            "right bottom", "center middle", "top left bottom", "garbage middle",
        ];
        let boxes = [
            sample(),
            FrameRect::new(0.0, 0.0, 0.0, 0.0),
            FrameRect::new(-40.0, -40.0, 40.0, 5.0),
        ];
        for spec in specs {
            let spec = PointSpec::parse(spec);
            for b in &boxes {
                let r = spec.reduce(b);
                assert!(r.width() <= b.width(), "{spec} widened {b}");
                assert!(r.height() <= b.height(), "{spec} heightened {b}");
            }
        }
    }

    #[test]
    fn test_reduce_keeps_frame() {
        use crate::geometry::{Frame, Point, Size};
        let frame = Frame::root(Point::new(0.0, 10.0), Size::new(100.0, 100.0));
        let b = sample().in_frame(Some(frame.clone()));
        let r = PointSpec::LEFT_TOP.reduce(&b);
        assert_eq!(r.frame, Some(frame));
    }

    #[test]
    fn test_serde_from_string() {
        #[derive(Deserialize)]
        struct Holder {
            point: PointSpec,
        }
        let holder: Holder = toml::from_str("point = \"middle center\"").unwrap();
        assert_eq!(holder.point.to_string(), "center middle");
    }
}
