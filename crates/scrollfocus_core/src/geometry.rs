//! Frame-relative geometry
//!
//! Every box and point is expressed in a frame of reference. Frames chain to
//! an ancestor frame and end at the root (the window), so a position deep
//! inside nested scroll containers can be resolved to window client
//! coordinates by summing frame origins.
//!
//! # Frame kinds
//!
//! - **Scrollable**: content of a scroll container. Origin is the negated
//!   scroll offset, extent is the scrollable content size.
//! - **Positioned**: the rendered box of an element, offset from its
//!   positioning ancestor.
//! - **Root**: the page inside the window. Origin is the negated page scroll
//!   offset, extent is the window viewport size.
//!
//! Frames are immutable snapshots shared through [`FrameRef`]. A scroll
//! mutation never updates a frame in place; the provider measures again.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

// ─────────────────────────────────────────────────────────────────────────────
// Plain Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D offset or scroll position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Negate both components
    pub fn negated(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frames
// ─────────────────────────────────────────────────────────────────────────────

/// Shared handle to an immutable frame snapshot
pub type FrameRef = Arc<Frame>;

/// A frame of reference in the ancestor chain
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    /// Scrolled content of a scroll container
    Scrollable(ScrollFrame),
    /// Rendered box of an element within its positioning ancestor
    Positioned(OffsetFrame),
    /// The page inside the window
    Root(RootFrame),
}

/// Scroll container content frame
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollFrame {
    /// Current scroll offset of the container
    pub scroll: Point,
    /// Full scrollable content size
    pub content_size: Size,
    /// The container's own positioned frame (None = window)
    pub parent: Option<FrameRef>,
}

/// Element box frame
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetFrame {
    /// Offset from the positioning ancestor's origin
    pub offset: Point,
    /// Rendered box size
    pub size: Size,
    /// Positioning ancestor (None = window)
    pub parent: Option<FrameRef>,
}

/// Window/page frame
#[derive(Clone, Debug, PartialEq)]
pub struct RootFrame {
    /// Page scroll offset
    pub scroll: Point,
    /// Window viewport size
    pub viewport: Size,
}

impl Frame {
    /// Create the root frame for a page scrolled to `scroll`
    pub fn root(scroll: Point, viewport: Size) -> FrameRef {
        Arc::new(Frame::Root(RootFrame { scroll, viewport }))
    }

    /// Create a scroll content frame
    pub fn scrollable(scroll: Point, content_size: Size, parent: Option<FrameRef>) -> FrameRef {
        Arc::new(Frame::Scrollable(ScrollFrame {
            scroll,
            content_size,
            parent,
        }))
    }

    /// Create an element box frame
    pub fn positioned(offset: Point, size: Size, parent: Option<FrameRef>) -> FrameRef {
        Arc::new(Frame::Positioned(OffsetFrame {
            offset,
            size,
            parent,
        }))
    }

    /// Origin of this frame expressed in its parent frame
    pub fn origin(&self) -> Point {
        match self {
            Frame::Scrollable(f) => f.scroll.negated(),
            Frame::Positioned(f) => f.offset,
            Frame::Root(f) => f.scroll.negated(),
        }
    }

    /// Extent of this frame
    pub fn extent(&self) -> Size {
        match self {
            Frame::Scrollable(f) => f.content_size,
            Frame::Positioned(f) => f.size,
            Frame::Root(f) => f.viewport,
        }
    }

    pub fn parent(&self) -> Option<&FrameRef> {
        match self {
            Frame::Scrollable(f) => f.parent.as_ref(),
            Frame::Positioned(f) => f.parent.as_ref(),
            Frame::Root(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Frame::Scrollable(_) => "scrollable",
            Frame::Positioned(_) => "positioned",
            Frame::Root(_) => "root",
        }
    }

    /// Iterate this frame and its ancestors, innermost first
    pub fn chain(&self) -> FrameChain<'_> {
        FrameChain { next: Some(self) }
    }

    /// Number of frames from this one to the end of the chain, inclusive
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Origin of this frame in window client coordinates
    ///
    /// Collects the chain root-ward, then folds the origins starting at the
    /// outermost frame.
    pub fn absolute_origin(&self) -> Point {
        let chain: SmallVec<[&Frame; 8]> = self.chain().collect();
        chain.iter().rev().fold(Point::ZERO, |acc, frame| {
            let origin = frame.origin();
            Point::new(acc.x + origin.x, acc.y + origin.y)
        })
    }
}

/// Absolute origin of an optional frame (None = window, origin zero)
pub fn absolute_origin(frame: Option<&FrameRef>) -> Point {
    frame.map(|f| f.absolute_origin()).unwrap_or(Point::ZERO)
}

/// Iterator over a frame and its ancestors
pub struct FrameChain<'a> {
    next: Option<&'a Frame>,
}

impl<'a> Iterator for FrameChain<'a> {
    type Item = &'a Frame;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent().map(|p| p.as_ref());
        Some(current)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.chain().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            let origin = frame.origin();
            let extent = frame.extent();
            write!(
                f,
                "{}({}, {} {}x{})",
                frame.kind_name(),
                origin.x,
                origin.y,
                extent.width,
                extent.height
            )?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame-relative Box
// ─────────────────────────────────────────────────────────────────────────────

/// Rectangle in a frame of reference
///
/// Width and height are derived from the edges, so `width = right - left`
/// and `height = bottom - top` hold after any mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    /// Frame the edges are expressed in (None = window client coordinates)
    pub frame: Option<FrameRef>,
}

impl FrameRect {
    /// Create an absolute rect from its four edges
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            frame: None,
        }
    }

    /// Create an absolute rect from origin and size
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Re-home this rect in `frame` without changing the numbers
    pub fn in_frame(mut self, frame: Option<FrameRef>) -> Self {
        self.frame = frame;
        self
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn top_left(&self) -> FramePoint {
        FramePoint {
            left: self.left,
            top: self.top,
            frame: self.frame.clone(),
        }
    }

    /// All four edges are zero, the host could not find a rendered extent
    pub fn is_degenerate(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }

    /// Offset the rect by a delta, staying in the same frame
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
            frame: self.frame.clone(),
        }
    }

    /// Smallest rect containing both (numbers only, frame taken from self)
    pub fn union(&self, other: &FrameRect) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
            frame: self.frame.clone(),
        }
    }

    /// Whether `other` lies fully inside this rect (same frame assumed)
    pub fn contains(&self, other: &FrameRect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Resolve this rect to window client coordinates
    pub fn absolute(&self) -> FrameRect {
        let origin = absolute_origin(self.frame.as_ref());
        Self::new(self.left, self.top, self.right, self.bottom).translate(origin.x, origin.y)
    }

    /// Re-express this rect relative to `frame` (None = window)
    pub fn relative_to(&self, frame: Option<&FrameRef>) -> FrameRect {
        let absolute = self.absolute();
        let origin = absolute_origin(frame);
        absolute
            .translate(-origin.x, -origin.y)
            .in_frame(frame.cloned())
    }
}

impl fmt::Display for FrameRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "box({} {} {} {})",
            self.left, self.top, self.right, self.bottom
        )?;
        match &self.frame {
            None => write!(f, " in window"),
            Some(frame) => {
                let abs = self.absolute();
                write!(
                    f,
                    " absolute({} {} {} {}) in [{}]",
                    abs.left, abs.top, abs.right, abs.bottom, frame
                )
            }
        }
    }
}

/// Point in a frame of reference
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramePoint {
    pub left: f32,
    pub top: f32,
    pub frame: Option<FrameRef>,
}

impl FramePoint {
    pub const fn new(left: f32, top: f32) -> Self {
        Self {
            left,
            top,
            frame: None,
        }
    }

    /// Zero-sized rect at this point
    pub fn to_rect(&self) -> FrameRect {
        FrameRect::new(self.left, self.top, self.left, self.top).in_frame(self.frame.clone())
    }

    pub fn absolute(&self) -> FramePoint {
        let origin = absolute_origin(self.frame.as_ref());
        FramePoint::new(self.left + origin.x, self.top + origin.y)
    }

    pub fn relative_to(&self, frame: Option<&FrameRef>) -> FramePoint {
        let absolute = self.absolute();
        let origin = absolute_origin(frame);
        FramePoint {
            left: absolute.left - origin.x,
            top: absolute.top - origin.y,
            frame: frame.cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame chains of depth 0 through 3, innermost last
    fn chains() -> Vec<Option<FrameRef>> {
        let root = Frame::root(Point::new(0.0, 120.0), Size::new(800.0, 600.0));
        let positioned = Frame::positioned(
            Point::new(40.0, 16.0),
            Size::new(300.0, 200.0),
            Some(root.clone()),
        );
        let scrollable = Frame::scrollable(
            Point::new(10.0, 250.0),
            Size::new(300.0, 1200.0),
            Some(positioned.clone()),
        );
        vec![None, Some(root), Some(positioned), Some(scrollable)]
    }

    #[test]
    fn test_frame_origins() {
        let root = Frame::root(Point::new(5.0, 7.0), Size::new(100.0, 100.0));
        assert_eq!(root.origin(), Point::new(-5.0, -7.0));
        assert!(root.parent().is_none());

        let scroll = Frame::scrollable(Point::new(0.0, 30.0), Size::new(10.0, 90.0), None);
        assert_eq!(scroll.origin(), Point::new(0.0, -30.0));
        assert_eq!(scroll.extent(), Size::new(10.0, 90.0));
    }

    #[test]
    fn test_absolute_origin_sums_chain() {
        let chains = chains();
        let innermost = chains[3].as_ref().unwrap();
        assert_eq!(innermost.depth(), 3);
        // root (0,-120) + positioned (40,16) + scrollable (-10,-250)
        assert_eq!(innermost.absolute_origin(), Point::new(30.0, -354.0));
        assert_eq!(absolute_origin(None), Point::ZERO);
    }

    #[test]
    fn test_absolute_without_frame_is_identity() {
        let rect = FrameRect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect.absolute(), rect);
    }

    #[test]
    fn test_relative_round_trip_all_depths() {
        let boxes = [
            FrameRect::new(0.0, 0.0, 10.0, 10.0),
            FrameRect::new(-25.0, 12.5, 75.0, 40.0),
            FrameRect::new(300.0, 900.0, 300.0, 900.0),
        ];
        for frame in chains() {
            for b in &boxes {
                let b = b.clone().in_frame(frame.clone());
                let back = b.absolute().relative_to(b.frame.as_ref());
                assert_eq!(back, b, "round trip failed in depth {:?}", frame.as_ref().map(|f| f.depth()));
            }
        }
    }

    #[test]
    fn test_relative_to_other_frame() {
        let chains = chains();
        let positioned = chains[2].clone();
        let scrollable = chains[3].clone();

        // Content at y=250 in the scrolled frame sits at the positioned top edge
        let rect = FrameRect::new(10.0, 250.0, 20.0, 260.0).in_frame(scrollable);
        let rel = rect.relative_to(positioned.as_ref());
        assert_eq!((rel.left, rel.top, rel.right, rel.bottom), (0.0, 0.0, 10.0, 10.0));
        assert_eq!(rel.frame, positioned);
    }

    #[test]
    fn test_point_round_trip() {
        for frame in chains() {
            let p = FramePoint {
                left: 7.0,
                top: -3.0,
                frame: frame.clone(),
            };
            assert_eq!(p.absolute().relative_to(frame.as_ref()), p);
            assert_eq!(p.to_rect().width(), 0.0);
        }
    }

    #[test]
    fn test_degenerate_detection() {
        assert!(FrameRect::default().is_degenerate());
        assert!(!FrameRect::new(0.0, 0.0, 0.0, 16.0).is_degenerate());
    }

    #[test]
    fn test_display_includes_chain() {
        let chains = chains();
        let rect = FrameRect::new(0.0, 0.0, 1.0, 1.0).in_frame(chains[2].clone());
        let text = rect.to_string();
        assert!(text.contains("positioned"));
        assert!(text.contains("root"));
        assert_eq!(FrameRect::new(0.0, 0.0, 1.0, 1.0).to_string(), "box(0 0 1 1) in window");
    }
}
