//! Document nodes

use scrollfocus_core::{FrameRect, Point, Size};
use slotmap::new_key_type;

new_key_type! {
    pub struct NodeId;
}

/// Window (page) state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowState {
    /// Visible window size
    pub viewport: Size,
    /// Page scroll offset
    pub scroll: Point,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            scroll: Point::ZERO,
        }
    }
}

/// Element box and scroll state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementData {
    /// String id for lookups
    pub id: Option<String>,
    /// Offset within the parent's content (scrolled) frame
    pub offset: Point,
    /// Rendered box size
    pub size: Size,
    /// Current scroll offset
    pub scroll: Point,
    /// Scrollable content size (None = same as `size`)
    pub scroll_size: Option<Size>,
}

impl ElementData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Point::new(x, y);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn scroll(mut self, x: f32, y: f32) -> Self {
        self.scroll = Point::new(x, y);
        self
    }

    pub fn scroll_size(mut self, width: f32, height: f32) -> Self {
        self.scroll_size = Some(Size::new(width, height));
        self
    }

    /// Scrollable content size
    pub fn content_size(&self) -> Size {
        self.scroll_size.unwrap_or(self.size)
    }

    /// Largest scroll offset on each axis
    pub fn max_scroll(&self) -> Point {
        let content = self.content_size();
        Point::new(
            (content.width - self.size.width).max(0.0),
            (content.height - self.size.height).max(0.0),
        )
    }

    /// Content overflows the box on some axis
    pub fn is_scroll_container(&self) -> bool {
        let max = self.max_scroll();
        max.x > 0.0 || max.y > 0.0
    }
}

/// Single-line text run with fixed glyph advance
#[derive(Clone, Debug, PartialEq)]
pub struct TextData {
    pub content: String,
    /// Top-left of the first glyph in the parent's content frame
    pub origin: Point,
    /// Width of every glyph
    pub advance: f32,
    pub line_height: f32,
}

impl TextData {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            origin: Point::ZERO,
            advance: 8.0,
            line_height: 16.0,
        }
    }

    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Point::new(x, y);
        self
    }

    pub fn advance(mut self, advance: f32) -> Self {
        self.advance = advance;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Number of characters (range offsets count characters)
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Box of glyph `index`, in the parent's content frame
    pub fn glyph_rect(&self, index: usize) -> FrameRect {
        FrameRect::from_xywh(
            self.origin.x + index as f32 * self.advance,
            self.origin.y,
            self.advance,
            self.line_height,
        )
    }

    /// Zero-width caret before character `offset`
    pub fn caret_rect(&self, offset: usize) -> FrameRect {
        let x = self.origin.x + offset as f32 * self.advance;
        FrameRect::new(x, self.origin.y, x, self.origin.y + self.line_height)
    }

    /// Box of the whole run
    pub fn run_rect(&self) -> FrameRect {
        FrameRect::from_xywh(
            self.origin.x,
            self.origin.y,
            self.len() as f32 * self.advance,
            self.line_height,
        )
    }
}

/// Node payload
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The browser window; scrolling it scrolls the page
    Window,
    Element(ElementData),
    Text(TextData),
}

/// Arena entry
#[derive(Clone, Debug)]
pub struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl NodeData {
    pub fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
        }
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextData> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }
}
