//! In-memory document
//!
//! A slotmap arena of nodes under a fixed window and body. Geometry is
//! explicit: every element carries its offset inside the parent's content
//! frame, its size and its scroll state, and every text node lays glyphs out
//! on a single line. [`Document`] implements [`FrameProvider`], so the core
//! focus algorithm runs against it unchanged.

use rustc_hash::FxHashMap;
use scrollfocus_core::{
    Boundary, FocusError, Frame, FrameProvider, FrameRect, FrameRef, Point, Size, TextRange,
    Viewport,
};
use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::error::{Result, SceneError};
use crate::node::{ElementData, NodeData, NodeId, NodeKind, TextData, WindowState};

type FocusResult<T> = scrollfocus_core::Result<T>;

/// Element tree with a window, a body and explicit geometry
pub struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    ids: FxHashMap<String, NodeId>,
    window: NodeId,
    body: NodeId,
    window_state: WindowState,
}

/// Document-order glyph positions for range measurement
struct GlyphIndex {
    /// First glyph index and one-past-last glyph index of each subtree
    spans: FxHashMap<NodeId, (usize, usize)>,
    /// Text nodes in document order with their first glyph index
    runs: Vec<(NodeId, usize)>,
}

impl Document {
    /// Create an empty document; the body starts at the window size
    pub fn new(window_state: WindowState) -> Self {
        let mut nodes = SlotMap::with_key();
        let window = nodes.insert(NodeData::new(NodeKind::Window, None));
        let body_data = ElementData::new().size(
            window_state.viewport.width,
            window_state.viewport.height,
        );
        let body = nodes.insert(NodeData::new(NodeKind::Element(body_data), None));

        Self {
            nodes,
            ids: FxHashMap::default(),
            window,
            body,
            window_state,
        }
    }

    pub fn window(&self) -> NodeId {
        self.window
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn window_state(&self) -> WindowState {
        self.window_state
    }

    /// Size of the page; page scrolling is bounded by it
    pub fn document_size(&self) -> Size {
        self.element(self.body)
            .map(|el| el.size)
            .unwrap_or(self.window_state.viewport)
    }

    pub fn set_document_size(&mut self, size: Size) {
        if let Some(NodeKind::Element(el)) = self.nodes.get_mut(self.body).map(|d| &mut d.kind) {
            el.size = size;
        }
    }

    /// Append an element as the last child of `parent`
    pub fn append_element(&mut self, parent: NodeId, element: ElementData) -> Result<NodeId> {
        self.require_element(parent)?;
        if let Some(id) = &element.id {
            if self.ids.contains_key(id) {
                return Err(SceneError::DuplicateId(id.clone()));
            }
        }

        let id = element.id.clone();
        let node = self
            .nodes
            .insert(NodeData::new(NodeKind::Element(element), Some(parent)));
        self.nodes[parent].children.push(node);
        if let Some(id) = id {
            self.ids.insert(id, node);
        }
        Ok(node)
    }

    /// Append a text run as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: TextData) -> Result<NodeId> {
        self.require_element(parent)?;
        let node = self
            .nodes
            .insert(NodeData::new(NodeKind::Text(text), Some(parent)));
        self.nodes[parent].children.push(node);
        Ok(node)
    }

    /// Detach and drop `node` with its whole subtree
    ///
    /// Handles into the removed subtree become detached: every later
    /// measurement through them fails.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        if node == self.window || node == self.body {
            return Err(SceneError::RootRemoval);
        }
        let parent = self.node(node)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != node);
        }

        let mut stack = vec![node];
        let mut removed = 0usize;
        while let Some(current) = stack.pop() {
            if let Some(data) = self.nodes.remove(current) {
                if let NodeKind::Element(ElementData { id: Some(id), .. }) = &data.kind {
                    self.ids.remove(id);
                }
                stack.extend(data.children);
                removed += 1;
            }
        }
        debug!(removed, "removed subtree");
        Ok(())
    }

    /// Look up an element by its string id
    ///
    /// `"window"` and `"body"` always resolve unless an element claims them.
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied().or(match id {
            "window" => Some(self.window),
            "body" => Some(self.body),
            _ => None,
        })
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.nodes.get(node).and_then(NodeData::as_element)
    }

    pub fn text(&self, node: NodeId) -> Option<&TextData> {
        self.nodes.get(node).and_then(NodeData::as_text)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|d| d.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(|el| el.id.as_deref())
    }

    /// Human-readable name for reports
    pub fn label(&self, node: NodeId) -> String {
        if node == self.window {
            return "window".to_string();
        }
        if node == self.body {
            return "body".to_string();
        }
        match self.nodes.get(node).map(|d| &d.kind) {
            Some(NodeKind::Element(el)) => el
                .id
                .as_ref()
                .map(|id| format!("#{id}"))
                .unwrap_or_else(|| "element".to_string()),
            Some(NodeKind::Text(text)) => format!("{:?}", text.content),
            Some(NodeKind::Window) => "window".to_string(),
            None => "detached".to_string(),
        }
    }

    /// Current scroll offset of a container (page scroll for window and body)
    pub fn scroll_offset(&self, node: NodeId) -> Option<Point> {
        if node == self.window || node == self.body {
            return Some(self.window_state.scroll);
        }
        self.element(node).map(|el| el.scroll)
    }

    /// Containers that can move `node` into view, root to descendant
    ///
    /// Always starts with the window, followed by every overflowing element
    /// ancestor below the body.
    pub fn scroll_ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.nodes.get(node).and_then(|d| d.parent);
        while let Some(ancestor) = current {
            if ancestor == self.body {
                break;
            }
            if self.element(ancestor).is_some_and(ElementData::is_scroll_container) {
                chain.push(ancestor);
            }
            current = self.nodes.get(ancestor).and_then(|d| d.parent);
        }
        chain.push(self.window);
        chain.reverse();
        chain
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frames
    // ─────────────────────────────────────────────────────────────────────────

    fn node(&self, node: NodeId) -> FocusResult<&NodeData> {
        self.nodes.get(node).ok_or_else(|| FocusError::detached(&node))
    }

    fn require_element(&self, node: NodeId) -> Result<()> {
        match self.node(node)?.kind {
            NodeKind::Element(_) => Ok(()),
            _ => Err(FocusError::NotAContainer(format!("{node:?}")).into()),
        }
    }

    fn root_frame(&self) -> FrameRef {
        Frame::root(self.window_state.scroll, self.window_state.viewport)
    }

    /// Frame that children of `node` are laid out in
    fn content_frame(&self, node: NodeId) -> FocusResult<Option<FrameRef>> {
        if node == self.body {
            return Ok(Some(self.root_frame()));
        }
        match &self.node(node)?.kind {
            NodeKind::Window => Ok(None),
            NodeKind::Element(el) => Ok(Some(Frame::scrollable(
                el.scroll,
                el.content_size(),
                Some(self.positioned_frame(node)?),
            ))),
            NodeKind::Text(_) => Err(FocusError::NotAContainer(format!("{node:?}"))),
        }
    }

    /// Frame of the element's own rendered box
    fn positioned_frame(&self, node: NodeId) -> FocusResult<FrameRef> {
        let data = self.node(node)?;
        let el = data
            .as_element()
            .ok_or_else(|| FocusError::NotAContainer(format!("{node:?}")))?;
        if node == self.body {
            return Ok(Frame::positioned(Point::ZERO, el.size, Some(self.root_frame())));
        }
        Ok(Frame::positioned(
            el.offset,
            el.size,
            self.parent_content_frame(data)?,
        ))
    }

    fn parent_content_frame(&self, data: &NodeData) -> FocusResult<Option<FrameRef>> {
        match data.parent {
            Some(parent) => self.content_frame(parent),
            None => Ok(None),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ranges
    // ─────────────────────────────────────────────────────────────────────────

    /// Glyph positions of the subtree under `root`, counted from its first glyph
    fn glyph_index(&self, root: NodeId) -> GlyphIndex {
        let mut index = GlyphIndex {
            spans: FxHashMap::default(),
            runs: Vec::new(),
        };
        let mut count = 0;
        self.index_subtree(root, &mut count, &mut index);
        index
    }

    /// Nearest element containing both nodes
    fn common_element(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let mut chain = Vec::new();
        let mut current = Some(a);
        while let Some(node) = current {
            chain.push(node);
            current = self.nodes.get(node).and_then(|d| d.parent);
        }

        let mut current = Some(b);
        while let Some(node) = current {
            if chain.contains(&node) && self.element(node).is_some() {
                return Some(node);
            }
            current = self.nodes.get(node).and_then(|d| d.parent);
        }
        None
    }

    fn index_subtree(&self, node: NodeId, count: &mut usize, index: &mut GlyphIndex) {
        let start = *count;
        if let Some(data) = self.nodes.get(node) {
            match &data.kind {
                NodeKind::Text(text) => {
                    index.runs.push((node, start));
                    *count += text.len();
                }
                _ => {
                    for &child in &data.children {
                        self.index_subtree(child, count, index);
                    }
                }
            }
        }
        index.spans.insert(node, (start, *count));
    }

    /// Global glyph position of a boundary
    fn cursor(&self, index: &GlyphIndex, boundary: &Boundary<NodeId>) -> FocusResult<usize> {
        let data = self.node(boundary.node)?;
        let (start, end) = index
            .spans
            .get(&boundary.node)
            .copied()
            .ok_or_else(|| FocusError::InvalidRange("boundary outside the range scope".to_string()))?;

        let position = match &data.kind {
            NodeKind::Text(text) if boundary.offset <= text.len() => Some(start + boundary.offset),
            NodeKind::Element(_) => match data.children.get(boundary.offset) {
                Some(child) => index.spans.get(child).map(|span| span.0),
                None if boundary.offset == data.children.len() => Some(end),
                None => None,
            },
            _ => None,
        };
        position.ok_or_else(|| {
            FocusError::InvalidRange(format!(
                "offset {} out of bounds in {:?}",
                boundary.offset, boundary.node
            ))
        })
    }

    /// Zero-width caret for a collapsed range strictly inside a text run
    fn caret(&self, boundary: &Boundary<NodeId>) -> FocusResult<Option<FrameRect>> {
        let data = self.node(boundary.node)?;
        match data.as_text() {
            Some(text) if boundary.offset > 0 && boundary.offset < text.len() => {
                let frame = self.parent_content_frame(data)?;
                Ok(Some(text.caret_rect(boundary.offset).in_frame(frame).absolute()))
            }
            _ => Ok(None),
        }
    }
}

impl FrameProvider for Document {
    type Node = NodeId;

    fn measure_box(&self, node: &NodeId) -> FocusResult<FrameRect> {
        let data = self.node(*node)?;
        let rect = match &data.kind {
            NodeKind::Window => FrameRect::from_xywh(
                0.0,
                0.0,
                self.window_state.viewport.width,
                self.window_state.viewport.height,
            ),
            NodeKind::Element(el) if *node == self.body => {
                FrameRect::from_xywh(0.0, 0.0, el.size.width, el.size.height)
                    .in_frame(Some(self.root_frame()))
            }
            NodeKind::Element(el) => {
                FrameRect::from_xywh(el.offset.x, el.offset.y, el.size.width, el.size.height)
                    .in_frame(self.parent_content_frame(data)?)
            }
            NodeKind::Text(text) => text.run_rect().in_frame(self.parent_content_frame(data)?),
        };
        Ok(rect)
    }

    fn measure_range(&self, range: &TextRange<NodeId>) -> FocusResult<FrameRect> {
        self.node(range.start.node)?;
        self.node(range.end.node)?;
        // Only the subtree holding both boundaries can be covered
        let scope = self
            .common_element(range.start.node, range.end.node)
            .ok_or_else(|| FocusError::InvalidRange("boundaries share no element".to_string()))?;
        let index = self.glyph_index(scope);
        let start = self.cursor(&index, &range.start)?;
        let end = self.cursor(&index, &range.end)?;

        if start >= end {
            if range.is_collapsed() {
                if let Some(caret) = self.caret(&range.start)? {
                    return Ok(caret);
                }
            }
            return Ok(FrameRect::default());
        }

        let mut bounds: Option<FrameRect> = None;
        for &(node, run_start) in &index.runs {
            let data = self.node(node)?;
            let Some(text) = data.as_text() else { continue };
            let from = start.max(run_start);
            let to = end.min(run_start + text.len());
            if from >= to {
                continue;
            }

            let frame = self.parent_content_frame(data)?;
            let covered = text
                .glyph_rect(from - run_start)
                .union(&text.glyph_rect(to - 1 - run_start))
                .in_frame(frame)
                .absolute();
            bounds = Some(match bounds {
                Some(b) => b.union(&covered),
                None => covered,
            });
        }
        Ok(bounds.unwrap_or_default())
    }

    fn measure_viewport(&self, container: &NodeId) -> FocusResult<Viewport> {
        let data = self.node(*container)?;
        if self.is_window_like(container) {
            let viewport = self.window_state.viewport;
            return Ok(Viewport {
                visible: FrameRect::from_xywh(0.0, 0.0, viewport.width, viewport.height),
                scroll: self.window_state.scroll,
            });
        }
        match &data.kind {
            NodeKind::Element(el) => Ok(Viewport {
                visible: FrameRect::from_xywh(0.0, 0.0, el.size.width, el.size.height)
                    .in_frame(Some(self.positioned_frame(*container)?)),
                scroll: el.scroll,
            }),
            _ => Err(FocusError::NotAContainer(format!("{container:?}"))),
        }
    }

    fn scroll_to(&mut self, container: &NodeId, left: f32, top: f32) -> FocusResult<()> {
        self.node(*container)?;
        if self.is_window_like(container) {
            let page = self.document_size();
            let viewport = self.window_state.viewport;
            let max_x = (page.width - viewport.width).max(0.0);
            let max_y = (page.height - viewport.height).max(0.0);
            let scroll = Point::new(left.clamp(0.0, max_x), top.clamp(0.0, max_y));
            trace!(x = scroll.x, y = scroll.y, "page scroll");
            self.window_state.scroll = scroll;
            return Ok(());
        }

        match self.nodes.get_mut(*container).map(|d| &mut d.kind) {
            Some(NodeKind::Element(el)) => {
                let max = el.max_scroll();
                el.scroll = Point::new(left.clamp(0.0, max.x), top.clamp(0.0, max.y));
                trace!(x = el.scroll.x, y = el.scroll.y, "element scroll {:?}", container);
                Ok(())
            }
            _ => Err(FocusError::NotAContainer(format!("{container:?}"))),
        }
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        self.contains(*node)
    }

    fn is_window_like(&self, node: &NodeId) -> bool {
        *node == self.window || *node == self.body
    }

    fn is_element_like(&self, node: &NodeId) -> bool {
        self.element(*node).is_some()
    }

    fn text_len(&self, node: &NodeId) -> Option<usize> {
        self.text(*node).map(TextData::len)
    }

    fn child_count(&self, node: &NodeId) -> usize {
        self.children(*node).len()
    }

    fn child(&self, node: &NodeId, index: usize) -> Option<NodeId> {
        self.children(*node).get(index).copied()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(*node).and_then(|d| d.parent)
    }

    fn index_in_parent(&self, node: &NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|c| c == node)
    }
}
