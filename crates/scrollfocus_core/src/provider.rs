//! Frame provider capability
//!
//! The only boundary between the targeting algorithm and a live document.
//! A provider measures boxes, ranges and scroll viewports, scrolls
//! containers, and exposes enough tree navigation for range repair.

use std::fmt;

use crate::error::Result;
use crate::geometry::{FrameRect, Point};
use crate::range::TextRange;

/// Measured visible region of a scroll container
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Visible box, in the container's positioned frame (or absolute for the window)
    pub visible: FrameRect,
    /// Current scroll offset
    pub scroll: Point,
}

/// Access to document geometry
///
/// Measurements must reflect every preceding [`scroll_to`](Self::scroll_to)
/// immediately. Implementations report unknown or removed nodes as
/// [`FocusError::DetachedTarget`](crate::FocusError::DetachedTarget).
pub trait FrameProvider {
    /// Handle to a node (element, text node, or the window)
    type Node: Clone + PartialEq + fmt::Debug;

    /// Box of an element in its natural frame
    fn measure_box(&self, node: &Self::Node) -> Result<FrameRect>;

    /// Raw bounding rect of a text range in window coordinates, possibly degenerate
    fn measure_range(&self, range: &TextRange<Self::Node>) -> Result<FrameRect>;

    /// Visible region and scroll offset of a scroll container
    fn measure_viewport(&self, container: &Self::Node) -> Result<Viewport>;

    /// Set the scroll offset of a container (page scroll for the window)
    fn scroll_to(&mut self, container: &Self::Node, left: f32, top: f32) -> Result<()>;

    /// Node is still part of the document
    fn is_attached(&self, node: &Self::Node) -> bool {
        self.measure_box(node).is_ok()
    }

    fn is_window_like(&self, node: &Self::Node) -> bool;

    fn is_element_like(&self, node: &Self::Node) -> bool;

    /// Character count for text nodes, None for anything else
    fn text_len(&self, node: &Self::Node) -> Option<usize>;

    fn child_count(&self, node: &Self::Node) -> usize;

    fn child(&self, node: &Self::Node, index: usize) -> Option<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Position of `node` among its parent's children
    fn index_in_parent(&self, node: &Self::Node) -> Option<usize> {
        let parent = self.parent(node)?;
        (0..self.child_count(&parent)).find(|&i| self.child(&parent, i).as_ref() == Some(node))
    }
}
