//! Scrollfocus DOM
//!
//! Reference document for the scroll focus algorithm: an in-memory element
//! tree with explicit offsets, sizes and scroll state, loaded from scene
//! files and exposed through [`scrollfocus_core::FrameProvider`].
//!
//! # Example
//!
//! ```rust
//! use scrollfocus_core::prelude::*;
//! use scrollfocus_dom::{Document, ElementData, WindowState};
//!
//! let mut doc = Document::new(WindowState::default());
//! doc.set_document_size(Size::new(800.0, 3000.0));
//! let row = doc
//!     .append_element(doc.body(), ElementData::new().offset(0.0, 2000.0).size(800.0, 40.0))
//!     .unwrap();
//!
//! let containers = doc.scroll_ancestors(row);
//! scroll_focus(&mut doc, &containers, &FocusTarget::Element(row), &FocusConfig::default()).unwrap();
//! assert_eq!(doc.window_state().scroll, Point::new(0.0, 1400.0));
//! ```

pub mod document;
pub mod error;
pub mod node;
pub mod scene;

pub use document::Document;
pub use error::{Result, SceneError};
pub use node::{ElementData, NodeData, NodeId, NodeKind, TextData, WindowState};
pub use scene::{Scene, SceneElement, SceneNode, SceneSize, SceneText, SceneWindow};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::document::Document;
    pub use crate::error::{Result, SceneError};
    pub use crate::node::{ElementData, NodeId, TextData, WindowState};
    pub use crate::scene::Scene;
}
