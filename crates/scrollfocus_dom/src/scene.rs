//! Scene files
//!
//! A scene describes the window and a nested element tree. Scenes load from
//! TOML or JSON, chosen by file extension:
//!
//! ```toml
//! [window]
//! width = 800
//! height = 600
//!
//! [page]
//! width = 800
//! height = 3000
//!
//! [[elements]]
//! id = "list"
//! y = 100
//! width = 300
//! height = 400
//! scroll_height = 2000
//!
//! [[elements.children]]
//! id = "row-40"
//! y = 1200
//! width = 300
//! height = 40
//!
//! [[elements.children]]
//! text = "hello"
//! y = 1260
//! ```

use std::fs;
use std::path::Path;

use scrollfocus_core::{Point, Size};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::Document;
use crate::error::{Result, SceneError};
use crate::node::{ElementData, NodeId, TextData, WindowState};

/// Root of a scene file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Scene {
    pub window: SceneWindow,
    /// Page size (None = the window size)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<SceneSize>,
    pub elements: Vec<SceneNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneWindow {
    pub width: f32,
    pub height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

impl Default for SceneWindow {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SceneSize {
    pub width: f32,
    pub height: f32,
}

/// Element or text run; a `text` key makes it a text run
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SceneNode {
    Text(SceneText),
    Element(SceneElement),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
    /// Scrollable content width (None = `width`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_width: Option<f32>,
    /// Scrollable content height (None = `height`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_height: Option<f32>,
    pub children: Vec<SceneNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneText {
    pub text: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_advance")]
    pub advance: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
}

fn default_advance() -> f32 {
    8.0
}

fn default_line_height() -> f32 {
    16.0
}

impl Scene {
    /// Load a scene, picking the parser by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(SceneError::UnknownFormat(path.display().to_string())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn window_state(&self) -> WindowState {
        WindowState {
            viewport: Size::new(self.window.width, self.window.height),
            scroll: Point::new(self.window.scroll_x, self.window.scroll_y),
        }
    }
}

impl SceneElement {
    fn to_element(&self) -> ElementData {
        let mut element = ElementData::new()
            .offset(self.x, self.y)
            .size(self.width, self.height)
            .scroll(self.scroll_x, self.scroll_y);
        if self.scroll_width.is_some() || self.scroll_height.is_some() {
            element = element.scroll_size(
                self.scroll_width.unwrap_or(self.width),
                self.scroll_height.unwrap_or(self.height),
            );
        }
        if let Some(id) = &self.id {
            element = element.id(id.clone());
        }
        element
    }
}

impl SceneText {
    fn to_text(&self) -> TextData {
        TextData::new(self.text.clone())
            .origin(self.x, self.y)
            .advance(self.advance)
            .line_height(self.line_height)
    }
}

impl Document {
    /// Build a document from a scene description
    pub fn from_scene(scene: &Scene) -> Result<Self> {
        let window = scene.window_state();
        let mut doc = Document::new(window);
        let page = scene
            .page
            .map(|p| Size::new(p.width, p.height))
            .unwrap_or(window.viewport);
        doc.set_document_size(page);

        // Explicit stack keeps deep scenes off the call stack
        let mut pending: Vec<(NodeId, &SceneNode)> = scene
            .elements
            .iter()
            .rev()
            .map(|node| (doc.body(), node))
            .collect();
        let mut count = 0usize;
        while let Some((parent, node)) = pending.pop() {
            count += 1;
            match node {
                SceneNode::Text(text) => {
                    doc.append_text(parent, text.to_text())?;
                }
                SceneNode::Element(element) => {
                    let id = doc.append_element(parent, element.to_element())?;
                    pending.extend(element.children.iter().rev().map(|child| (id, child)));
                }
            }
        }

        debug!(nodes = count, "built document from scene");
        Ok(doc)
    }
}
