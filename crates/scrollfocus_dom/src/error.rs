//! Document and scene error types

use scrollfocus_core::FocusError;
use thiserror::Error;

/// Errors raised while building a document or loading a scene
#[derive(Error, Debug)]
pub enum SceneError {
    /// Failed to read a scene file
    #[error("Failed to read scene: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML scene
    #[error("Failed to parse TOML scene: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON scene
    #[error("Failed to parse JSON scene: {0}")]
    Json(#[from] serde_json::Error),

    /// Two elements share an id
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    /// Scene file extension is neither .toml nor .json
    #[error("Unknown scene format: {0}")]
    UnknownFormat(String),

    /// The window and body cannot be removed
    #[error("Cannot remove the document root")]
    RootRemoval,

    /// Tree operation on a node that cannot take it
    #[error(transparent)]
    Focus(#[from] FocusError),
}

/// Result type for document construction
pub type Result<T> = std::result::Result<T, SceneError>;
