//! Focus error types

use thiserror::Error;

/// Errors raised while measuring or scrolling
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FocusError {
    /// A node could not be measured or scrolled (removed, never attached)
    #[error("Target detached from document: {0}")]
    DetachedTarget(String),

    /// A scroll operation was given something that cannot scroll
    #[error("Not a scroll container: {0}")]
    NotAContainer(String),

    /// A range boundary points outside its node
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

impl FocusError {
    /// Build a detached error from any debuggable node handle
    pub fn detached(node: &impl std::fmt::Debug) -> Self {
        FocusError::DetachedTarget(format!("{:?}", node))
    }
}

/// Result type for focus operations
pub type Result<T> = std::result::Result<T, FocusError>;
