//! Scrollfocus configuration file handling
//!
//! `scrollfocus.toml` holds focus defaults next to the scene files:
//!
//! ```toml
//! [focus]
//! point = "center middle"
//! padding = 12
//! ```

use anyhow::{Context, Result};
use scrollfocus_core::FocusConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of scrollfocus.toml
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScrollfocusConfig {
    /// Defaults for every focus call; command-line flags override them
    #[serde(default)]
    pub focus: FocusConfig,
}

impl ScrollfocusConfig {
    pub const FILE_NAME: &'static str = "scrollfocus.toml";

    /// Load a specific config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load scrollfocus.toml from a directory, or defaults when there is none
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfocus_core::{PartialRect, PointSpec};

    #[test]
    fn test_parse_focus_table() {
        let config = ScrollfocusConfig::parse(
            r#"
[focus]
point = "center middle"
to_point = "top"
padding = 12

[focus.viewport]
top = 40
"#,
        )
        .unwrap();
        assert_eq!(config.focus.point, Some(PointSpec::parse("center middle")));
        assert_eq!(config.focus.to_point, Some(PointSpec::parse("top")));
        assert_eq!(config.focus.padding, Some(12.0));
        assert_eq!(config.focus.viewport, Some(PartialRect::new().top(40.0)));
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = ScrollfocusConfig::parse("").unwrap();
        assert_eq!(config.focus, FocusConfig::default());
    }

    #[test]
    fn test_missing_file_in_dir() {
        let dir = std::env::temp_dir().join("scrollfocus-no-config");
        let config = ScrollfocusConfig::load_from_dir(&dir).unwrap();
        assert!(config.focus.point.is_none());
    }
}
