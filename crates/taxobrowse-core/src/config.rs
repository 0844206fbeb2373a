//! Browser configuration.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::{BrowseError, EntryKind};

/// Configuration for one browser instance, resolved before construction.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate", error = "BrowseError"))]
pub struct BrowserConfig {
    /// Kind of entry being browsed; selects the form schema.
    #[builder(default)]
    #[serde(default)]
    pub kind: EntryKind,

    /// Directory the navigator is rooted at.
    pub root: PathBuf,

    /// Whether the navigator pane starts emphasized.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub show_tree: bool,
}

fn default_true() -> bool {
    true
}

impl From<derive_builder::UninitializedFieldError> for BrowseError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        Self::InvalidConfig {
            message: e.to_string(),
        }
    }
}

impl BrowserConfigBuilder {
    fn validate(&self) -> Result<(), BrowseError> {
        match &self.root {
            Some(root) if root.as_os_str().is_empty() => Err(BrowseError::InvalidConfig {
                message: "Root path cannot be empty".to_string(),
            }),
            Some(_) => Ok(()),
            None => Err(BrowseError::InvalidConfig {
                message: "Root path is required".to_string(),
            }),
        }
    }
}

impl BrowserConfig {
    /// Create a new config builder.
    pub fn builder() -> BrowserConfigBuilder {
        BrowserConfigBuilder::default()
    }

    /// Config for `kind` rooted at its default directory.
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            root: PathBuf::from(kind.default_root()),
            show_tree: true,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::new(EntryKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = BrowserConfig::builder()
            .kind(EntryKind::Skill)
            .root("/srv/taxonomy")
            .show_tree(false)
            .build()
            .unwrap();

        assert_eq!(config.kind, EntryKind::Skill);
        assert_eq!(config.root, PathBuf::from("/srv/taxonomy"));
        assert!(!config.show_tree);
    }

    #[test]
    fn test_config_builder_requires_root() {
        let err = BrowserConfig::builder().kind(EntryKind::Skill).build().unwrap_err();
        assert!(matches!(err, BrowseError::InvalidConfig { .. }));

        let err = BrowserConfig::builder().root("").build().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_config_defaults() {
        let config = BrowserConfig::new(EntryKind::Knowledge);
        assert_eq!(config.root, PathBuf::from("taxonomy/knowledge"));
        assert!(config.show_tree);
    }
}
