//! User settings persisted in the config directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use taxobrowse_core::EntryKind;

use crate::theme::ThemeVariant;

/// Settings read from `<config_dir>/taxobrowse/settings.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root for `knowledge` when none is given on the command line.
    pub knowledge_root: Option<PathBuf>,
    /// Root for `skills` when none is given on the command line.
    pub skills_root: Option<PathBuf>,
    pub theme: ThemeVariant,
    /// Whether the navigator starts emphasized.
    pub show_tree: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            knowledge_root: None,
            skills_root: None,
            theme: ThemeVariant::Dark,
            show_tree: true,
        }
    }
}

impl Settings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("taxobrowse").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`. A missing file yields defaults silently;
    /// an unreadable or malformed one yields defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read settings");
                return Self::default();
            }
        };

        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed settings, using defaults");
                Self::default()
            }
        }
    }

    /// Configured root for `kind`, if any.
    pub fn root_for(&self, kind: EntryKind) -> Option<&Path> {
        match kind {
            EntryKind::Knowledge => self.knowledge_root.as_deref(),
            EntryKind::Skill => self.skills_root.as_deref(),
        }
    }
}

/// Resolve the navigator root: command line, then settings, then the
/// default for the kind.
pub fn resolve_root(kind: EntryKind, cli: Option<PathBuf>, settings: &Settings) -> PathBuf {
    cli.or_else(|| settings.root_for(kind).map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(kind.default_root()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp.path().join("settings.toml"));

        assert!(settings.show_tree);
        assert_eq!(settings.theme, ThemeVariant::Dark);
        assert!(settings.knowledge_root.is_none());
    }

    #[test]
    fn test_parse_full_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(
            &path,
            "knowledge_root = \"/data/knowledge\"\ntheme = \"light\"\nshow_tree = false\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.knowledge_root, Some(PathBuf::from("/data/knowledge")));
        assert_eq!(settings.skills_root, None);
        assert_eq!(settings.theme, ThemeVariant::Light);
        assert!(!settings.show_tree);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "theme = \"sepia\"\nshow_tree = [").unwrap();

        let settings = Settings::load_from(&path);
        assert!(settings.show_tree);
        assert_eq!(settings.theme, ThemeVariant::Dark);
    }

    #[test]
    fn test_resolve_root_order() {
        let settings = Settings {
            skills_root: Some(PathBuf::from("/configured/skills")),
            ..Settings::default()
        };

        assert_eq!(
            resolve_root(EntryKind::Skill, Some(PathBuf::from("/cli")), &settings),
            PathBuf::from("/cli")
        );
        assert_eq!(
            resolve_root(EntryKind::Skill, None, &settings),
            PathBuf::from("/configured/skills")
        );
        assert_eq!(
            resolve_root(EntryKind::Knowledge, None, &settings),
            PathBuf::from("taxonomy/knowledge")
        );
    }
}
