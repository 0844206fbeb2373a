//! Error types for browsing operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while listing directories or building config.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl BrowseError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Short label for tree markers.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "permission denied",
            Self::NotFound { .. } => "not found",
            Self::NotADirectory { .. } => "not a directory",
            Self::Io { .. } => "unreadable",
            Self::InvalidConfig { .. } => "invalid configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_error_io() {
        let err = BrowseError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, BrowseError::PermissionDenied { .. }));
        assert_eq!(err.short_label(), "permission denied");
    }

    #[test]
    fn test_browse_error_other_kind_keeps_source() {
        let err = BrowseError::io("/x", std::io::Error::other("boom"));
        assert!(matches!(err, BrowseError::Io { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
