//! Single-level directory listing used by the navigator.
//!
//! The navigator expands lazily, so listing never recurses: each call reads
//! exactly one directory.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::BrowseError;

/// Kind of a listed entry, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirEntryKind {
    Directory,
    File,
    /// Symlink whose target does not exist.
    BrokenSymlink,
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub kind: DirEntryKind,
    /// File size in bytes (0 for directories).
    pub size: u64,
}

impl DirEntryInfo {
    pub fn is_dir(&self) -> bool {
        self.kind == DirEntryKind::Directory
    }
}

/// Read the immediate children of `dir`.
///
/// Directories sort before files; each group sorts by name. Hidden entries are
/// included. Entries whose metadata cannot be read are skipped.
pub fn read_children(dir: &Path) -> Result<Vec<DirEntryInfo>, BrowseError> {
    let read_dir = fs::read_dir(dir).map_err(|e| BrowseError::io(dir, e))?;

    let mut entries: Vec<DirEntryInfo> = read_dir
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                    return None;
                }
            };
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // fs::metadata follows symlinks; fall back to the link itself
            let (kind, size) = match fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => (DirEntryKind::Directory, 0),
                Ok(meta) => (DirEntryKind::File, meta.len()),
                Err(_) => match fs::symlink_metadata(&path) {
                    Ok(meta) if meta.file_type().is_symlink() => (DirEntryKind::BrokenSymlink, 0),
                    _ => return None,
                },
            };

            Some(DirEntryInfo {
                name,
                path,
                kind,
                size,
            })
        })
        .collect();

    entries.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    Ok(entries)
}
