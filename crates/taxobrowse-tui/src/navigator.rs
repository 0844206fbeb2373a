//! Lazily-expanding directory tree used to pick a file.
//!
//! Children of a directory are read the first time it is expanded and
//! dropped again when it collapses, so re-expanding always reflects the
//! current state of the disk.

use std::path::{Path, PathBuf};

use taxobrowse_core::{DirEntryInfo, DirEntryKind, read_children};

/// Notification emitted when a file is activated in the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelected {
    pub path: PathBuf,
}

/// Kind of a navigator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File { size: u64 },
    BrokenSymlink,
}

/// One node of the navigator tree.
#[derive(Debug, Clone)]
pub struct NavNode {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    pub expanded: bool,
    /// `None` until the directory has been read.
    children: Option<Vec<NavNode>>,
    /// Marker set when the directory could not be read.
    pub error: Option<String>,
}

impl NavNode {
    fn directory(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            kind: NodeKind::Directory,
            expanded: false,
            children: None,
            error: None,
        }
    }

    fn from_info(info: DirEntryInfo) -> Self {
        let kind = match info.kind {
            DirEntryKind::Directory => NodeKind::Directory,
            DirEntryKind::File => NodeKind::File { size: info.size },
            DirEntryKind::BrokenSymlink => NodeKind::BrokenSymlink,
        };
        Self {
            name: info.name,
            path: info.path,
            kind,
            expanded: false,
            children: None,
            error: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Loaded children (empty if the directory is collapsed or unread).
    pub fn children(&self) -> &[NavNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    fn expand(&mut self) {
        if !self.is_dir() {
            return;
        }
        if self.children.is_none() {
            match read_children(&self.path) {
                Ok(entries) => {
                    self.children = Some(entries.into_iter().map(NavNode::from_info).collect());
                    self.error = None;
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "cannot list directory");
                    self.children = Some(Vec::new());
                    self.error = Some(e.short_label().to_string());
                }
            }
        }
        self.expanded = true;
    }

    fn collapse(&mut self) {
        self.expanded = false;
        self.children = None;
    }

    fn find_mut(&mut self, path: &Path) -> Option<&mut NavNode> {
        if self.path == path {
            return Some(self);
        }
        if !path.starts_with(&self.path) {
            return None;
        }
        self.children
            .as_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(path))
    }
}

/// A flattened visible row of the tree.
#[derive(Debug, Clone)]
pub struct VisibleItem {
    pub path: PathBuf,
    pub name: String,
    pub kind: NodeKind,
    pub expanded: bool,
    pub error: Option<String>,
    pub depth: usize,
    pub is_last_sibling: bool,
    pub parent_last_siblings: Vec<bool>,
}

/// Navigator state: the tree plus cursor and scroll position.
#[derive(Debug, Clone)]
pub struct Navigator {
    root: NavNode,
    /// Index of the selected row in the flattened view.
    pub selected: usize,
    /// Scroll offset.
    pub offset: usize,
    visible: Vec<VisibleItem>,
}

impl Navigator {
    /// Create a navigator rooted at `root`, with the root expanded.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut node = NavNode::directory(root.display().to_string(), root);
        node.expand();

        let mut navigator = Self {
            root: node,
            selected: 0,
            offset: 0,
            visible: Vec::new(),
        };
        navigator.refresh_visible();
        navigator
    }

    pub fn root(&self) -> &NavNode {
        &self.root
    }

    pub fn root_path(&self) -> &Path {
        &self.root.path
    }

    /// Flattened rows currently visible.
    pub fn visible(&self) -> &[VisibleItem] {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn selected_item(&self) -> Option<&VisibleItem> {
        self.visible.get(self.selected)
    }

    pub fn move_up(&mut self, count: usize) {
        self.selected = self.selected.saturating_sub(count);
    }

    pub fn move_down(&mut self, count: usize) {
        self.selected = (self.selected + count).min(self.len().saturating_sub(1));
    }

    pub fn jump_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.selected = self.len().saturating_sub(1);
    }

    pub fn page_up(&mut self, page: usize) {
        self.move_up(page.max(1));
    }

    pub fn page_down(&mut self, page: usize) {
        self.move_down(page.max(1));
    }

    /// Expand the selected directory. No-op on files.
    pub fn expand(&mut self) {
        let Some(path) = self.selected_item().map(|i| i.path.clone()) else {
            return;
        };
        if let Some(node) = self.root.find_mut(&path) {
            node.expand();
        }
        self.refresh_visible();
    }

    /// Collapse the selected directory, or move to the parent row when the
    /// selection is a file or an already-collapsed directory.
    pub fn collapse(&mut self) {
        let Some(item) = self.selected_item().cloned() else {
            return;
        };

        if item.kind == NodeKind::Directory && item.expanded {
            if let Some(node) = self.root.find_mut(&item.path) {
                node.collapse();
            }
            self.refresh_visible();
        } else if let Some(parent) = item.path.parent() {
            if let Some(idx) = self.visible.iter().position(|v| v.path == parent) {
                self.selected = idx;
            }
        }
    }

    /// Activate the selected row.
    ///
    /// Directories toggle expansion and return `None`. Anything else yields
    /// exactly one [`FileSelected`].
    pub fn activate(&mut self) -> Option<FileSelected> {
        let item = self.selected_item()?.clone();
        match item.kind {
            NodeKind::Directory => {
                if let Some(node) = self.root.find_mut(&item.path) {
                    if node.expanded {
                        node.collapse();
                    } else {
                        node.expand();
                    }
                }
                self.refresh_visible();
                None
            }
            NodeKind::File { .. } | NodeKind::BrokenSymlink => {
                tracing::debug!(path = %item.path.display(), "file selected");
                Some(FileSelected { path: item.path })
            }
        }
    }

    /// Ensure the selected row is visible, adjusting the scroll offset.
    pub fn ensure_visible(&mut self, viewport_height: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if viewport_height > 0 && self.selected >= self.offset + viewport_height {
            self.offset = self.selected - viewport_height + 1;
        }
    }

    fn refresh_visible(&mut self) {
        let mut items = Vec::new();
        flatten(&self.root, 0, true, Vec::new(), &mut items);
        self.visible = items;
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }
}

fn flatten(
    node: &NavNode,
    depth: usize,
    is_last: bool,
    parent_last_siblings: Vec<bool>,
    items: &mut Vec<VisibleItem>,
) {
    items.push(VisibleItem {
        path: node.path.clone(),
        name: node.name.clone(),
        kind: node.kind,
        expanded: node.expanded,
        error: node.error.clone(),
        depth,
        is_last_sibling: is_last,
        parent_last_siblings: parent_last_siblings.clone(),
    });

    if node.expanded {
        let children = node.children();
        for (i, child) in children.iter().enumerate() {
            let mut child_parent_lasts = parent_last_siblings.clone();
            if depth > 0 {
                child_parent_lasts.push(is_last);
            }
            flatten(child, depth + 1, i == children.len() - 1, child_parent_lasts, items);
        }
    }
}
