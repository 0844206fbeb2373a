//! Preview content types and loading.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Style;
use ratatui::text::Line;
use thiserror::Error;

use super::SyntaxHighlighter;
use super::diagnostic::Diagnostic;

/// Maximum file size to attempt preview (10 MB).
const MAX_PREVIEW_SIZE: u64 = 10 * 1024 * 1024;

/// Number of bytes to inspect for binary detection.
const BINARY_CHECK_BYTES: usize = 1024;

/// Tab size for display.
const TAB_SIZE: u8 = 4;

/// Fixed subtitle shown when a preview fails.
pub const ERROR_SUBTITLE: &str = "ERROR";

/// Error that can occur while loading or highlighting a file.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Path is a directory.
    #[error("Is a directory: {path}")]
    IsDirectory { path: PathBuf },

    /// File is too large to preview.
    #[error("File too large to preview: {size} bytes")]
    TooLarge { size: u64 },

    /// File looks binary.
    #[error("Binary file: NUL byte at offset {offset}")]
    Binary { offset: usize },

    /// File is not valid UTF-8.
    #[error("File is not valid UTF-8")]
    InvalidUtf8 {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// File could not be read.
    #[error("Cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Highlighter failed on the file contents.
    #[error("Highlighting failed")]
    Highlight(#[source] syntect::Error),
}

/// Highlighted file ready for display.
#[derive(Debug, Clone)]
pub struct Highlighted {
    /// One rendered line per source line, indent guides applied.
    pub lines: Vec<Line<'static>>,
    /// Name of the syntax used.
    pub syntax_name: String,
}

impl Highlighted {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Width of the line-number gutter in digits.
    pub fn gutter_digits(&self) -> usize {
        self.lines.len().max(1).to_string().len()
    }
}

/// Narrow seam around the highlighting library.
pub trait Highlight {
    fn highlight(&self, path: &Path) -> Result<Highlighted, PreviewError>;
}

/// Reads a file and highlights it with syntect, line numbers and indent
/// guides on, no wrapping.
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    tab_size: u8,
    guide_style: Style,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self {
            tab_size: TAB_SIZE,
            guide_style: Style::default(),
        }
    }
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style used for indent guides.
    pub fn with_guide_style(mut self, style: Style) -> Self {
        self.guide_style = style;
        self
    }

    /// Read a file as UTF-8 text, rejecting directories, large and binary files.
    pub fn load_text(path: &Path) -> Result<String, PreviewError> {
        let io_err = |source| PreviewError::Io {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(io_err)?;
        if metadata.is_dir() {
            return Err(PreviewError::IsDirectory {
                path: path.to_path_buf(),
            });
        }
        if metadata.len() > MAX_PREVIEW_SIZE {
            return Err(PreviewError::TooLarge { size: metadata.len() });
        }

        let bytes = fs::read(path).map_err(io_err)?;
        let head = &bytes[..bytes.len().min(BINARY_CHECK_BYTES)];
        if let Some(offset) = head.iter().position(|&b| b == 0) {
            return Err(PreviewError::Binary { offset });
        }

        String::from_utf8(bytes).map_err(|source| PreviewError::InvalidUtf8 { source })
    }
}

impl Highlight for SyntectHighlighter {
    fn highlight(&self, path: &Path) -> Result<Highlighted, PreviewError> {
        let text = Self::load_text(path)?;
        let first_line = text.lines().next();
        let syntax = SyntaxHighlighter::find_syntax(path, first_line).unwrap_or_else(SyntaxHighlighter::plain_text);

        let lines = SyntaxHighlighter::highlight_text(
            &text,
            syntax,
            self.tab_size,
            true,
            self.guide_style,
        )?;

        Ok(Highlighted {
            lines,
            syntax_name: syntax.name.clone(),
        })
    }
}

/// Content that can be displayed in the preview pane.
#[derive(Debug, Clone, Default)]
pub enum PreviewContent {
    /// Nothing selected yet.
    #[default]
    Empty,
    /// Syntax-highlighted file.
    Text(Highlighted),
    /// Diagnostic trace for a failed render.
    Failure(Diagnostic),
}

/// Window subtitle produced by a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subtitle {
    Path(PathBuf),
    Error,
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Error => f.write_str(ERROR_SUBTITLE),
        }
    }
}

/// State of the preview pane.
#[derive(Debug, Default)]
pub struct PreviewState {
    /// Currently displayed content.
    pub content: PreviewContent,
    /// Path of the last render, successful or not.
    pub path: Option<PathBuf>,
    /// Vertical scroll offset.
    pub scroll: usize,
    /// Horizontal scroll offset (lines are never wrapped).
    pub h_scroll: usize,
}

impl PreviewState {
    /// Create new preview state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read and render `path`, replacing the pane content.
    ///
    /// Never fails: errors become a diagnostic trace and the
    /// [`Subtitle::Error`] marker. Scroll is reset to the top either way.
    pub fn render(&mut self, path: &Path, highlighter: &dyn Highlight) -> Subtitle {
        self.path = Some(path.to_path_buf());
        self.scroll = 0;
        self.h_scroll = 0;

        match highlighter.highlight(path) {
            Ok(highlighted) => {
                tracing::debug!(
                    path = %path.display(),
                    syntax = %highlighted.syntax_name,
                    lines = highlighted.line_count(),
                    "preview rendered"
                );
                self.content = PreviewContent::Text(highlighted);
                Subtitle::Path(path.to_path_buf())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "preview failed");
                self.content = PreviewContent::Failure(Diagnostic::from_error(path, &e));
                Subtitle::Error
            }
        }
    }

    /// Number of lines in the current content.
    pub fn content_line_count(&self) -> usize {
        match &self.content {
            PreviewContent::Text(h) => h.line_count(),
            PreviewContent::Failure(d) => d.line_count(),
            PreviewContent::Empty => 0,
        }
    }

    /// Scroll preview up.
    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    /// Scroll preview down, keeping at least one line on screen.
    pub fn scroll_down(&mut self, amount: usize) {
        let max = self.content_line_count().saturating_sub(1);
        self.scroll = (self.scroll + amount).min(max);
    }

    pub fn scroll_left(&mut self, amount: usize) {
        self.h_scroll = self.h_scroll.saturating_sub(amount);
    }

    pub fn scroll_right(&mut self, amount: usize) {
        self.h_scroll += amount;
    }

    pub fn scroll_home(&mut self) {
        self.scroll = 0;
        self.h_scroll = 0;
    }

    pub fn scroll_end(&mut self) {
        self.scroll = self.content_line_count().saturating_sub(1);
    }
}
