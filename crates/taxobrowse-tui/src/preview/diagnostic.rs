//! Diagnostic trace shown in place of a file that could not be rendered.

use std::error::Error;
use std::path::{Path, PathBuf};

use ratatui::text::{Line, Span};

use crate::theme::Theme;

/// Failed render, captured as its error chain.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub path: PathBuf,
    /// Top-level message followed by each `source()` in order.
    pub chain: Vec<String>,
}

impl Diagnostic {
    pub fn from_error(path: &Path, err: &dyn Error) -> Self {
        let mut chain = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self {
            path: path.to_path_buf(),
            chain,
        }
    }

    /// Number of rendered lines: headline, spacer, one per chain entry.
    pub fn line_count(&self) -> usize {
        self.chain.len() + 2
    }

    /// Render as a cause tree under a headline.
    pub fn to_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.line_count());
        lines.push(Line::from(vec![
            Span::styled("× ", theme.diagnostic_marker),
            Span::styled(
                format!("failed to render {}", self.path.display()),
                theme.diagnostic_headline,
            ),
        ]));
        lines.push(Line::from(Span::styled("│", theme.tree_lines)));

        let last = self.chain.len().saturating_sub(1);
        for (i, message) in self.chain.iter().enumerate() {
            let branch = if i == last { "╰─▶ " } else { "├─▶ " };
            lines.push(Line::from(vec![
                Span::styled(branch, theme.tree_lines),
                Span::styled(message.clone(), theme.diagnostic_cause),
            ]));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PreviewError;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_chain_follows_sources() {
        let err = PreviewError::Io {
            path: PathBuf::from("/t/qna.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let diag = Diagnostic::from_error(Path::new("/t/qna.yaml"), &err);

        assert_eq!(diag.chain, ["Cannot read /t/qna.yaml", "denied"]);
        assert_eq!(diag.line_count(), 4);
    }

    #[test]
    fn test_lines_render_tree() {
        let err = PreviewError::Binary { offset: 2 };
        let diag = Diagnostic::from_error(Path::new("b.bin"), &err);
        let lines = diag.to_lines(&Theme::dark());

        assert_eq!(lines.len(), diag.line_count());
        assert_eq!(line_text(&lines[0]), "× failed to render b.bin");
        assert_eq!(line_text(&lines[2]), "╰─▶ Binary file: NUL byte at offset 2");
    }
}
