//! Navigator tree widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::navigator::{Navigator, NodeKind, VisibleItem};
use crate::theme::Theme;
use crate::ui::format_size;

/// Width reserved for the right-aligned size column.
const SIZE_COLUMN_WIDTH: u16 = 10;

/// Below this inner width the size column is dropped.
const MIN_WIDTH_FOR_SIZES: u16 = 32;

/// Tree view of a [`Navigator`].
pub struct NavigatorView<'a> {
    theme: &'a Theme,
    block: Option<Block<'a>>,
}

impl<'a> NavigatorView<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme, block: None }
    }

    /// Set the block (border) for the widget.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn prefix(item: &VisibleItem) -> String {
        let mut prefix = String::new();
        for &parent_is_last in &item.parent_last_siblings {
            prefix.push_str(if parent_is_last { "  " } else { "│ " });
        }
        if item.depth > 0 {
            prefix.push_str(if item.is_last_sibling { "└─" } else { "├─" });
        }
        prefix
    }

    fn name_style(&self, item: &VisibleItem) -> Style {
        match item.kind {
            NodeKind::Directory => self.theme.directory,
            NodeKind::File { .. } => self.theme.file,
            NodeKind::BrokenSymlink => self.theme.symlink.add_modifier(Modifier::DIM),
        }
    }
}

/// Cut `text` to at most `width` columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl StatefulWidget for NavigatorView<'_> {
    type State = Navigator;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        let viewport_height = inner_area.height as usize;
        state.ensure_visible(viewport_height);

        let show_sizes = inner_area.width >= MIN_WIDTH_FOR_SIZES;
        let size_width = if show_sizes { SIZE_COLUMN_WIDTH + 1 } else { 0 };

        let start = state.offset;
        let end = (start + viewport_height).min(state.len());

        for (row_idx, item) in state.visible()[start..end].iter().enumerate() {
            let y = inner_area.y + row_idx as u16;
            let is_selected = start + row_idx == state.selected;

            let prefix = Self::prefix(item);
            let expand_indicator = match item.kind {
                NodeKind::Directory if item.expanded => "▼ ",
                NodeKind::Directory => "▶ ",
                _ => "  ",
            };

            let mut spans = vec![
                Span::styled(prefix.clone(), self.theme.tree_lines),
                Span::styled(expand_indicator, Style::default().fg(self.theme.muted)),
            ];

            let used = prefix.width() + expand_indicator.width();
            let available = (inner_area.width as usize).saturating_sub(used + size_width as usize);

            match &item.error {
                Some(marker) => {
                    let name = truncate(&item.name, available);
                    let marker_text = truncate(&format!(" [{marker}]"), available.saturating_sub(name.width()));
                    spans.push(Span::styled(name, self.name_style(item)));
                    spans.push(Span::styled(marker_text, self.theme.error_marker));
                }
                None => {
                    spans.push(Span::styled(truncate(&item.name, available), self.name_style(item)));
                }
            }

            let line = Line::from(spans);
            let line = if is_selected {
                line.style(self.theme.selected)
            } else {
                line
            };

            let line_area = Rect::new(inner_area.x, y, inner_area.width.saturating_sub(size_width), 1);
            Widget::render(line, line_area, buf);

            if show_sizes {
                if let NodeKind::File { size } = item.kind {
                    let size_text = format!("{:>width$}", format_size(size), width = SIZE_COLUMN_WIDTH as usize);
                    let size_area = Rect::new(
                        inner_area.x + inner_area.width - SIZE_COLUMN_WIDTH,
                        y,
                        SIZE_COLUMN_WIDTH,
                        1,
                    );
                    let style = if is_selected {
                        self.theme.selected
                    } else {
                        self.theme.size
                    };
                    Widget::render(Span::styled(size_text, style), size_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("qna.yaml", 20), "qna.yaml");
        assert_eq!(truncate("compositional_skills", 8), "composi…");
    }

    #[test]
    fn test_renders_tree_rows() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("science")).unwrap();
        fs::write(temp.path().join("qna.yaml"), "a: 1\n").unwrap();

        let mut nav = Navigator::new(temp.path());
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 80, 4);
        let mut buf = Buffer::empty(area);
        NavigatorView::new(&theme).render(area, &mut buf, &mut nav);

        assert!(row_text(&buf, 1).contains("├─▶ science"));
        assert!(row_text(&buf, 2).contains("└─  qna.yaml"));
        assert!(row_text(&buf, 2).ends_with("5 B"));
    }

    #[test]
    fn test_renders_error_marker() {
        let temp = TempDir::new().unwrap();
        let mut nav = Navigator::new(temp.path().join("missing"));
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 80, 2);
        let mut buf = Buffer::empty(area);
        NavigatorView::new(&theme).render(area, &mut buf, &mut nav);

        assert!(row_text(&buf, 0).contains("missing [not found]"));
    }
}
