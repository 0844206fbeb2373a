//! Preview pane widget.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::preview::{PreviewContent, PreviewState};
use crate::theme::Theme;

/// Renders a [`PreviewState`]: gutter plus unwrapped, horizontally
/// scrollable text.
pub struct PreviewView<'a> {
    state: &'a PreviewState,
    theme: &'a Theme,
}

impl<'a> PreviewView<'a> {
    pub fn new(state: &'a PreviewState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn visible<'l>(lines: &'l [Line<'static>], scroll: usize, height: usize) -> &'l [Line<'static>] {
        let start = scroll.min(lines.len());
        let end = (start + height).min(lines.len());
        &lines[start..end]
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Widget for PreviewView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let height = area.height as usize;
        let h_scroll = to_u16(self.state.h_scroll);

        match &self.state.content {
            PreviewContent::Empty => {
                Paragraph::new(Line::from(Span::styled(
                    "Select a file to preview",
                    self.theme.help_desc,
                )))
                .render(area, buf);
            }
            PreviewContent::Text(highlighted) => {
                let digits = highlighted.gutter_digits();
                let [gutter, body] =
                    Layout::horizontal([Constraint::Length(to_u16(digits + 1)), Constraint::Min(1)]).areas(area);

                let first = self.state.scroll.min(highlighted.line_count());
                let lines = Self::visible(&highlighted.lines, self.state.scroll, height);

                let numbers: Vec<Line> = (first + 1..=first + lines.len())
                    .map(|n| Line::from(Span::styled(format!("{n:>digits$} "), self.theme.line_number)))
                    .collect();
                Paragraph::new(numbers).render(gutter, buf);

                // No wrap: long lines are clipped and scrolled sideways
                Paragraph::new(lines.to_vec())
                    .scroll((0, h_scroll))
                    .render(body, buf);
            }
            PreviewContent::Failure(diagnostic) => {
                let lines = diagnostic.to_lines(self.theme);
                let lines = Self::visible(&lines, self.state.scroll, height);
                Paragraph::new(lines.to_vec())
                    .scroll((0, h_scroll))
                    .render(area, buf);
            }
        }
    }
}
