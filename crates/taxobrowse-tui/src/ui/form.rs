//! Form tab widget: a vertical stack of labeled inputs.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget};

use crate::form::{FieldBuffer, FormTab, InputState, TextAreaState};
use crate::theme::Theme;

/// Rows taken by a single-line field (border, text, border).
const SINGLE_LINE_HEIGHT: u16 = 3;

/// Visible text rows of a multi-line field.
const TEXT_AREA_ROWS: u16 = 4;

fn field_height(buffer: &FieldBuffer) -> u16 {
    match buffer {
        FieldBuffer::Single(_) => SINGLE_LINE_HEIGHT,
        FieldBuffer::Multi(_) => TEXT_AREA_ROWS + 2,
    }
}

/// Index of the first field to draw so that `focused` fits in `height`.
fn first_visible(heights: &[u16], focused: usize, height: u16) -> usize {
    let mut used = 0u16;
    let mut first = focused.min(heights.len().saturating_sub(1));
    for idx in (0..=first).rev() {
        used = used.saturating_add(heights[idx]);
        if used > height {
            break;
        }
        first = idx;
    }
    first
}

/// Split `chars` into (before cursor, cursor cell, after cursor) inside a
/// window of `width` columns that keeps the cursor visible.
fn cursor_window(text: &str, cursor: usize, width: usize) -> (String, String, String) {
    let chars: Vec<char> = text.chars().collect();
    let start = cursor.saturating_sub(width.saturating_sub(1));
    let end = (start + width).min(chars.len());

    let before: String = chars[start.min(end)..cursor.min(end)].iter().collect();
    let at = chars.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
    let after: String = if cursor < end {
        chars[cursor + 1..end].iter().collect()
    } else {
        String::new()
    };
    (before, at, after)
}

/// Renders one [`FormTab`].
pub struct FormView<'a> {
    theme: &'a Theme,
    /// Whether the content pane has focus (draws the cursor).
    focused: bool,
}

impl<'a> FormView<'a> {
    pub fn new(theme: &'a Theme, focused: bool) -> Self {
        Self { theme, focused }
    }

    fn block(&self, label: String, is_focused: bool) -> Block<'static> {
        let (label_style, border_style, border_type) = if is_focused {
            (self.theme.field_label_focused, self.theme.border_focused, BorderType::Rounded)
        } else {
            (self.theme.field_label, self.theme.border, BorderType::Plain)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .title(Span::styled(label, label_style))
    }

    fn input_line(&self, input: &InputState, placeholder: String, width: usize, show_cursor: bool) -> Line<'static> {
        if input.buffer().is_empty() && !show_cursor {
            return Line::from(Span::styled(placeholder, Style::default().fg(self.theme.muted)));
        }
        if !show_cursor {
            let (before, at, after) = cursor_window(input.buffer(), 0, width);
            return Line::from(Span::styled(before + &at + &after, self.theme.field_input));
        }
        let (before, at, after) = cursor_window(input.buffer(), input.cursor(), width);
        Line::from(vec![
            Span::styled(before, self.theme.field_input),
            Span::styled(at, self.theme.cursor),
            Span::styled(after, self.theme.field_input),
        ])
    }

    fn text_area_lines(&self, area: &TextAreaState, width: usize, height: usize, show_cursor: bool) -> Vec<Line<'static>> {
        let (cursor_row, cursor_col) = area.cursor();
        area.lines()
            .iter()
            .enumerate()
            .skip(area.scroll)
            .take(height)
            .map(|(row, text)| {
                if show_cursor && row == cursor_row {
                    let (before, at, after) = cursor_window(text, cursor_col, width);
                    Line::from(vec![
                        Span::styled(before, self.theme.field_input),
                        Span::styled(at, self.theme.cursor),
                        Span::styled(after, self.theme.field_input),
                    ])
                } else {
                    Line::from(Span::styled(text.clone(), self.theme.field_input))
                }
            })
            .collect()
    }
}

impl StatefulWidget for FormView<'_> {
    type State = FormTab;

    fn render(self, area: Rect, buf: &mut Buffer, tab: &mut Self::State) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let heights: Vec<u16> = tab.fields().map(|(_, buffer)| field_height(buffer)).collect();
        let first = first_visible(&heights, tab.focused, area.height);
        let focused = tab.focused;

        let mut y = area.y;
        for idx in first..heights.len() {
            let height = heights[idx];
            if y + height > area.y + area.height {
                break;
            }
            let field_area = Rect::new(area.x, y, area.width, height);
            y += height;

            let is_focused = idx == focused;
            let show_cursor = self.focused && is_focused;
            let Some(spec) = tab.spec.fields.get(idx) else {
                break;
            };
            let block = self.block(spec.label(), is_focused);
            let inner = block.inner(field_area);
            block.render(field_area, buf);
            let width = inner.width as usize;

            match tab.field_mut(idx) {
                Some(FieldBuffer::Single(input)) => {
                    let line = self.input_line(input, spec.label(), width, show_cursor);
                    Paragraph::new(line).render(inner, buf);
                }
                Some(FieldBuffer::Multi(text_area)) => {
                    text_area.ensure_visible(inner.height as usize);
                    let lines = self.text_area_lines(text_area, width, inner.height as usize, show_cursor);
                    Paragraph::new(lines).render(inner, buf);
                }
                None => break,
            }
        }
    }
}
