//! Multi-line text area.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::InputResult;

/// State of a multi-line text area. Row and column count characters.
#[derive(Debug, Clone)]
pub struct TextAreaState {
    lines: Vec<String>,
    row: usize,
    col: usize,
    /// First visible row.
    pub scroll: usize,
}

impl Default for TextAreaState {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            scroll: 0,
        }
    }
}

impl TextAreaState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = lines.len() - 1;
        let col = lines[row].chars().count();
        Self {
            lines,
            row,
            col,
            scroll: 0,
        }
    }

    /// Full text with lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as (row, column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_index(&self, row: usize, col: usize) -> usize {
        let line = &self.lines[row];
        line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
    }

    /// Keep the cursor row inside a viewport of `height` rows.
    pub fn ensure_visible(&mut self, height: usize) {
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if height > 0 && self.row >= self.scroll + height {
            self.scroll = self.row - height + 1;
        }
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => InputResult::Cancel,
            (KeyCode::Tab, _) => InputResult::Next,
            (KeyCode::BackTab, _) => InputResult::Prev,

            (KeyCode::Enter, _) => {
                let idx = self.byte_index(self.row, self.col);
                let rest = self.lines[self.row].split_off(idx);
                self.row += 1;
                self.lines.insert(self.row, rest);
                self.col = 0;
                InputResult::Continue
            }

            (KeyCode::Backspace, _) => {
                if self.col > 0 {
                    self.col -= 1;
                    let idx = self.byte_index(self.row, self.col);
                    self.lines[self.row].remove(idx);
                } else if self.row > 0 {
                    let line = self.lines.remove(self.row);
                    self.row -= 1;
                    self.col = self.line_len(self.row);
                    self.lines[self.row].push_str(&line);
                }
                InputResult::Continue
            }

            (KeyCode::Delete, _) => {
                if self.col < self.line_len(self.row) {
                    let idx = self.byte_index(self.row, self.col);
                    self.lines[self.row].remove(idx);
                } else if self.row + 1 < self.lines.len() {
                    let next = self.lines.remove(self.row + 1);
                    self.lines[self.row].push_str(&next);
                }
                InputResult::Continue
            }

            (KeyCode::Left, _) => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.line_len(self.row);
                }
                InputResult::Continue
            }

            (KeyCode::Right, _) => {
                if self.col < self.line_len(self.row) {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
                InputResult::Continue
            }

            // Up/Down leave the area at its first/last line
            (KeyCode::Up, _) => {
                if self.row == 0 {
                    return InputResult::Prev;
                }
                self.row -= 1;
                self.col = self.col.min(self.line_len(self.row));
                InputResult::Continue
            }

            (KeyCode::Down, _) => {
                if self.row + 1 >= self.lines.len() {
                    return InputResult::Next;
                }
                self.row += 1;
                self.col = self.col.min(self.line_len(self.row));
                InputResult::Continue
            }

            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.col = 0;
                InputResult::Continue
            }

            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.col = self.line_len(self.row);
                InputResult::Continue
            }

            // Ctrl-U - clear the current line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.lines[self.row].clear();
                self.col = 0;
                InputResult::Continue
            }

            // Ctrl-K - kill to end of line
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                let idx = self.byte_index(self.row, self.col);
                self.lines[self.row].truncate(idx);
                InputResult::Continue
            }

            // Ctrl-W - delete the word before the cursor, within the line
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.col > 0 {
                    let end = self.byte_index(self.row, self.col);
                    let line = &mut self.lines[self.row];
                    let word_start = line[..end]
                        .trim_end()
                        .rfind(char::is_whitespace)
                        .map(|i| i + 1)
                        .unwrap_or(0);
                    line.replace_range(word_start..end, "");
                    self.col = line[..word_start].chars().count();
                }
                InputResult::Continue
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let idx = self.byte_index(self.row, self.col);
                self.lines[self.row].insert(idx, c);
                self.col += 1;
                InputResult::Continue
            }

            _ => InputResult::Continue,
        }
    }
}
