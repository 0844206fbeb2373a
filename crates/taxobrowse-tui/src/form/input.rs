//! Single-line text input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling a key in a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Key was consumed by the field.
    Continue,
    /// Leave the form (Esc).
    Cancel,
    /// Move focus to the next field.
    Next,
    /// Move focus to the previous field.
    Prev,
}

/// State of a single-line input.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// The current input buffer.
    buffer: String,
    /// Cursor position within the buffer.
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input state with an initial value.
    pub fn with_initial(value: &str) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    /// Get the current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => InputResult::Cancel,

            // Enter and Down both advance, like tabbing through a form
            (KeyCode::Enter, _) | (KeyCode::Down, _) | (KeyCode::Tab, _) => InputResult::Next,
            (KeyCode::Up, _) | (KeyCode::BackTab, _) => InputResult::Prev,

            // Backspace - delete character before cursor
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let idx = self.byte_index(self.cursor);
                    self.buffer.remove(idx);
                }
                InputResult::Continue
            }

            // Delete - delete character at cursor
            (KeyCode::Delete, _) => {
                if self.cursor < self.char_len() {
                    let idx = self.byte_index(self.cursor);
                    self.buffer.remove(idx);
                }
                InputResult::Continue
            }

            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                InputResult::Continue
            }

            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                InputResult::Continue
            }

            // Home or Ctrl-A - move to start
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                InputResult::Continue
            }

            // End or Ctrl-E - move to end
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_len();
                InputResult::Continue
            }

            // Ctrl-U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.buffer.clear();
                self.cursor = 0;
                InputResult::Continue
            }

            // Ctrl-K - delete from cursor to end
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                let idx = self.byte_index(self.cursor);
                self.buffer.truncate(idx);
                InputResult::Continue
            }

            // Ctrl-W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor > 0 {
                    let end = self.byte_index(self.cursor);
                    let before = &self.buffer[..end];
                    let word_start = before
                        .trim_end()
                        .rfind(char::is_whitespace)
                        .map(|i| i + 1)
                        .unwrap_or(0);
                    self.buffer.replace_range(word_start..end, "");
                    self.cursor = self.buffer[..word_start].chars().count();
                }
                InputResult::Continue
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let idx = self.byte_index(self.cursor);
                self.buffer.insert(idx, c);
                self.cursor += 1;
                InputResult::Continue
            }

            _ => InputResult::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(input: &mut InputState, s: &str) {
        for c in s.chars() {
            input.handle_key(key_event(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn test_input_basic() {
        let mut input = InputState::new();
        type_str(&mut input, "test");

        assert_eq!(input.buffer(), "test");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_input_backspace() {
        let mut input = InputState::with_initial("test");

        input.handle_key(key_event(KeyCode::Backspace, KeyModifiers::NONE));

        assert_eq!(input.buffer(), "tes");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_input_cursor_movement() {
        let mut input = InputState::with_initial("test");

        input.handle_key(key_event(KeyCode::Home, KeyModifiers::NONE));
        assert_eq!(input.cursor(), 0);

        input.handle_key(key_event(KeyCode::End, KeyModifiers::NONE));
        assert_eq!(input.cursor(), 4);

        input.handle_key(key_event(KeyCode::Left, KeyModifiers::NONE));
        assert_eq!(input.cursor(), 3);

        input.handle_key(key_event(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_input_multibyte_characters() {
        let mut input = InputState::new();
        type_str(&mut input, "héllo");
        assert_eq!(input.cursor(), 5);

        input.handle_key(key_event(KeyCode::Left, KeyModifiers::NONE));
        input.handle_key(key_event(KeyCode::Left, KeyModifiers::NONE));
        input.handle_key(key_event(KeyCode::Left, KeyModifiers::NONE));
        input.handle_key(key_event(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(input.buffer(), "hllo");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_input_kill_commands() {
        let mut input = InputState::with_initial("created by someone");

        input.handle_key(key_event(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(input.buffer(), "created by ");

        input.handle_key(key_event(KeyCode::Home, KeyModifiers::NONE));
        input.handle_key(key_event(KeyCode::Right, KeyModifiers::NONE));
        input.handle_key(key_event(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(input.buffer(), "c");

        input.handle_key(key_event(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.buffer(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_navigation_results() {
        let mut input = InputState::with_initial("x");

        assert_eq!(input.handle_key(key_event(KeyCode::Enter, KeyModifiers::NONE)), InputResult::Next);
        assert_eq!(input.handle_key(key_event(KeyCode::Up, KeyModifiers::NONE)), InputResult::Prev);
        assert_eq!(input.handle_key(key_event(KeyCode::Esc, KeyModifiers::NONE)), InputResult::Cancel);
        assert_eq!(input.buffer(), "x");
    }
}
