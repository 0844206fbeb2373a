//! Key mapping for the TUI.
//!
//! Only used outside text editing: while a form field has focus, keys go to
//! the field and just `Ctrl-C` and `Esc` are interpreted by the app.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,
    /// Enter: toggle a directory or select a file.
    Activate,

    // Pane and tab switching
    FocusContent,
    Back,
    NextTab,
    PrevTab,
    /// Jump to a tab by zero-based position (keys `1`..`9`).
    SelectTab(usize),

    // View
    ToggleFiles,
    ViewContent,

    // Application
    Quit,
    ForceQuit,

    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,

            (KeyCode::Esc, _) => KeyAction::Back,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::MoveLeft,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::MoveRight,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Left, _) => KeyAction::MoveLeft,
            (KeyCode::Right, _) => KeyAction::MoveRight,

            // Jump (terminals disagree on whether 'G' carries SHIFT)
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::NONE | KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,

            (KeyCode::Enter, _) => KeyAction::Activate,
            (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::FocusContent,

            (KeyCode::Char('['), KeyModifiers::NONE) => KeyAction::PrevTab,
            (KeyCode::Char(']'), KeyModifiers::NONE) => KeyAction::NextTab,
            (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
                KeyAction::SelectTab(c as usize - '1' as usize)
            }

            (KeyCode::Char('f'), KeyModifiers::NONE) => KeyAction::ToggleFiles,
            (KeyCode::Char('v'), KeyModifiers::NONE) => KeyAction::ViewContent,

            _ => KeyAction::None,
        }
    }
}

/// Key binding for display in the footer.
#[derive(Debug, Clone, Copy)]
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

const fn bind(keys: &'static str, description: &'static str) -> KeyBinding {
    KeyBinding { keys, description }
}

/// Hints while the navigator has focus.
pub const NAVIGATOR_HINTS: &[KeyBinding] = &[
    bind("j/k", "move"),
    bind("l/Enter", "open"),
    bind("h", "collapse"),
    bind("Tab", "content"),
    bind("1-9 [ ]", "tabs"),
    bind("f", "files"),
    bind("v", "view"),
    bind("q", "quit"),
];

/// Hints while a form tab has focus.
pub const FORM_HINTS: &[KeyBinding] = &[
    bind("Tab/S-Tab", "field"),
    bind("Enter", "next/newline"),
    bind("Ctrl-u", "clear"),
    bind("Esc", "files"),
    bind("Ctrl-c", "quit"),
];

/// Hints while the preview tab has focus.
pub const PREVIEW_HINTS: &[KeyBinding] = &[
    bind("j/k", "scroll"),
    bind("h/l", "pan"),
    bind("g/G", "top/bottom"),
    bind("[ ]", "tabs"),
    bind("Esc", "files"),
    bind("f", "files"),
    bind("q", "quit"),
];

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

    fn action(code: KeyCode) -> KeyAction {
        KeyAction::from_key_event(key_event(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_view_bindings() {
        assert_eq!(action(KeyCode::Char('f')), KeyAction::ToggleFiles);
        assert_eq!(action(KeyCode::Char('v')), KeyAction::ViewContent);
        assert_eq!(action(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::ForceQuit
        );
    }

    #[test]
    fn test_tab_digits_are_zero_based() {
        assert_eq!(action(KeyCode::Char('1')), KeyAction::SelectTab(0));
        assert_eq!(action(KeyCode::Char('9')), KeyAction::SelectTab(8));
        assert_eq!(action(KeyCode::Char('0')), KeyAction::None);
    }

    #[test]
    fn test_jump_to_bottom_with_or_without_shift() {
        assert_eq!(action(KeyCode::Char('G')), KeyAction::JumpToBottom);
        assert_eq!(
            KeyAction::from_key_event(key_event(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            KeyAction::JumpToBottom
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(action(KeyCode::Char('j')), KeyAction::MoveDown);
        assert_eq!(action(KeyCode::Up), KeyAction::MoveUp);
        assert_eq!(action(KeyCode::Enter), KeyAction::Activate);
        assert_eq!(action(KeyCode::Tab), KeyAction::FocusContent);
        assert_eq!(action(KeyCode::Esc), KeyAction::Back);
        assert_eq!(action(KeyCode::Char(']')), KeyAction::NextTab);
    }
}
