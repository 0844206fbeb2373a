//! Main application state and logic.

mod constants;
mod render;
pub mod state;

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame};

use taxobrowse_core::{BrowserConfig, Entry, EntrySchema};

use crate::event::KeyAction;
use crate::form::{ActiveTab, EntryForm, FormResult};
use crate::navigator::{FileSelected, Navigator, NodeKind};
use crate::preview::{Highlight, PreviewState, Subtitle, SyntectHighlighter};
use crate::theme::Theme;
use crate::ui::PaneStyle;

use self::constants::{H_SCROLL_STEP, PAGE_SIZE, TICK_INTERVAL_MS};
use self::state::Focus;

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// View controller: owns the navigator, the entry form and the preview, and
/// routes keys between them.
pub struct App {
    config: BrowserConfig,
    theme: Theme,
    show_tree: bool,
    focus: Focus,
    navigator: Navigator,
    form: EntryForm,
    preview: PreviewState,
    /// Subtitle of the last render, if any file has been selected.
    subtitle: Option<Subtitle>,
    highlighter: Box<dyn Highlight>,
    should_quit: bool,
    needs_redraw: bool,
}

impl App {
    /// Create the application for a resolved configuration.
    pub fn new(config: BrowserConfig, theme: Theme) -> Self {
        let highlighter = SyntectHighlighter::new().with_guide_style(theme.indent_guide);
        Self::with_highlighter(config, theme, Box::new(highlighter))
    }

    /// Create the application with a custom highlighter.
    pub fn with_highlighter(config: BrowserConfig, theme: Theme, highlighter: Box<dyn Highlight>) -> Self {
        let navigator = Navigator::new(config.root.clone());
        let form = EntryForm::new(config.kind.schema());
        Self {
            show_tree: config.show_tree,
            config,
            theme,
            focus: Focus::default(),
            navigator,
            form,
            preview: PreviewState::new(),
            subtitle: None,
            highlighter,
            should_quit: false,
            needs_redraw: true,
        }
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        tracing::info!(
            kind = %self.config.kind,
            root = %self.config.root.display(),
            show_tree = self.show_tree,
            "browser started"
        );

        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while !self.should_quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                            self.needs_redraw = true;
                        }
                        Some(Ok(Event::Resize(..))) => self.needs_redraw = true,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }

                _ = interval.tick() => {}
            }
        }

        tracing::info!("browser stopped");
        Ok(())
    }

    /// Draw the full screen.
    pub fn draw(&mut self, frame: &mut Frame) {
        render::render_app(self, frame.area(), frame.buffer_mut());
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn show_tree(&self) -> bool {
        self.show_tree
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn subtitle(&self) -> Option<&Subtitle> {
        self.subtitle.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current navigator pane styling.
    pub fn navigator_pane_style(&self) -> PaneStyle {
        PaneStyle::navigator(self.show_tree, self.focus == Focus::Navigator, &self.theme)
    }

    /// Flip between the emphasized and the compact navigator.
    pub fn toggle_files(&mut self) {
        self.show_tree = !self.show_tree;
        tracing::debug!(show_tree = self.show_tree, "navigator toggled");
    }

    /// Show the preview tab and give it focus.
    pub fn view_content(&mut self) {
        self.form.activate_tab(EntrySchema::PREVIEW_TAB_ID);
        self.set_focus(Focus::Content);
    }

    /// Render a selected file and bring the preview tab forward.
    pub fn on_file_selected(&mut self, event: FileSelected) {
        let subtitle = self.preview.render(&event.path, self.highlighter.as_ref());
        self.subtitle = Some(subtitle);
        self.form.activate_tab(EntrySchema::PREVIEW_TAB_ID);
    }

    /// Export the form's current values.
    pub fn export_entry(&self) -> Entry {
        self.form.export()
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            tracing::debug!(%focus, "focus changed");
            self.focus = focus;
        }
    }

    fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl-C quits from everywhere, text fields included
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match (self.focus, self.form.active_tab()) {
            (Focus::Navigator, _) => self.handle_navigator_action(KeyAction::from_key_event(key)),
            (Focus::Content, ActiveTab::Form(_)) => {
                if self.form.handle_key(key) == FormResult::Leave {
                    self.set_focus(Focus::Navigator);
                }
            }
            (Focus::Content, ActiveTab::Preview) => self.handle_preview_action(KeyAction::from_key_event(key)),
        }
    }

    /// Actions shared by every pane outside text editing.
    fn handle_global_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit | KeyAction::ForceQuit => self.quit(),
            KeyAction::ToggleFiles => self.toggle_files(),
            KeyAction::ViewContent => self.view_content(),
            KeyAction::NextTab => self.form.next_tab(),
            KeyAction::PrevTab => self.form.prev_tab(),
            _ => return false,
        }
        true
    }

    fn handle_navigator_action(&mut self, action: KeyAction) {
        if self.handle_global_action(action) {
            return;
        }

        match action {
            KeyAction::MoveUp => self.navigator.move_up(1),
            KeyAction::MoveDown => self.navigator.move_down(1),
            KeyAction::JumpToTop => self.navigator.jump_to_top(),
            KeyAction::JumpToBottom => self.navigator.jump_to_bottom(),
            KeyAction::PageUp => self.navigator.page_up(PAGE_SIZE),
            KeyAction::PageDown => self.navigator.page_down(PAGE_SIZE),
            KeyAction::MoveLeft => self.navigator.collapse(),
            KeyAction::MoveRight => {
                let is_dir = self
                    .navigator
                    .selected_item()
                    .is_some_and(|item| item.kind == NodeKind::Directory);
                if is_dir {
                    self.navigator.expand();
                } else if let Some(event) = self.navigator.activate() {
                    self.on_file_selected(event);
                }
            }
            KeyAction::Activate => {
                if let Some(event) = self.navigator.activate() {
                    self.on_file_selected(event);
                }
            }
            KeyAction::FocusContent => self.set_focus(Focus::Content),
            KeyAction::SelectTab(idx) => {
                if !self.form.activate_index(idx) {
                    tracing::debug!(idx, "no tab at position");
                }
            }
            _ => {}
        }
    }

    fn handle_preview_action(&mut self, action: KeyAction) {
        if self.handle_global_action(action) {
            return;
        }

        match action {
            KeyAction::MoveUp => self.preview.scroll_up(1),
            KeyAction::MoveDown => self.preview.scroll_down(1),
            KeyAction::MoveLeft => self.preview.scroll_left(H_SCROLL_STEP),
            KeyAction::MoveRight => self.preview.scroll_right(H_SCROLL_STEP),
            KeyAction::JumpToTop => self.preview.scroll_home(),
            KeyAction::JumpToBottom => self.preview.scroll_end(),
            KeyAction::PageUp => self.preview.scroll_up(PAGE_SIZE),
            KeyAction::PageDown => self.preview.scroll_down(PAGE_SIZE),
            KeyAction::Back => self.set_focus(Focus::Navigator),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use crossterm::event::KeyEventState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use taxobrowse_core::EntryKind;
    use tempfile::TempDir;

    use super::*;
    use crate::preview::{Highlighted, PreviewContent, PreviewError};

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key_event(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app_at(root: &Path, kind: EntryKind) -> App {
        let config = BrowserConfig::builder().kind(kind).root(root).build().unwrap();
        App::new(config, Theme::dark())
    }

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.md"), "# Photosynthesis\n\nLight becomes sugar.\n").unwrap();
        fs::write(temp.path().join("b.bin"), [0x7f, b'E', b'L', b'F', 0x00, 0x01]).unwrap();
        temp
    }

    #[test]
    fn test_initial_state() {
        let temp = fixture();
        let app = app_at(temp.path(), EntryKind::Knowledge);

        assert!(app.show_tree());
        assert_eq!(app.focus(), Focus::Navigator);
        assert_eq!(app.form().active_tab(), ActiveTab::Form(0));
        assert!(app.subtitle().is_none());
        assert_eq!(app.navigator().len(), 3);
    }

    #[test]
    fn test_toggle_files_twice_restores_styling() {
        let temp = fixture();
        let mut app = app_at(temp.path(), EntryKind::Knowledge);
        let before = app.navigator_pane_style();

        app.toggle_files();
        assert!(!app.show_tree());
        assert_ne!(app.navigator_pane_style(), before);

        press(&mut app, KeyCode::Char('f'));
        assert!(app.show_tree());
        assert_eq!(app.navigator_pane_style(), before);
    }

    #[test]
    fn test_select_text_then_binary_file() {
        let temp = fixture();
        let mut app = app_at(temp.path(), EntryKind::Knowledge);

        // Row 0 is the root, then a.md and b.bin
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        let a_md = temp.path().join("a.md");
        assert_eq!(app.subtitle(), Some(&Subtitle::Path(a_md)));
        assert!(matches!(app.preview().content, PreviewContent::Text(_)));
        assert_eq!(app.form().active_tab(), ActiveTab::Preview);
        assert_eq!(app.focus(), Focus::Navigator);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.subtitle(), Some(&Subtitle::Error));
        assert_eq!(app.subtitle().unwrap().to_string(), "ERROR");
        assert!(matches!(app.preview().content, PreviewContent::Failure(_)));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_empty_root() {
        let temp = TempDir::new().unwrap();
        let mut app = app_at(temp.path(), EntryKind::Skill);

        assert_eq!(app.navigator().len(), 1);
        assert!(app.navigator().root().expanded);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('l'));
        assert!(app.subtitle().is_none());
    }

    #[test]
    fn test_view_content_and_back() {
        let temp = fixture();
        let mut app = app_at(temp.path(), EntryKind::Knowledge);

        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.focus(), Focus::Content);
        assert_eq!(app.form().active_tab(), ActiveTab::Preview);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus(), Focus::Navigator);
    }

    #[test]
    fn test_q_quits_outside_text_fields_only() {
        let temp = fixture();
        let mut app = app_at(temp.path(), EntryKind::Knowledge);

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "quiz");
        assert!(!app.should_quit());
        assert_eq!(app.form().values().get("content", "task_description"), "quiz");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let temp = fixture();
        let mut app = app_at(temp.path(), EntryKind::Knowledge);

        press(&mut app, KeyCode::Tab);
        app.handle_key(key_event(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_tab_switches_preserve_values() {
        let temp = fixture();
        let mut app = app_at(temp.path(), EntryKind::Skill);

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Write a haiku");
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.form().active_tab(), ActiveTab::Form(1));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "About autumn?");
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.form().active_tab(), ActiveTab::Preview);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.form().active_tab(), ActiveTab::Form(0));

        let entry = app.export_entry();
        match entry {
            Entry::Skill(skill) => {
                assert_eq!(skill.task_description, "Write a haiku");
                assert_eq!(skill.seed_examples.len(), 2);
                assert_eq!(skill.seed_examples[1].question, "About autumn?");
            }
            other => panic!("expected skill entry, got {other:?}"),
        }
    }

    #[test]
    fn test_preview_scrolling_keys() {
        let temp = TempDir::new().unwrap();
        let body: String = (1..=50).map(|n| format!("line {n}\n")).collect();
        fs::write(temp.path().join("long.txt"), body).unwrap();
        let mut app = app_at(temp.path(), EntryKind::Knowledge);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::Content);

        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.preview().scroll, PAGE_SIZE + 1);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.preview().h_scroll, H_SCROLL_STEP);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.preview().scroll, 49);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.preview().scroll, 0);
        assert_eq!(app.preview().h_scroll, 0);
    }

    struct FailingHighlighter;

    impl Highlight for FailingHighlighter {
        fn highlight(&self, _path: &Path) -> Result<Highlighted, PreviewError> {
            Err(PreviewError::TooLarge { size: u64::MAX })
        }
    }

    #[test]
    fn test_highlighter_failure_is_contained() {
        let temp = fixture();
        let config = BrowserConfig::builder().root(temp.path()).build().unwrap();
        let mut app = App::with_highlighter(config, Theme::dark(), Box::new(FailingHighlighter));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.subtitle(), Some(&Subtitle::Error));
    }

    #[test]
    fn test_draw_smoke() {
        let temp = fixture();
        let mut app = app_at(temp.path(), EntryKind::Knowledge);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|frame| app.draw(frame)).unwrap();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        app.toggle_files();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(screen.contains("Light becomes sugar."));
        assert!(screen.contains("YAML"));
    }
}
