//! Schema-driven entry form.
//!
//! The form is a fixed stack of labeled inputs per tab. It keeps the typed
//! text in memory and exposes it only through [`EntryForm::values`] and
//! [`EntryForm::export`]; nothing is ever written to disk.

mod input;
mod textarea;

pub use input::{InputResult, InputState};
pub use textarea::TextAreaState;

use crossterm::event::KeyEvent;
use taxobrowse_core::{Entry, EntrySchema, FieldSpec, FormTabSpec, FormValues, Multiplicity};

/// Which pane tab is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    /// Form tab by position in the schema.
    Form(usize),
    #[default]
    Preview,
}

/// Text buffer backing one field.
#[derive(Debug, Clone)]
pub enum FieldBuffer {
    Single(InputState),
    Multi(TextAreaState),
}

impl FieldBuffer {
    fn for_spec(spec: &FieldSpec) -> Self {
        match spec.multiplicity {
            Multiplicity::SingleLine => Self::Single(InputState::new()),
            Multiplicity::MultiLine => Self::Multi(TextAreaState::new()),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::Single(input) => input.buffer().to_string(),
            Self::Multi(area) => area.text(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        match self {
            Self::Single(input) => input.handle_key(key),
            Self::Multi(area) => area.handle_key(key),
        }
    }
}

/// Fields of one form tab.
#[derive(Debug, Clone)]
pub struct FormTab {
    pub spec: &'static FormTabSpec,
    fields: Vec<FieldBuffer>,
    /// Index of the field receiving keystrokes.
    pub focused: usize,
}

impl FormTab {
    fn new(spec: &'static FormTabSpec) -> Self {
        Self {
            spec,
            fields: spec.fields.iter().map(FieldBuffer::for_spec).collect(),
            focused: 0,
        }
    }

    /// Fields in schema order, paired with their spec.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldBuffer)> {
        self.spec.fields.iter().zip(self.fields.iter())
    }

    pub fn field_mut(&mut self, idx: usize) -> Option<&mut FieldBuffer> {
        self.fields.get_mut(idx)
    }

    fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }
}

/// Outcome of a key handled by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResult {
    Continue,
    /// User asked to leave the form (Esc).
    Leave,
}

/// Entry form for one schema.
#[derive(Debug, Clone)]
pub struct EntryForm {
    schema: &'static EntrySchema,
    tabs: Vec<FormTab>,
    active: ActiveTab,
}

impl EntryForm {
    /// Create an empty form, showing its first tab.
    pub fn new(schema: &'static EntrySchema) -> Self {
        let active = if schema.tabs.is_empty() {
            ActiveTab::Preview
        } else {
            ActiveTab::Form(0)
        };
        Self {
            schema,
            tabs: schema.tabs.iter().map(FormTab::new).collect(),
            active,
        }
    }

    pub fn schema(&self) -> &'static EntrySchema {
        self.schema
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active
    }

    /// Number of tabs including the preview tab.
    pub fn tab_count(&self) -> usize {
        self.tabs.len() + 1
    }

    /// Tab bar titles, form tabs first, preview last.
    pub fn tab_titles(&self) -> Vec<&'static str> {
        self.tabs
            .iter()
            .map(|t| t.spec.title)
            .chain(std::iter::once(EntrySchema::PREVIEW_TAB_ID))
            .collect()
    }

    /// Position of the active tab in [`tab_titles`](Self::tab_titles).
    pub fn active_index(&self) -> usize {
        match self.active {
            ActiveTab::Form(i) => i,
            ActiveTab::Preview => self.tabs.len(),
        }
    }

    /// Switch the visible tab by id. Unknown ids leave the form unchanged.
    pub fn activate_tab(&mut self, tab_id: &str) -> bool {
        let target = if tab_id == EntrySchema::PREVIEW_TAB_ID {
            Some(ActiveTab::Preview)
        } else {
            self.schema.tab_index(tab_id).map(ActiveTab::Form)
        };

        match target {
            Some(tab) => {
                tracing::debug!(tab = tab_id, "tab activated");
                self.active = tab;
                true
            }
            None => false,
        }
    }

    /// Switch the visible tab by position (wrapping is the caller's job).
    pub fn activate_index(&mut self, idx: usize) -> bool {
        if idx < self.tabs.len() {
            self.active = ActiveTab::Form(idx);
            true
        } else if idx == self.tabs.len() {
            self.active = ActiveTab::Preview;
            true
        } else {
            false
        }
    }

    pub fn next_tab(&mut self) {
        let next = (self.active_index() + 1) % self.tab_count();
        self.activate_index(next);
    }

    pub fn prev_tab(&mut self) {
        let count = self.tab_count();
        let prev = (self.active_index() + count - 1) % count;
        self.activate_index(prev);
    }

    pub fn tab(&self, idx: usize) -> Option<&FormTab> {
        self.tabs.get(idx)
    }

    pub fn tab_mut(&mut self, idx: usize) -> Option<&mut FormTab> {
        self.tabs.get_mut(idx)
    }

    /// The form tab currently shown, if the preview is not.
    pub fn current_tab(&self) -> Option<&FormTab> {
        match self.active {
            ActiveTab::Form(i) => self.tabs.get(i),
            ActiveTab::Preview => None,
        }
    }

    /// Route a key to the focused field of the active form tab.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormResult {
        let ActiveTab::Form(idx) = self.active else {
            return FormResult::Continue;
        };
        let Some(tab) = self.tabs.get_mut(idx) else {
            return FormResult::Continue;
        };
        let focused = tab.focused;
        let Some(field) = tab.fields.get_mut(focused) else {
            return FormResult::Continue;
        };

        match field.handle_key(key) {
            InputResult::Continue => FormResult::Continue,
            InputResult::Cancel => FormResult::Leave,
            InputResult::Next => {
                tab.focus_next();
                FormResult::Continue
            }
            InputResult::Prev => {
                tab.focus_prev();
                FormResult::Continue
            }
        }
    }

    /// Snapshot of every field's text.
    pub fn values(&self) -> FormValues {
        let mut values = FormValues::new();
        for tab in &self.tabs {
            for (spec, buffer) in tab.fields() {
                values.set(tab.spec.id, spec.name, buffer.text());
            }
        }
        values
    }

    /// Export the typed entry for this form's schema.
    pub fn export(&self) -> Entry {
        self.values().export(self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use taxobrowse_core::EntryKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(form: &mut EntryForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_tabs_follow_schema() {
        let form = EntryForm::new(EntryKind::Skill.schema());
        assert_eq!(form.tab_titles(), ["content", "add example", "YAML"]);
        assert_eq!(form.active_tab(), ActiveTab::Form(0));
    }

    #[test]
    fn test_activate_tab_by_id() {
        let mut form = EntryForm::new(EntryKind::Skill.schema());

        assert!(form.activate_tab("add-example"));
        assert_eq!(form.active_tab(), ActiveTab::Form(1));
        assert!(form.activate_tab("YAML"));
        assert_eq!(form.active_tab(), ActiveTab::Preview);
        assert!(!form.activate_tab("missing"));
        assert_eq!(form.active_tab(), ActiveTab::Preview);
    }

    #[test]
    fn test_next_prev_tab_wraps() {
        let mut form = EntryForm::new(EntryKind::Knowledge.schema());
        form.next_tab();
        assert_eq!(form.active_tab(), ActiveTab::Preview);
        form.next_tab();
        assert_eq!(form.active_tab(), ActiveTab::Form(0));
        form.prev_tab();
        assert_eq!(form.active_tab(), ActiveTab::Preview);
    }

    #[test]
    fn test_typing_fills_focused_field_and_tab_moves_focus() {
        let mut form = EntryForm::new(EntryKind::Knowledge.schema());
        type_str(&mut form, "Describe tides");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "me");

        let values = form.values();
        assert_eq!(values.get("content", "task_description"), "Describe tides");
        assert_eq!(values.get("content", "created_by"), "me");
    }

    #[test]
    fn test_values_survive_tab_switches() {
        let mut form = EntryForm::new(EntryKind::Skill.schema());
        type_str(&mut form, "task");

        form.activate_tab("add-example");
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "extra question");
        form.activate_tab("YAML");
        // Keys are ignored while the preview is shown
        type_str(&mut form, "ignored");
        form.activate_tab("content");

        let values = form.values();
        assert_eq!(values.get("content", "task_description"), "task");
        assert_eq!(values.get("add-example", "question"), "extra question");
        assert_eq!(form.tab(0).unwrap().focused, 0);
    }

    #[test]
    fn test_focus_wraps_backwards() {
        let mut form = EntryForm::new(EntryKind::Skill.schema());
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.current_tab().unwrap().focused, 4);
    }

    #[test]
    fn test_escape_leaves_form() {
        let mut form = EntryForm::new(EntryKind::Skill.schema());
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormResult::Leave);
    }

    #[test]
    fn test_export_uses_schema() {
        let mut form = EntryForm::new(EntryKind::Skill.schema());
        // task_description, created_by, question
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "Write a limerick");

        let entry = form.export();
        assert_eq!(entry.kind(), EntryKind::Skill);
        assert_eq!(entry.seed_examples()[0].question, "Write a limerick");
    }
}
