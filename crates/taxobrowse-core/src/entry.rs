//! Form values and the typed entries they export to.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{EntryKind, EntrySchema, FieldGroup};

/// Address of one field inside a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub tab: &'static str,
    pub field: &'static str,
}

impl FieldKey {
    pub fn new(tab: &'static str, field: &'static str) -> Self {
        Self { tab, field }
    }
}

/// Raw text typed into a form, keyed by tab and field.
///
/// Fields that were never touched read back as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<FieldKey, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the text of a field.
    pub fn set(&mut self, tab: &'static str, field: &'static str, value: impl Into<String>) {
        self.values.insert(FieldKey::new(tab, field), value.into());
    }

    /// Text of a field, or `""` if it was never set.
    pub fn get(&self, tab: &'static str, field: &'static str) -> &str {
        self.values
            .get(&FieldKey::new(tab, field))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Iterate over every stored field.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// True when every stored value is blank.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }

    /// Build the typed entry described by `schema`.
    ///
    /// Metadata comes from the first tab that has the field filled in. Every
    /// tab holding example fields contributes a seed example; tabs after the
    /// first only when at least one of their example fields is non-blank.
    pub fn export(&self, schema: &EntrySchema) -> Entry {
        let main = schema.tabs.first().map(|t| t.id).unwrap_or("content");
        let text = |field: &'static str| self.metadata(schema, field).to_string();
        let seed_examples = self.seed_examples(schema);

        match schema.kind {
            EntryKind::Knowledge => Entry::Knowledge(KnowledgeEntry {
                task_description: text("task_description"),
                created_by: text("created_by"),
                domain: String::new(),
                document: text("document"),
                repo: text("repo"),
                commit: text("commit"),
                patterns: split_patterns(self.get(main, "patterns")),
                seed_examples,
            }),
            EntryKind::Skill => Entry::Skill(SkillEntry {
                task_description: text("task_description"),
                created_by: text("created_by"),
                seed_examples,
            }),
        }
    }

    fn metadata(&self, schema: &EntrySchema, field: &'static str) -> &str {
        schema
            .tabs
            .iter()
            .filter(|tab| tab.field(field).is_some())
            .map(|tab| self.get(tab.id, field).trim())
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    fn seed_examples(&self, schema: &EntrySchema) -> Vec<SeedExample> {
        schema
            .tabs
            .iter()
            .enumerate()
            .filter(|(_, tab)| tab.fields.iter().any(|f| f.group == FieldGroup::Example))
            .filter_map(|(i, tab)| {
                let example = SeedExample {
                    question: self.get(tab.id, "question").trim().to_string(),
                    context: self.get(tab.id, "context").trim().to_string(),
                    answer: self.get(tab.id, "answer").trim().to_string(),
                };
                (i == 0 || !example.is_blank()).then_some(example)
            })
            .collect()
    }
}

fn split_patterns(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// One question/context/answer triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedExample {
    pub question: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,
    pub answer: String,
}

impl SeedExample {
    pub fn is_blank(&self) -> bool {
        self.question.is_empty() && self.context.is_empty() && self.answer.is_empty()
    }
}

/// A knowledge entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeEntry {
    pub task_description: String,
    pub created_by: String,
    pub domain: String,
    pub document: String,
    pub repo: String,
    pub commit: String,
    pub patterns: Vec<String>,
    pub seed_examples: Vec<SeedExample>,
}

/// A skill entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillEntry {
    pub task_description: String,
    pub created_by: String,
    pub seed_examples: Vec<SeedExample>,
}

/// Typed record exported from a form, one variant per schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    Knowledge(KnowledgeEntry),
    Skill(SkillEntry),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Knowledge(_) => EntryKind::Knowledge,
            Self::Skill(_) => EntryKind::Skill,
        }
    }

    pub fn seed_examples(&self) -> &[SeedExample] {
        match self {
            Self::Knowledge(e) => &e.seed_examples,
            Self::Skill(e) => &e.seed_examples,
        }
    }

    /// Render the entry as the body of a `qna.yaml` file, without the kind tag.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        match self {
            Self::Knowledge(e) => serde_yaml::to_string(e),
            Self::Skill(e) => serde_yaml::to_string(e),
        }
    }
}
