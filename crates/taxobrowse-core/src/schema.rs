//! Schema descriptors for the entry form.
//!
//! A schema is an ordered list of tabs, each holding an ordered list of
//! fields. The form widget, the value store and the exporter all walk the
//! same descriptor, so adding a field means touching only this file and the
//! matching [`Entry`](crate::Entry) variant.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of taxonomy entry being browsed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Knowledge,
    Skill,
}

impl EntryKind {
    /// Schema descriptor for this kind.
    pub fn schema(self) -> &'static EntrySchema {
        match self {
            Self::Knowledge => &KNOWLEDGE_SCHEMA,
            Self::Skill => &SKILL_SCHEMA,
        }
    }

    /// Directory browsed when neither the command line nor the settings
    /// file names one. Relative to the working directory.
    pub fn default_root(self) -> &'static str {
        match self {
            Self::Knowledge => "taxonomy/knowledge",
            Self::Skill => "taxonomy/compositional_skills",
        }
    }

    /// Human-readable title used in the header.
    pub fn title(self) -> &'static str {
        match self {
            Self::Knowledge => "Knowledge",
            Self::Skill => "Skills",
        }
    }
}

/// Whether a field is a one-line input or a free-form text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    SingleLine,
    MultiLine,
}

/// Which part of the entry a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    /// Entry-level metadata (`task_description`, `created_by`, ...).
    Metadata,
    /// Part of a seed example (`question`, `context`, `answer`).
    Example,
}

/// One labeled input in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub multiplicity: Multiplicity,
    pub group: FieldGroup,
}

impl FieldSpec {
    const fn single(name: &'static str) -> Self {
        Self {
            name,
            multiplicity: Multiplicity::SingleLine,
            group: FieldGroup::Metadata,
        }
    }

    const fn multi(name: &'static str) -> Self {
        Self {
            name,
            multiplicity: Multiplicity::MultiLine,
            group: FieldGroup::Metadata,
        }
    }

    const fn example(name: &'static str) -> Self {
        Self {
            name,
            multiplicity: Multiplicity::MultiLine,
            group: FieldGroup::Example,
        }
    }

    /// Label shown next to (or as placeholder of) the input.
    pub fn label(&self) -> String {
        format!("{}:", self.name)
    }

    pub fn is_multi_line(&self) -> bool {
        self.multiplicity == Multiplicity::MultiLine
    }
}

/// A tab of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTabSpec {
    /// Stable identifier used by `activate_tab`.
    pub id: &'static str,
    /// Title rendered in the tab bar.
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FormTabSpec {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Complete form layout for one entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySchema {
    pub kind: EntryKind,
    pub tabs: &'static [FormTabSpec],
}

impl EntrySchema {
    /// Identifier of the preview tab that follows every form tab.
    pub const PREVIEW_TAB_ID: &'static str = "YAML";

    /// Look up a form tab by id.
    pub fn tab(&self, id: &str) -> Option<&FormTabSpec> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Position of a form tab.
    pub fn tab_index(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// Total number of fields across all tabs.
    pub fn field_count(&self) -> usize {
        self.tabs.iter().map(|t| t.fields.len()).sum()
    }
}

const EXAMPLE_FIELDS: [FieldSpec; 3] = [
    FieldSpec::example("question"),
    FieldSpec::example("context"),
    FieldSpec::example("answer"),
];

static KNOWLEDGE_CONTENT: [FieldSpec; 9] = [
    FieldSpec::single("task_description"),
    FieldSpec::single("created_by"),
    FieldSpec::single("document"),
    FieldSpec::single("repo"),
    FieldSpec::single("commit"),
    FieldSpec::multi("patterns"),
    EXAMPLE_FIELDS[0],
    EXAMPLE_FIELDS[1],
    EXAMPLE_FIELDS[2],
];

static SKILL_CONTENT: [FieldSpec; 5] = [
    FieldSpec::single("task_description"),
    FieldSpec::single("created_by"),
    EXAMPLE_FIELDS[0],
    EXAMPLE_FIELDS[1],
    EXAMPLE_FIELDS[2],
];

static KNOWLEDGE_SCHEMA: EntrySchema = EntrySchema {
    kind: EntryKind::Knowledge,
    tabs: &[FormTabSpec {
        id: "content",
        title: "content",
        fields: &KNOWLEDGE_CONTENT,
    }],
};

static SKILL_SCHEMA: EntrySchema = EntrySchema {
    kind: EntryKind::Skill,
    tabs: &[
        FormTabSpec {
            id: "content",
            title: "content",
            fields: &SKILL_CONTENT,
        },
        FormTabSpec {
            id: "add-example",
            title: "add example",
            fields: &SKILL_CONTENT,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_knowledge_field_order() {
        let schema = EntryKind::Knowledge.schema();
        let names: Vec<_> = schema.tabs[0].fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "task_description",
                "created_by",
                "document",
                "repo",
                "commit",
                "patterns",
                "question",
                "context",
                "answer"
            ]
        );
        assert!(schema.tabs[0].field("patterns").unwrap().is_multi_line());
        assert!(!schema.tabs[0].field("repo").unwrap().is_multi_line());
    }

    #[test]
    fn test_skill_tabs() {
        let schema = EntryKind::Skill.schema();
        assert_eq!(schema.tabs.len(), 2);
        assert_eq!(schema.tab_index("add-example"), Some(1));
        assert_eq!(schema.tab("add-example").unwrap().title, "add example");
        assert_eq!(schema.field_count(), 10);
        assert!(schema.tab("add-example").unwrap().field("created_by").is_some());
        assert!(schema.tab("YAML").is_none());
    }

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!(EntryKind::from_str("skill").unwrap(), EntryKind::Skill);
        assert_eq!(EntryKind::Knowledge.to_string(), "knowledge");
        assert_eq!(EntryKind::Skill.default_root(), "taxonomy/compositional_skills");
    }
}
