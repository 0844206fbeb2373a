//! Core types for taxobrowse.
//!
//! This crate holds everything that does not depend on the terminal:
//! the entry schemas that drive the form, the typed entries a form exports
//! to, the browser configuration, and the lazy directory listing used by the
//! navigator.

mod config;
mod entry;
mod error;
mod listing;
mod schema;

pub use config::{BrowserConfig, BrowserConfigBuilder};
pub use entry::{Entry, FieldKey, FormValues, KnowledgeEntry, SeedExample, SkillEntry};
pub use error::BrowseError;
pub use listing::{DirEntryInfo, DirEntryKind, read_children};
pub use schema::{EntryKind, EntrySchema, FieldGroup, FieldSpec, FormTabSpec, Multiplicity};
