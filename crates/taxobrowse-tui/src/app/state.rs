//! Application state types.

use strum::Display;

/// Pane receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Focus {
    #[default]
    Navigator,
    /// Active tab of the content pane (form or preview).
    Content,
}
