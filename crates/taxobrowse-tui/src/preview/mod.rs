//! File preview for the content pane.
//!
//! Text files are syntax highlighted; anything that cannot be shown as text
//! becomes a [`Diagnostic`] trace.

mod content;
mod diagnostic;
mod syntax;

pub use content::{
    ERROR_SUBTITLE, Highlight, Highlighted, PreviewContent, PreviewError, PreviewState, Subtitle,
    SyntectHighlighter,
};
pub use diagnostic::Diagnostic;
pub use syntax::SyntaxHighlighter;
