//! UI components and widgets.

mod form;
mod preview;
mod tree;

pub use form::FormView;
pub use preview::PreviewView;
pub use tree::NavigatorView;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::BorderType;

use crate::theme::Theme;

/// Upper bound on the navigator width while the tree is de-emphasized.
pub const COMPACT_NAVIGATOR_WIDTH: u16 = 24;

/// Navigator share of the body while the tree is shown.
pub const NAVIGATOR_PERCENT: u16 = 30;

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub navigator: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area. The navigator is always present.
    pub fn new(area: Rect, show_tree: bool) -> Self {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let [navigator, content] =
            Layout::horizontal([PaneStyle::navigator_width(show_tree, body.width), Constraint::Min(20)])
                .areas(body);

        Self {
            header,
            navigator,
            content,
            footer,
        }
    }
}

/// Border treatment of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneStyle {
    pub border_type: BorderType,
    pub border_style: Style,
}

impl PaneStyle {
    /// Navigator styling for the given tree visibility and focus.
    pub fn navigator(show_tree: bool, focused: bool, theme: &Theme) -> Self {
        match (show_tree, focused) {
            (true, true) => Self {
                border_type: BorderType::Thick,
                border_style: theme.border_focused,
            },
            (true, false) => Self {
                border_type: BorderType::Rounded,
                border_style: theme.border,
            },
            (false, _) => Self {
                border_type: BorderType::Plain,
                border_style: theme.border_muted,
            },
        }
    }

    /// Content pane styling.
    pub fn content(focused: bool, theme: &Theme) -> Self {
        if focused {
            Self {
                border_type: BorderType::Thick,
                border_style: theme.border_focused,
            }
        } else {
            Self {
                border_type: BorderType::Rounded,
                border_style: theme.border,
            }
        }
    }

    /// Navigator column width. Compact is at most half the shown width.
    pub fn navigator_width(show_tree: bool, body_width: u16) -> Constraint {
        let shown = (u32::from(body_width) * u32::from(NAVIGATOR_PERCENT) / 100) as u16;
        if show_tree {
            Constraint::Length(shown)
        } else {
            Constraint::Length(COMPACT_NAVIGATOR_WIDTH.min(shown / 2))
        }
    }
}

/// Format a byte size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_keeps_navigator_when_hidden() {
        let area = Rect::new(0, 0, 100, 30);

        let shown = AppLayout::new(area, true);
        assert_eq!(shown.navigator.width, 30);
        assert_eq!(shown.content.width, 70);

        let compact = AppLayout::new(area, false);
        assert_eq!(compact.navigator.width, 15);
        assert_eq!(compact.header.height, 1);
        assert_eq!(compact.footer.height, 1);
    }

    #[test]
    fn test_compact_navigator_is_narrower_at_every_width() {
        for width in [60, 80, 100, 200] {
            let area = Rect::new(0, 0, width, 24);
            let shown = AppLayout::new(area, true).navigator.width;
            let compact = AppLayout::new(area, false).navigator.width;
            assert!(compact < shown, "width {width}: shown={shown} compact={compact}");
            assert!(compact <= COMPACT_NAVIGATOR_WIDTH);
        }

        let narrow = Rect::new(0, 0, 60, 24);
        assert_eq!(AppLayout::new(narrow, true).navigator.width, 18);
        assert_eq!(AppLayout::new(narrow, false).navigator.width, 9);
    }

    #[test]
    fn test_hidden_tree_is_muted() {
        let theme = Theme::dark();
        let muted = PaneStyle::navigator(false, true, &theme);
        assert_eq!(muted.border_style, theme.border_muted);
        assert_ne!(muted, PaneStyle::navigator(true, true, &theme));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(5), "5 B");
        assert!(format_size(2048).ends_with("KiB"));
    }
}
