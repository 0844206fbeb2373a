//! Color theme for the TUI.
//!
//! Dark and light variants over a slate palette.

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Theme variant (dark or light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub variant: ThemeVariant,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    pub selected: Style,
    pub error: Color,

    // Pane chrome
    pub border: Style,
    pub border_focused: Style,
    pub border_muted: Style,
    pub title: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub header: Style,
    pub footer: Style,

    // Navigator
    pub tree_lines: Style,
    pub directory: Style,
    pub file: Style,
    pub symlink: Style,
    pub size: Style,
    pub error_marker: Style,

    // Preview
    pub line_number: Style,
    pub indent_guide: Style,
    pub diagnostic_marker: Style,
    pub diagnostic_headline: Style,
    pub diagnostic_cause: Style,

    // Form
    pub field_label: Style,
    pub field_label_focused: Style,
    pub field_input: Style,
    pub cursor: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_300 = Color::Rgb(203, 213, 225);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        let blue_400 = Color::Rgb(96, 165, 250);
        let blue_500 = Color::Rgb(59, 130, 246);
        let red_400 = Color::Rgb(248, 113, 113);
        let red_500 = Color::Rgb(239, 68, 68);
        let cyan_400 = Color::Rgb(34, 211, 238);
        let amber_500 = Color::Rgb(245, 158, 11);

        Self {
            variant: ThemeVariant::Dark,
            background: slate_900,
            foreground: slate_100,
            muted: slate_500,

            selected: Style::new().bg(slate_700).fg(slate_50).add_modifier(Modifier::BOLD),
            error: red_500,

            border: Style::new().fg(slate_600),
            border_focused: Style::new().fg(blue_400),
            border_muted: Style::new().fg(slate_700),
            title: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            tab_active: Style::new().fg(slate_50).bg(slate_700).add_modifier(Modifier::BOLD),
            tab_inactive: Style::new().fg(slate_400),
            help_key: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_400),
            header: Style::new().bg(slate_800).fg(slate_100),
            footer: Style::new().bg(slate_800).fg(slate_400),

            tree_lines: Style::new().fg(slate_600),
            directory: Style::new().fg(blue_500).add_modifier(Modifier::BOLD),
            file: Style::new().fg(slate_300),
            symlink: Style::new().fg(cyan_400),
            size: Style::new().fg(slate_500),
            error_marker: Style::new().fg(red_500).add_modifier(Modifier::ITALIC),

            line_number: Style::new().fg(slate_600),
            indent_guide: Style::new().fg(slate_700),
            diagnostic_marker: Style::new().fg(red_500).add_modifier(Modifier::BOLD),
            diagnostic_headline: Style::new().fg(slate_100).add_modifier(Modifier::BOLD),
            diagnostic_cause: Style::new().fg(red_400),

            field_label: Style::new().fg(slate_400),
            field_label_focused: Style::new().fg(amber_500).add_modifier(Modifier::BOLD),
            field_input: Style::new().fg(slate_100),
            cursor: Style::new().add_modifier(Modifier::REVERSED),
        }
    }

    /// Light theme using a slate-based palette.
    pub fn light() -> Self {
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_200 = Color::Rgb(226, 232, 240);
        let slate_300 = Color::Rgb(203, 213, 225);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        let blue_600 = Color::Rgb(37, 99, 235);
        let blue_700 = Color::Rgb(29, 78, 216);
        let red_600 = Color::Rgb(220, 38, 38);
        let red_700 = Color::Rgb(185, 28, 28);
        let cyan_600 = Color::Rgb(8, 145, 178);
        let amber_600 = Color::Rgb(217, 119, 6);

        Self {
            variant: ThemeVariant::Light,
            background: slate_50,
            foreground: slate_900,
            muted: slate_500,

            selected: Style::new().bg(slate_200).fg(slate_900).add_modifier(Modifier::BOLD),
            error: red_600,

            border: Style::new().fg(slate_400),
            border_focused: Style::new().fg(blue_600),
            border_muted: Style::new().fg(slate_300),
            title: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            tab_active: Style::new().fg(slate_900).bg(slate_200).add_modifier(Modifier::BOLD),
            tab_inactive: Style::new().fg(slate_600),
            help_key: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_600),
            header: Style::new().bg(slate_100).fg(slate_800),
            footer: Style::new().bg(slate_100).fg(slate_600),

            tree_lines: Style::new().fg(slate_400),
            directory: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            file: Style::new().fg(slate_700),
            symlink: Style::new().fg(cyan_600),
            size: Style::new().fg(slate_500),
            error_marker: Style::new().fg(red_600).add_modifier(Modifier::ITALIC),

            line_number: Style::new().fg(slate_400),
            indent_guide: Style::new().fg(slate_300),
            diagnostic_marker: Style::new().fg(red_600).add_modifier(Modifier::BOLD),
            diagnostic_headline: Style::new().fg(slate_900).add_modifier(Modifier::BOLD),
            diagnostic_cause: Style::new().fg(red_700),

            field_label: Style::new().fg(slate_600),
            field_label_focused: Style::new().fg(amber_600).add_modifier(Modifier::BOLD),
            field_input: Style::new().fg(slate_900),
            cursor: Style::new().add_modifier(Modifier::REVERSED),
        }
    }

    /// Create theme from variant.
    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
