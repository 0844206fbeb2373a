//! Syntax highlighting using syntect.

use std::path::Path;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{self, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::content::PreviewError;

/// Fixed highlighting theme.
pub const THEME_NAME: &str = "base16-ocean.dark";

/// Global syntax highlighting resources (loaded once).
static SYNTECT: OnceLock<(SyntaxSet, Theme)> = OnceLock::new();

/// Syntax highlighter for file previews.
pub struct SyntaxHighlighter;

impl SyntaxHighlighter {
    /// Initialize and get the global syntax/theme resources.
    pub fn init() -> (&'static SyntaxSet, &'static Theme) {
        let (syntaxes, theme) = SYNTECT.get_or_init(|| {
            let syntaxes = SyntaxSet::load_defaults_newlines();
            let mut theme_set = ThemeSet::load_defaults();
            let theme = theme_set
                .themes
                .remove(THEME_NAME)
                .or_else(|| theme_set.themes.into_values().next())
                .unwrap_or_default();
            (syntaxes, theme)
        });
        (syntaxes, theme)
    }

    /// Find the syntax definition for a file based on name, extension or first line.
    pub fn find_syntax(path: &Path, first_line: Option<&str>) -> Option<&'static SyntaxReference> {
        let (syntaxes, _) = Self::init();

        // Try by filename first (Makefile, Dockerfile, ...)
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if let Some(syntax) = syntaxes.find_syntax_by_extension(name) {
                return Some(syntax);
            }
        }

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if let Some(syntax) = syntaxes.find_syntax_by_extension(ext) {
                return Some(syntax);
            }
        }

        // Shebang detection
        first_line.and_then(|line| syntaxes.find_syntax_by_first_line(line))
    }

    /// Syntax used when nothing matches.
    pub fn plain_text() -> &'static SyntaxReference {
        Self::init().0.find_syntax_plain_text()
    }

    /// Highlight `text` and convert it to ratatui lines, one per source line.
    pub fn highlight_text(
        text: &str,
        syntax: &SyntaxReference,
        tab_size: u8,
        indent_guides: bool,
        guide_style: Style,
    ) -> Result<Vec<Line<'static>>, PreviewError> {
        let (syntaxes, theme) = Self::init();
        let mut highlighter = HighlightLines::new(syntax, theme);
        let tab_replacement = " ".repeat(tab_size as usize);
        let indent_unit = detect_indent_unit(text, &tab_replacement).unwrap_or(tab_size as usize);

        LinesWithEndings::from(text)
            .map(|line| {
                let regions = highlighter
                    .highlight_line(line, syntaxes)
                    .map_err(PreviewError::Highlight)?;
                let spans = Self::regions_to_spans(regions, &tab_replacement);
                let spans = if indent_guides {
                    with_indent_guides(spans, indent_unit, guide_style)
                } else {
                    spans
                };
                Ok(Line::from(spans))
            })
            .collect()
    }

    /// Convert syntect highlight regions to ratatui spans, dropping line endings.
    fn regions_to_spans(regions: Vec<(highlighting::Style, &str)>, tab_replacement: &str) -> Vec<Span<'static>> {
        regions
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.trim_end_matches(['\n', '\r']);
                if text.is_empty() {
                    return None;
                }

                let mut modifier = Modifier::empty();
                if style.font_style.contains(highlighting::FontStyle::BOLD) {
                    modifier |= Modifier::BOLD;
                }
                if style.font_style.contains(highlighting::FontStyle::ITALIC) {
                    modifier |= Modifier::ITALIC;
                }
                if style.font_style.contains(highlighting::FontStyle::UNDERLINE) {
                    modifier |= Modifier::UNDERLINED;
                }

                Some(Span::styled(
                    text.replace('\t', tab_replacement),
                    Style::default()
                        .fg(Self::to_ratatui_color(style.foreground))
                        .add_modifier(modifier),
                ))
            })
            .collect()
    }

    /// Convert syntect Color to ratatui Color.
    fn to_ratatui_color(color: highlighting::Color) -> Color {
        if color.a == 0 {
            // Terminal palette colors encoded with alpha = 0
            match color.r {
                0x00 => Color::Black,
                0x01 => Color::Red,
                0x02 => Color::Green,
                0x03 => Color::Yellow,
                0x04 => Color::Blue,
                0x05 => Color::Magenta,
                0x06 => Color::Cyan,
                0x07 => Color::White,
                n => Color::Indexed(n),
            }
        } else if color.a == 1 {
            Color::Reset
        } else {
            Color::Rgb(color.r, color.g, color.b)
        }
    }
}

const MIN_INDENT_UNIT: usize = 2;

/// Smallest leading indentation of at least 2 columns in `text`, capped at 8.
///
/// Single-space indents are alignment, not nesting.
fn detect_indent_unit(text: &str, tab_replacement: &str) -> Option<usize> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.replace('\t', tab_replacement)
                .chars()
                .take_while(|c| *c == ' ')
                .count()
        })
        .filter(|&indent| indent >= MIN_INDENT_UNIT)
        .min()
        .map(|unit| unit.min(8))
}

/// Replace leading indentation with a `│` guide at every indent level.
///
/// Whitespace-only lines are left alone.
fn with_indent_guides(spans: Vec<Span<'static>>, unit: usize, guide_style: Style) -> Vec<Span<'static>> {
    let indent: usize = spans
        .iter()
        .flat_map(|s| s.content.chars())
        .take_while(|c| *c == ' ')
        .count();
    let width: usize = spans.iter().map(|s| s.content.chars().count()).sum();

    if unit == 0 || indent < unit || indent == width {
        return spans;
    }

    let levels = indent / unit;
    let mut guide = String::with_capacity(levels * unit);
    for _ in 0..levels {
        guide.push('│');
        guide.push_str(&" ".repeat(unit - 1));
    }

    // Leading indentation is ASCII spaces, so byte and column counts agree
    let mut to_skip = levels * unit;
    let mut out = Vec::with_capacity(spans.len() + 1);
    out.push(Span::styled(guide, guide_style));
    for span in spans {
        if to_skip == 0 {
            out.push(span);
            continue;
        }
        let len = span.content.len();
        if len <= to_skip {
            to_skip -= len;
            continue;
        }
        let rest = span.content[to_skip..].to_string();
        to_skip = 0;
        out.push(Span::styled(rest, span.style));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_find_syntax_by_extension() {
        let syntax = SyntaxHighlighter::find_syntax(Path::new("qna.yaml"), None).unwrap();
        assert_eq!(syntax.name, "YAML");

        let syntax = SyntaxHighlighter::find_syntax(Path::new("README.md"), None).unwrap();
        assert_eq!(syntax.name, "Markdown");
    }

    #[test]
    fn test_find_syntax_by_shebang() {
        let syntax = SyntaxHighlighter::find_syntax(Path::new("script"), Some("#!/bin/bash")).unwrap();
        assert!(syntax.name.to_lowercase().contains("bash"));
        assert!(SyntaxHighlighter::find_syntax(Path::new("notes"), Some("hello")).is_none());
    }

    #[test]
    fn test_highlight_preserves_text() {
        let text = "created_by: me\nseed_examples:\n  - question: why?\n";
        let syntax = SyntaxHighlighter::find_syntax(Path::new("qna.yaml"), None).unwrap();
        let lines = SyntaxHighlighter::highlight_text(text, syntax, 4, false, Style::default()).unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "created_by: me");
        assert_eq!(line_text(&lines[2]), "  - question: why?");
    }

    #[test]
    fn test_indent_guides() {
        let text = "a:\n  b:\n    c: 1\n";
        let syntax = SyntaxHighlighter::find_syntax(Path::new("x.yaml"), None).unwrap();
        let lines = SyntaxHighlighter::highlight_text(text, syntax, 4, true, Style::default()).unwrap();

        assert_eq!(line_text(&lines[0]), "a:");
        assert_eq!(line_text(&lines[1]), "│ b:");
        assert_eq!(line_text(&lines[2]), "│ │ c: 1");
    }

    #[test]
    fn test_tabs_are_expanded() {
        let text = "\tindented\n";
        let lines =
            SyntaxHighlighter::highlight_text(text, SyntaxHighlighter::plain_text(), 4, false, Style::default())
                .unwrap();
        assert_eq!(line_text(&lines[0]), "    indented");
    }

    #[test]
    fn test_detect_indent_unit() {
        assert_eq!(detect_indent_unit("a\n  b\n    c", "    "), Some(2));
        assert_eq!(detect_indent_unit("a\nb", "    "), None);
        assert_eq!(detect_indent_unit("- a\n - b\n    code", "    "), Some(4));
    }

    #[test]
    fn test_single_space_indent_keeps_nesting_readable() {
        let text = "- a\n - b\n    code\n";
        let lines =
            SyntaxHighlighter::highlight_text(text, SyntaxHighlighter::plain_text(), 4, true, Style::default())
                .unwrap();

        assert_eq!(line_text(&lines[1]), " - b");
        assert_eq!(line_text(&lines[2]), "│   code");
    }
}
