//! Application rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Tabs, Widget};

use crate::event::{FORM_HINTS, KeyBinding, NAVIGATOR_HINTS, PREVIEW_HINTS};
use crate::form::ActiveTab;
use crate::preview::Subtitle;
use crate::theme::Theme;
use crate::ui::{AppLayout, FormView, NavigatorView, PaneStyle, PreviewView};

use super::App;
use super::state::Focus;

/// Main render function for the application.
pub fn render_app(app: &mut App, area: Rect, buf: &mut Buffer) {
    let base_style = Style::default().bg(app.theme.background).fg(app.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area, app.show_tree);

    render_header(app, layout.header, buf);
    render_navigator(app, layout.navigator, buf);
    render_content(app, layout.content, buf);
    render_footer(app, layout.footer, buf);
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(" taxobrowse ", app.theme.title.add_modifier(Modifier::BOLD));
    let kind = Span::styled(format!(" {} ", app.config.kind.title()), app.theme.header);

    let subtitle = match &app.subtitle {
        Some(Subtitle::Error) => Span::styled(
            format!(" {} ", Subtitle::Error),
            Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
        ),
        Some(subtitle) => Span::styled(format!(" {subtitle} "), app.theme.header),
        None => Span::styled(
            format!(" {} ", app.config.root.display()),
            Style::default().fg(app.theme.muted),
        ),
    };

    Paragraph::new(Line::from(vec![title, kind, subtitle]))
        .style(app.theme.header)
        .render(area, buf);
}

fn pane_block(title: &'static str, style: PaneStyle, title_style: Style) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(style.border_type)
        .border_style(style.border_style)
        .title(Span::styled(format!(" {title} "), title_style))
}

fn render_navigator(app: &mut App, area: Rect, buf: &mut Buffer) {
    let style = app.navigator_pane_style();
    let title_style = if app.show_tree {
        app.theme.title
    } else {
        Style::default().fg(app.theme.muted)
    };
    let block = pane_block("Files", style, title_style);

    NavigatorView::new(&app.theme)
        .block(block)
        .render(area, buf, &mut app.navigator);
}

fn render_content(app: &mut App, area: Rect, buf: &mut Buffer) {
    let focused = app.focus == Focus::Content;
    let block = pane_block(
        app.config.kind.title(),
        PaneStyle::content(focused, &app.theme),
        app.theme.title,
    );
    let inner = block.inner(area);
    block.render(area, buf);

    let [tabs_area, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);
    render_tabs(app, tabs_area, buf);

    match app.form.active_tab() {
        ActiveTab::Form(idx) => {
            let view = FormView::new(&app.theme, focused);
            if let Some(tab) = app.form.tab_mut(idx) {
                view.render(body, buf, tab);
            }
        }
        ActiveTab::Preview => PreviewView::new(&app.preview, &app.theme).render(body, buf),
    }
}

fn render_tabs(app: &App, area: Rect, buf: &mut Buffer) {
    let titles: Vec<Line> = app
        .form
        .tab_titles()
        .into_iter()
        .enumerate()
        .map(|(i, title)| Line::from(format!("{} {title}", i + 1)))
        .collect();

    Tabs::new(titles)
        .select(app.form.active_index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider(Span::styled("│", app.theme.tree_lines))
        .render(area, buf);
}

fn hints(app: &App) -> &'static [KeyBinding] {
    match (app.focus, app.form.active_tab()) {
        (Focus::Navigator, _) => NAVIGATOR_HINTS,
        (Focus::Content, ActiveTab::Form(_)) => FORM_HINTS,
        (Focus::Content, ActiveTab::Preview) => PREVIEW_HINTS,
    }
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let spans: Vec<Span> = hints(app)
        .iter()
        .flat_map(|binding| footer_spans(binding, &app.theme))
        .collect();

    Paragraph::new(Line::from(spans))
        .style(app.theme.footer)
        .render(area, buf);
}

fn footer_spans(binding: &KeyBinding, theme: &Theme) -> [Span<'static>; 2] {
    [
        Span::styled(format!(" {} ", binding.keys), theme.help_key),
        Span::styled(format!("{} ", binding.description), theme.help_desc),
    ]
}
