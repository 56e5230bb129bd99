//! Two-row tab strip. Color encodes where the content would come from:
//! accent for the active tab, green for cached/bundled, blue for external.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::theme;
use crate::app::App;
use crate::state::runtime::Focus;
use crate::state::tabs::{self, TabDef};

fn tab_span(app: &App, tab: &'static TabDef, index: usize) -> Span<'static> {
    let label = match app.state.selected_chapter() {
        Some(chapter) => tab.label(chapter.language),
        None => tab.label(app.state.language),
    };
    let focused = app.state.focus == Focus::Tabs
        && index == app.state.tab_cursor
        && app.state.selected.is_some();
    let active = app.state.reader.active_tab == tab.id;

    let mut style = Style::default().fg(theme::TEXT_SECONDARY);
    if let Some(chapter) = app.state.selected_chapter() {
        if chapter.external_resources.contains_key(tab.id) {
            style = Style::default().fg(theme::EXTERNAL);
        } else if app.cache.contains(&chapter.id, tab.id) {
            style = Style::default().fg(theme::GENERATED);
        }
    }
    if active {
        style = Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD);
    }
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!(" {label} "), style)
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.state.focus == Focus::Tabs;
    let title = app
        .state
        .selected_chapter()
        .map(|c| format!(" {} — {} ", c.title, c.subtitle()))
        .unwrap_or_else(|| " कोई पाठ चुनिए / select a chapter ".to_string());
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .title(Span::styled(title, Style::default().fg(theme::TEXT)))
        .border_style(Style::default().fg(if focused { theme::BORDER_FOCUS } else { theme::BORDER }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut row1 = Vec::new();
    let mut row2 = Vec::new();
    for (index, tab) in tabs::TABS.iter().enumerate() {
        let span = tab_span(app, tab, index);
        if tab.row == 1 {
            row1.push(span);
        } else {
            row2.push(span);
        }
    }
    let lines = vec![Line::from(row1), Line::from(row2)];
    frame.render_widget(Paragraph::new(lines), inner);
}
