//! Frame composition: one draw function per panel, routed by view.

pub mod board;
pub mod explorer;
pub mod forms;
pub mod reader;
pub mod sidebar;
pub mod tabs;
pub mod theme;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::state::runtime::View;

const SIDEBAR_WIDTH: u16 = 32;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());
    let main = layout[0];

    match app.state.view {
        View::Explorer => explorer::render(frame, &app.state, main),
        View::CustomEntry => forms::render_custom_entry(frame, &app.state, main),
        View::SpecialTool => forms::render_tool(frame, &app.state, main),
        View::Chapter => render_chapter_view(frame, app, main),
    }

    render_status(frame, app, layout[1]);
}

fn render_chapter_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut content_area = area;
    if app.state.show_sidebar && !app.state.full_screen {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(area);
        sidebar::render(frame, &app.state, cols[0]);
        content_area = cols[1];
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(content_area);
    tabs::render(frame, app, rows[0]);

    if app.state.show_board && app.state.show_reader {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        reader::render(frame, app, halves[0]);
        board::render(frame, app, halves[1]);
    } else if app.state.show_board {
        board::render(frame, app, rows[1]);
    } else {
        // The reader stays up even when toggled off alone; a frame with
        // nothing in it helps nobody.
        app.state.board_rect = None;
        reader::render(frame, app, rows[1]);
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.state.status {
        Some(status) => status.clone(),
        None => match app.state.view {
            View::Chapter => {
                "Tab focus  ^L sidebar  ^R reader  ^B board  ^F fullscreen  ^G language  ^P export  q quit"
                    .to_string()
            }
            _ => "Esc back  ^Q quit".to_string(),
        },
    };
    let style = if app.state.status.is_some() {
        Style::default().fg(theme::ACCENT)
    } else {
        Style::default().fg(theme::TEXT_MUTED)
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}
