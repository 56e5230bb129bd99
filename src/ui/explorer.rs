//! Knowledge explorer: a plain chat transcript with an input line.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::theme;
use crate::state::runtime::ChatRole;
use crate::state::{Language, State};

pub fn render(frame: &mut Frame, state: &State, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let title = match state.language {
        Language::Hindi => " ज्ञान अन्वेषण ",
        Language::English => " Knowledge Explorer ",
    };
    let transcript_block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)))
        .border_style(Style::default().fg(theme::BORDER));
    let transcript_area = transcript_block.inner(rows[0]);
    frame.render_widget(transcript_block, rows[0]);

    let mut lines: Vec<Line> = Vec::new();
    for turn in &state.explorer.messages {
        let (label, color) = match turn.role {
            ChatRole::User => ("आप", theme::ACCENT),
            ChatRole::Model => ("सहायक", theme::GENERATED),
        };
        lines.push(Line::from(Span::styled(
            format!("{label}:"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        for text_line in super::reader::rich_to_lines(&turn.text) {
            lines.push(text_line);
        }
        lines.push(Line::from(""));
    }
    if state.explorer.waiting {
        lines.push(Line::from(Span::styled(
            "◌ सोच रहा हूँ...",
            Style::default().fg(theme::TEXT_MUTED),
        )));
    }

    // Stick to the bottom unless the user scrolled up.
    let overflow = (lines.len() as u16).saturating_sub(transcript_area.height);
    let scroll = overflow.saturating_sub(state.explorer.scroll.min(overflow));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        transcript_area,
    );

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUS))
        .style(Style::default().bg(theme::BG_INPUT));
    let input_area = input_block.inner(rows[1]);
    frame.render_widget(input_block, rows[1]);
    frame.render_widget(
        Paragraph::new(format!("{}▌", state.explorer.input)).style(Style::default().fg(theme::TEXT)),
        input_area,
    );
}
