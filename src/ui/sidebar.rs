//! Sidebar: activities on top, then the chapter list filtered by language.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::theme;
use crate::state::runtime::{Focus, SidebarItem};
use crate::state::{Book, State};

/// Truncate to a display width, appending an ellipsis when cut.
fn fit(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.to_string().width();
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

pub fn render(frame: &mut Frame, state: &State, area: Rect) {
    let focused = state.focus == Focus::Sidebar;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(if focused { theme::BORDER_FOCUS } else { theme::BORDER }))
        .style(Style::default().bg(theme::BG_SIDEBAR));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max_width = inner.width.saturating_sub(3) as usize;
    let items = state.sidebar_items();

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            " पाठशाला",
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let mut last_was_activity = true;
    for (position, item) in items.iter().enumerate() {
        let selected = position == state.sidebar_cursor && focused;
        match item {
            SidebarItem::Activity(activity) => {
                let label = fit(activity.label(state.language), max_width);
                lines.push(entry_line(&format!("✦ {label}"), selected, theme::TEXT_SECONDARY));
            }
            SidebarItem::Chapter(index) => {
                let chapter = &state.chapters[*index];
                if last_was_activity {
                    lines.push(Line::from(""));
                    last_was_activity = false;
                }
                let marker = match chapter.book {
                    Book::Grammar | Book::Correction => "◈",
                    Book::Writing => "✎",
                    Book::Custom => "✚",
                    _ => "▪",
                };
                let active = state.selected == Some(*index);
                let color = if active { theme::ACCENT } else { theme::TEXT };
                let label = fit(&chapter.title, max_width);
                lines.push(entry_line(&format!("{marker} {label}"), selected, color));
            }
        }
    }

    // Keep the cursor in view on short terminals.
    let cursor_line = state.sidebar_cursor + 2;
    let scroll = cursor_line.saturating_sub(inner.height.saturating_sub(1) as usize) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn entry_line(text: &str, selected: bool, color: ratatui::style::Color) -> Line<'static> {
    let style = if selected {
        Style::default().fg(theme::BG_SIDEBAR).bg(theme::ACCENT)
    } else {
        Style::default().fg(color)
    };
    Line::from(Span::styled(format!(" {text} "), style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_truncates_by_display_width() {
        assert_eq!(fit("short", 10), "short");
        let cut = fit("a very long chapter title", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
        // Devanagari combining marks have zero width; no panic, no overflow.
        let hindi = fit("मीरा के पद और उनकी व्याख्या", 12);
        assert!(hindi.width() <= 12);
    }
}
