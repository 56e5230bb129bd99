//! Full-screen forms: the custom chapter entry and the practice tools.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::theme;
use crate::state::runtime::{FormField, SpecialTool};
use crate::state::{Language, State};

fn field_block(title: &str, active: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(if active { theme::ACCENT } else { theme::TEXT_SECONDARY }),
        ))
        .border_style(Style::default().fg(if active { theme::BORDER_FOCUS } else { theme::BORDER }))
}

fn with_cursor(text: &str, active: bool) -> String {
    if active {
        format!("{text}▌")
    } else {
        text.to_string()
    }
}

pub fn render_custom_entry(frame: &mut Frame, state: &State, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title field
            Constraint::Min(5),    // text field
            Constraint::Length(3), // image path field
            Constraint::Length(2), // notice + hints
        ])
        .split(area);

    let field = state.form.field.unwrap_or(FormField::Title);
    let (title_label, text_label, image_label) = match state.language {
        Language::Hindi => ("शीर्षक", "पाठ की सामग्री", "चित्र से जोड़ें (फ़ाइल पथ)"),
        Language::English => ("Title", "Chapter text", "Add from image (file path)"),
    };

    let title_active = field == FormField::Title;
    let block = field_block(title_label, title_active);
    let inner = block.inner(rows[0]);
    frame.render_widget(block, rows[0]);
    frame.render_widget(Paragraph::new(with_cursor(&state.form.title, title_active)), inner);

    let text_active = field == FormField::Text;
    let block = field_block(text_label, text_active);
    let inner = block.inner(rows[1]);
    frame.render_widget(block, rows[1]);
    let text = with_cursor(&state.form.text, text_active);
    let line_count = text.lines().count() as u16;
    let scroll = line_count.saturating_sub(inner.height);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }).scroll((scroll, 0)), inner);

    let image_active = field == FormField::ImagePath;
    let block = field_block(image_label, image_active);
    let inner = block.inner(rows[2]);
    frame.render_widget(block, rows[2]);
    frame.render_widget(Paragraph::new(with_cursor(&state.form.image_path, image_active)), inner);

    let mut footer = vec![Line::from(Span::styled(
        "Tab अगला क्षेत्र  ^O चित्र से पाठ  ^S सहेजें  Esc वापस",
        Style::default().fg(theme::TEXT_MUTED),
    ))];
    if let Some(notice) = &state.form.notice {
        footer.insert(
            0,
            Line::from(Span::styled(notice.clone(), Style::default().fg(theme::ACCENT))),
        );
    } else if state.form.extracting {
        footer.insert(
            0,
            Line::from(Span::styled(
                "◌ चित्र पढ़ा जा रहा है...",
                Style::default().fg(theme::TEXT_MUTED),
            )),
        );
    }
    frame.render_widget(Paragraph::new(footer), rows[3]);
}

pub fn render_tool(frame: &mut Frame, state: &State, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let input_label = match state.tool {
        SpecialTool::Vachan => match state.language {
            Language::Hindi => "रिकॉर्डिंग का पथ",
            Language::English => "Path to recording",
        },
        _ => match state.language {
            Language::Hindi => "Enter — अभ्यास बनाएँ",
            Language::English => "Enter — generate practice",
        },
    };
    let block = field_block(input_label, true);
    let inner = block.inner(rows[0]);
    frame.render_widget(block, rows[0]);
    frame.render_widget(Paragraph::new(with_cursor(&state.tool_state.input, true)), inner);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", state.tool.title(state.language)),
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(rows[1]);
    frame.render_widget(block, rows[1]);

    let lines = if state.tool_state.busy {
        vec![Line::from(Span::styled(
            "◌ विश्लेषण चल रहा है...",
            Style::default().fg(theme::TEXT_MUTED),
        ))]
    } else {
        match &state.tool_state.report {
            Some(report) => super::reader::rich_to_lines(report),
            None => vec![Line::from(Span::styled(
                "अभी कोई परिणाम नहीं। Enter दबाइए।",
                Style::default().fg(theme::TEXT_MUTED),
            ))],
        }
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

    frame.render_widget(
        Paragraph::new("Enter चलाएँ  Esc वापस").style(Style::default().fg(theme::TEXT_MUTED)),
        rows[2],
    );
}
