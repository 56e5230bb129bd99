//! Reader panel: renders whatever the section state machine settled on.
//!
//! Generated rich text arrives as light HTML markup; a small converter
//! turns it into styled lines rather than dumping tags on screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::theme;
use crate::app::App;
use crate::llm::schema::{self, QuizData, WorksheetData};
use crate::state::runtime::Focus;
use crate::state::SectionState;

const HEADING_MARK: char = '\u{1}';

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Convert the light HTML subset the prompts ask for into styled lines.
/// Unknown tags are stripped, never shown.
pub fn rich_to_lines(content: &str) -> Vec<Line<'static>> {
    let normalized = content
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "\n")
        .replace("</h3>", "\n")
        .replace("</h2>", "\n")
        .replace("</li>", "\n")
        .replace("<h3>", &HEADING_MARK.to_string())
        .replace("<h2>", &HEADING_MARK.to_string())
        .replace("<li>", "• ");

    // Strip every remaining tag.
    let mut plain = String::with_capacity(normalized.len());
    let mut in_tag = false;
    for ch in normalized.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => plain.push(c),
            _ => {}
        }
    }
    let plain = decode_entities(&plain);

    let mut lines = Vec::new();
    let mut blank_run = 0;
    for raw_line in plain.lines() {
        let line = raw_line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run <= 1 {
                lines.push(Line::from(""));
            }
            continue;
        }
        blank_run = 0;
        if let Some(heading) = line.trim_start().strip_prefix(HEADING_MARK) {
            lines.push(Line::from(Span::styled(
                heading.trim().to_string(),
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(line.to_string()));
        }
    }
    lines
}

fn quiz_lines(quiz: &QuizData, app: &App) -> Vec<Line<'static>> {
    let reader = &app.state.reader;
    let mut lines = vec![
        Line::from(Span::styled(
            quiz.title.clone(),
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (position, question) in quiz.questions.iter().enumerate() {
        let cursor = position == reader.question_cursor && !reader.finished;
        let marker = if cursor { "▶ " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}. {}", question.id, question.question),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )));
        let chosen = reader.answers.get(&question.id);
        for (index, option) in question.options.iter().enumerate() {
            let selected = chosen.map(|c| c == option).unwrap_or(false);
            let style = if reader.finished {
                if option == &question.correct_answer {
                    Style::default().fg(theme::CORRECT)
                } else if selected {
                    Style::default().fg(theme::WRONG)
                } else {
                    Style::default().fg(theme::TEXT_MUTED)
                }
            } else if selected {
                Style::default().fg(theme::ACCENT)
            } else {
                Style::default().fg(theme::TEXT_SECONDARY)
            };
            let tick = if selected { "●" } else { "○" };
            lines.push(Line::from(Span::styled(
                format!("     {tick} ({}) {option}", index + 1),
                style,
            )));
        }
        if reader.finished {
            if let Some(explanation) = &question.explanation {
                lines.push(Line::from(Span::styled(
                    format!("     ℹ {explanation}"),
                    Style::default().fg(theme::TEXT_MUTED),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    if reader.finished {
        let correct = quiz
            .questions
            .iter()
            .filter(|q| reader.answers.get(&q.id) == Some(&q.correct_answer))
            .count();
        lines.push(Line::from(Span::styled(
            format!("प्राप्तांक: {correct} / {}", quiz.questions.len()),
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "↑/↓ प्रश्न  1-9 उत्तर  s जमा करें".to_string(),
            Style::default().fg(theme::TEXT_MUTED),
        )));
    }
    lines
}

fn worksheet_lines(ws: &WorksheetData) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("पूर्णांक: {}    समय: {}", ws.total_marks, ws.duration),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for instruction in &ws.general_instructions {
        lines.push(Line::from(format!("• {instruction}")));
    }
    lines.push(Line::from(""));

    let heading = |text: String| {
        Line::from(Span::styled(text, Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)))
    };
    if let Some(a) = &ws.sections.section_a {
        lines.push(heading(a.title.clone()));
        lines.push(Line::from(a.instructions.clone()));
        for mcq in &a.mcqs {
            lines.push(Line::from(format!("{}. {}", mcq.id, mcq.question)));
            for (index, option) in mcq.options.iter().enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("     ({}) {option}", index + 1),
                    Style::default().fg(theme::TEXT_SECONDARY),
                )));
            }
        }
        lines.push(Line::from(""));
    }
    if let Some(b) = &ws.sections.section_b {
        lines.push(heading(b.title.clone()));
        lines.push(Line::from(b.instructions.clone()));
        for (topic, exercises) in &b.topics {
            lines.push(Line::from(Span::styled(
                topic.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for exercise in exercises {
                lines.push(Line::from(format!("   • {exercise}")));
            }
        }
        lines.push(Line::from(""));
    }
    if let Some(c) = &ws.sections.section_c {
        lines.push(heading(c.title.clone()));
        lines.push(Line::from(c.instructions.clone()));
        for question in &c.questions {
            lines.push(Line::from(format!("{}. {}  [{}]", question.id, question.question, question.marks)));
        }
    }
    lines
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.state.focus == Focus::Content;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { theme::BORDER_FOCUS } else { theme::BORDER }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let muted = |text: &str| {
        vec![Line::from(""), Line::from(Span::styled(text.to_string(), Style::default().fg(theme::TEXT_MUTED)))]
    };
    let lines = match &app.state.reader.section {
        SectionState::Idle => muted("  बाईं ओर से कोई पाठ या गतिविधि चुनिए।"),
        SectionState::Loading => muted("  ◌ सामग्री तैयार हो रही है, कृपया प्रतीक्षा कीजिए..."),
        SectionState::Empty => muted("  इस खंड के लिए सामग्री नहीं है।  g — बनाएँ  r — दोबारा बनाएँ"),
        SectionState::Unavailable => muted("  यह खंड अभी उपलब्ध नहीं है।"),
        SectionState::External(url) => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  बाहरी संसाधन / External resource:".to_string(),
                Style::default().fg(theme::TEXT_SECONDARY),
            )),
            Line::from(Span::styled(
                format!("  {url}"),
                Style::default().fg(theme::EXTERNAL).add_modifier(Modifier::UNDERLINED),
            )),
        ],
        SectionState::Ready(content) => match app.state.reader.active_tab.as_str() {
            "quiz" => match schema::parse_quiz(content) {
                Some(quiz) => quiz_lines(&quiz, app),
                None => rich_to_lines(content),
            },
            "worksheet" => match schema::parse_worksheet(content) {
                Some(ws) => worksheet_lines(&ws),
                None => rich_to_lines(content),
            },
            _ => rich_to_lines(content),
        },
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.state.reader.scroll, 0));
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_rich_to_lines_breaks_and_bullets() {
        let lines = rich_to_lines("<h3>शीर्षक</h3><p>पहला</p><ul><li>एक</li><li>दो</li></ul>");
        let text = text_of(&lines);
        assert!(text.contains(&"शीर्षक".to_string()));
        assert!(text.contains(&"पहला".to_string()));
        assert!(text.contains(&"• एक".to_string()));
        assert!(text.contains(&"• दो".to_string()));
    }

    #[test]
    fn test_rich_to_lines_strips_unknown_tags() {
        let lines = rich_to_lines("<div class=\"x\"><strong>bold</strong> plain</div>");
        let text = text_of(&lines).join("");
        assert!(text.contains("bold plain"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_rich_to_lines_decodes_entities() {
        let lines = rich_to_lines("क &amp; ख &lt;ग&gt;");
        assert_eq!(text_of(&lines), vec!["क & ख <ग>"]);
    }

    #[test]
    fn test_plain_newlines_survive() {
        let lines = rich_to_lines("line one<br>line two");
        assert_eq!(text_of(&lines), vec!["line one", "line two"]);
    }
}
