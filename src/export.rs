//! Print/export: renders the active section as a standalone HTML document
//! suitable for printing or sharing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{EXPORTS_DIR, STORE_DIR};
use crate::llm::schema::{self, QuizData, WorksheetData};
use crate::state::tabs::TabDef;
use crate::state::Chapter;

const PAGE_CSS: &str = r#"
body { font-family: 'Noto Sans Devanagari', 'Noto Sans', sans-serif;
       max-width: 800px; margin: 2em auto; line-height: 1.7; color: #1f2937; }
h1 { font-size: 1.5em; border-bottom: 2px solid #f97316; padding-bottom: 0.3em; }
h2, h3 { color: #7c2d12; margin-top: 1.4em; }
.meta { color: #6b7280; font-size: 0.9em; margin-bottom: 2em; }
.question { margin: 1em 0 0.4em; font-weight: 600; }
.options { margin: 0 0 0.8em 1.5em; }
.answer-key { page-break-before: always; }
.marks { float: right; color: #6b7280; }
@media print { body { margin: 1em; } }
"#;

fn page(title: &str, subtitle: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>{PAGE_CSS}</style>\n</head>\n<body>\n<h1>{title}</h1>\n\
         <p class=\"meta\">{subtitle}</p>\n{body}\n</body>\n</html>\n"
    )
}

fn quiz_body(quiz: &QuizData) -> String {
    let mut body = String::new();
    for question in &quiz.questions {
        body.push_str(&format!("<p class=\"question\">{}. {}</p>\n", question.id, question.question));
        body.push_str("<ol class=\"options\" type=\"a\">\n");
        for option in &question.options {
            body.push_str(&format!("<li>{option}</li>\n"));
        }
        body.push_str("</ol>\n");
    }
    body.push_str("<div class=\"answer-key\">\n<h2>उत्तर कुंजी / Answer Key</h2>\n<ol>\n");
    for question in &quiz.questions {
        let explanation = question.explanation.as_deref().unwrap_or("");
        body.push_str(&format!("<li>{} — {}</li>\n", question.correct_answer, explanation));
    }
    body.push_str("</ol>\n</div>\n");
    body
}

fn worksheet_body(ws: &WorksheetData) -> String {
    let mut body = format!(
        "<p><strong>पूर्णांक / Total Marks:</strong> {} &nbsp;&nbsp; <strong>समय / Duration:</strong> {}</p>\n",
        ws.total_marks, ws.duration
    );
    body.push_str("<h3>सामान्य निर्देश</h3>\n<ul>\n");
    for instruction in &ws.general_instructions {
        body.push_str(&format!("<li>{instruction}</li>\n"));
    }
    body.push_str("</ul>\n");

    if let Some(a) = &ws.sections.section_a {
        body.push_str(&format!("<h2>{}</h2>\n<p>{}</p>\n", a.title, a.instructions));
        for mcq in &a.mcqs {
            body.push_str(&format!("<p class=\"question\">{}. {}</p>\n", mcq.id, mcq.question));
            body.push_str("<ol class=\"options\" type=\"a\">\n");
            for option in &mcq.options {
                body.push_str(&format!("<li>{option}</li>\n"));
            }
            body.push_str("</ol>\n");
        }
    }
    if let Some(b) = &ws.sections.section_b {
        body.push_str(&format!("<h2>{}</h2>\n<p>{}</p>\n", b.title, b.instructions));
        for (topic, exercises) in &b.topics {
            body.push_str(&format!("<h3>{topic}</h3>\n<ol>\n"));
            for exercise in exercises {
                body.push_str(&format!("<li>{exercise}</li>\n"));
            }
            body.push_str("</ol>\n");
        }
    }
    if let Some(c) = &ws.sections.section_c {
        body.push_str(&format!("<h2>{}</h2>\n<p>{}</p>\n", c.title, c.instructions));
        for question in &c.questions {
            body.push_str(&format!(
                "<p class=\"question\">{}. {} <span class=\"marks\">[{}]</span></p>\n",
                question.id, question.question, question.marks
            ));
        }
    }
    body
}

fn section_body(tab_id: &str, content: &str) -> String {
    match tab_id {
        "quiz" => match schema::parse_quiz(content) {
            Some(quiz) => quiz_body(&quiz),
            None => format!("<pre>{content}</pre>\n"),
        },
        "worksheet" => match schema::parse_worksheet(content) {
            Some(ws) => worksheet_body(&ws),
            None => format!("<pre>{content}</pre>\n"),
        },
        _ => format!("<div>{content}</div>\n"),
    }
}

/// Write the section as HTML under the exports directory, returning the
/// path written.
pub fn export_section(
    base: &Path,
    chapter: &Chapter,
    tab: &TabDef,
    content: &str,
) -> Result<PathBuf, String> {
    let dir = base.join(STORE_DIR).join(EXPORTS_DIR);
    fs::create_dir_all(&dir).map_err(|e| format!("failed to create {}: {e}", dir.display()))?;

    let title = format!("{} — {}", chapter.title, tab.label(chapter.language));
    let html = page(&title, &chapter.subtitle(), &section_body(tab.id, content));

    let path = dir.join(format!("{}_{}.html", chapter.id, tab.id));
    fs::write(&path, html).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tabs::tab;
    use crate::state::{Book, ClassLevel, Language};
    use std::collections::HashMap;

    fn chapter() -> Chapter {
        Chapter {
            id: "sparsh_1".to_string(),
            title: "साखी".to_string(),
            book: Book::Sparsh,
            class_level: ClassLevel::Ten,
            language: Language::Hindi,
            content_file: None,
            original_text: None,
            author_bio: None,
            vocabulary: None,
            qa: None,
            external_resources: HashMap::new(),
        }
    }

    #[test]
    fn test_rich_text_export() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            export_section(dir.path(), &chapter(), tab("vyakhya").unwrap(), "<p>व्याख्या</p>").unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(path.ends_with(".pathshala/exports/sparsh_1_vyakhya.html"));
        assert!(html.contains("<p>व्याख्या</p>"));
        assert!(html.contains("साखी"));
    }

    #[test]
    fn test_quiz_export_has_answer_key() {
        let dir = tempfile::tempdir().unwrap();
        let content = r#"{"title":"q","questions":[
            {"id":1,"type":"mcq","question":"प्रश्न?","options":["क","ख"],
             "correctAnswer":"क","explanation":"कारण"}]}"#;
        let path = export_section(dir.path(), &chapter(), tab("quiz").unwrap(), content).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Answer Key"));
        assert!(html.contains("कारण"));
    }

    #[test]
    fn test_malformed_quiz_falls_back_to_raw() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_section(dir.path(), &chapter(), tab("quiz").unwrap(), "not json").unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<pre>not json</pre>"));
    }
}
