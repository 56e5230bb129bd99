//! Prompt families and template expansion.
//!
//! Templates ship compiled in, keyed by family, and can be overridden
//! per-install by dropping a YAML file with the same keys under the store
//! directory. Classification from (chapter, tab) to family is pure and
//! fully testable.

use std::collections::HashMap;
use std::path::Path;

use lazy_static::lazy_static;

use crate::constants::{PROMPTS_FILE, STORE_DIR};
use crate::infra::log::log_error;
use crate::llm::{GenRequest, ResponseShape};
use crate::state::tabs::TabDef;
use crate::state::{Book, Chapter};

/// Source text beyond this many characters is truncated before prompting.
const MAX_CONTEXT_CHARS: usize = 8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptFamily {
    Explanation,
    AuthorBio,
    Vocabulary,
    Qa,
    LessonPlan,
    Enrichment,
    Interdisciplinary,
    MindMap,
    Quiz,
    Worksheet,
    /// Full standalone treatment of a grammar topic.
    GrammarTopic,
    /// Examples of a grammar topic mined from a literature chapter's text.
    GrammarExtraction,
    WritingSkill,
    General,
}

impl PromptFamily {
    fn template_key(self) -> &'static str {
        match self {
            PromptFamily::Explanation => "explanation",
            PromptFamily::AuthorBio => "author_bio",
            PromptFamily::Vocabulary => "vocabulary",
            PromptFamily::Qa => "qa",
            PromptFamily::LessonPlan => "lesson_plan",
            PromptFamily::Enrichment => "enrichment",
            PromptFamily::Interdisciplinary => "interdisciplinary",
            PromptFamily::MindMap => "mind_map",
            PromptFamily::Quiz => "quiz",
            PromptFamily::Worksheet => "worksheet",
            PromptFamily::GrammarTopic => "grammar_topic",
            PromptFamily::GrammarExtraction => "grammar_extraction",
            PromptFamily::WritingSkill => "writing_skill",
            PromptFamily::General => "general",
        }
    }

    pub fn shape(self) -> ResponseShape {
        match self {
            PromptFamily::Quiz => ResponseShape::Quiz,
            PromptFamily::Worksheet => ResponseShape::Worksheet,
            _ => ResponseShape::RichText,
        }
    }

    /// Factual extraction runs cool; open-ended teaching material warmer.
    pub fn temperature(self) -> f32 {
        match self {
            PromptFamily::Quiz | PromptFamily::Worksheet | PromptFamily::GrammarExtraction => 0.4,
            PromptFamily::Vocabulary | PromptFamily::Qa | PromptFamily::AuthorBio => 0.5,
            _ => 0.7,
        }
    }
}

/// Decide which family serves a (chapter, tab) pair. Grammar-row tabs on a
/// literature chapter mine the chapter's own text; on a Grammar chapter the
/// topic is taught standalone.
pub fn classify(chapter: &Chapter, tab_id: &str) -> PromptFamily {
    match tab_id {
        "quiz" => PromptFamily::Quiz,
        "worksheet" => PromptFamily::Worksheet,
        "lesson_plan" => PromptFamily::LessonPlan,
        "enrichment" => PromptFamily::Enrichment,
        "antarvishayi" => PromptFamily::Interdisciplinary,
        "mind_map" => PromptFamily::MindMap,
        "lekhak" => PromptFamily::AuthorBio,
        "vocabulary" => PromptFamily::Vocabulary,
        "qa" => PromptFamily::Qa,
        "vyakhya" => match chapter.book {
            Book::Writing => PromptFamily::WritingSkill,
            Book::Grammar | Book::Correction => PromptFamily::GrammarTopic,
            _ => PromptFamily::Explanation,
        },
        id if id.starts_with("grammar_") => {
            if chapter.book == Book::Grammar {
                PromptFamily::GrammarTopic
            } else {
                PromptFamily::GrammarExtraction
            }
        }
        _ => PromptFamily::General,
    }
}

fn parse_templates(raw: &str) -> Result<HashMap<String, String>, String> {
    serde_yaml::from_str(raw).map_err(|e| format!("failed to parse prompt templates: {e}"))
}

lazy_static! {
    static ref TEMPLATES: HashMap<String, String> = {
        let mut templates = parse_templates(include_str!("prompts.yaml"))
            .unwrap_or_else(|e| panic!("bundled prompts.yaml is invalid: {e}"));
        let override_path = Path::new(STORE_DIR).join(PROMPTS_FILE);
        if let Ok(raw) = std::fs::read_to_string(&override_path) {
            match parse_templates(&raw) {
                Ok(overrides) => templates.extend(overrides),
                Err(e) => log_error(&format!("{}: {e}", override_path.display())),
            }
        }
        templates
    };
}

pub fn template(key: &str) -> &'static str {
    TEMPLATES.get(key).map(String::as_str).unwrap_or_default()
}

/// Truncate on a character boundary, never mid-codepoint.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn fill(template: &str, chapter: &Chapter, topic: &str) -> String {
    let context = truncate_chars(chapter.original_text.as_deref().unwrap_or(""), MAX_CONTEXT_CHARS);
    template
        .replace("{title}", &chapter.title)
        .replace("{class}", chapter.class_level.as_str())
        .replace("{topic}", topic)
        .replace("{context}", context)
}

/// Build the full generation request for a tab of a chapter.
pub fn build_request(chapter: &Chapter, tab: &TabDef) -> GenRequest {
    let family = classify(chapter, tab.id);
    let topic = tab.label(chapter.language);
    GenRequest {
        chapter_id: chapter.id.clone(),
        section_id: tab.id.to_string(),
        prompt: fill(template(family.template_key()), chapter, topic),
        shape: family.shape(),
        temperature: family.temperature(),
    }
}

pub fn chat_system() -> &'static str {
    template("chat_system")
}

pub fn ocr_prompt() -> &'static str {
    template("ocr")
}

pub fn speech_report_prompt() -> &'static str {
    template("speech_report")
}

pub fn dictation_prompt(chapter_class: &str) -> String {
    template("dictation").replace("{class}", chapter_class)
}

pub fn homophones_prompt() -> &'static str {
    template("homophones")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tabs::tab;
    use crate::state::{ClassLevel, Language};
    use std::collections::HashMap as Map;

    fn chapter(book: Book, text: Option<&str>) -> Chapter {
        Chapter {
            id: "c1".to_string(),
            title: "साखी".to_string(),
            book,
            class_level: ClassLevel::Ten,
            language: Language::Hindi,
            content_file: None,
            original_text: text.map(str::to_string),
            author_bio: None,
            vocabulary: None,
            qa: None,
            external_resources: Map::new(),
        }
    }

    #[test]
    fn test_classification_depends_on_book() {
        let lit = chapter(Book::Sparsh, None);
        let grammar = chapter(Book::Grammar, None);
        let writing = chapter(Book::Writing, None);
        assert_eq!(classify(&lit, "vyakhya"), PromptFamily::Explanation);
        assert_eq!(classify(&grammar, "vyakhya"), PromptFamily::GrammarTopic);
        assert_eq!(classify(&writing, "vyakhya"), PromptFamily::WritingSkill);
        assert_eq!(classify(&lit, "grammar_3"), PromptFamily::GrammarExtraction);
        assert_eq!(classify(&grammar, "grammar_3"), PromptFamily::GrammarTopic);
        assert_eq!(classify(&lit, "quiz"), PromptFamily::Quiz);
    }

    #[test]
    fn test_build_request_fills_placeholders() {
        let ch = chapter(Book::Sparsh, Some("मानसरोवर सुभर जल"));
        let req = build_request(&ch, tab("vyakhya").unwrap());
        assert!(req.prompt.contains("साखी"));
        assert!(req.prompt.contains("मानसरोवर"));
        assert!(req.prompt.contains("10"));
        assert!(!req.prompt.contains("{title}"));
        assert_eq!(req.shape, ResponseShape::RichText);
    }

    #[test]
    fn test_quiz_request_shape_and_temperature() {
        let ch = chapter(Book::Sparsh, Some("पाठ"));
        let req = build_request(&ch, tab("quiz").unwrap());
        assert_eq!(req.shape, ResponseShape::Quiz);
        assert!(req.temperature < 0.5);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "कखगघङ";
        assert_eq!(truncate_chars(text, 2), "कख");
        assert_eq!(truncate_chars(text, 50), text);
    }

    #[test]
    fn test_every_family_has_a_template() {
        let families = [
            PromptFamily::Explanation,
            PromptFamily::AuthorBio,
            PromptFamily::Vocabulary,
            PromptFamily::Qa,
            PromptFamily::LessonPlan,
            PromptFamily::Enrichment,
            PromptFamily::Interdisciplinary,
            PromptFamily::MindMap,
            PromptFamily::Quiz,
            PromptFamily::Worksheet,
            PromptFamily::GrammarTopic,
            PromptFamily::GrammarExtraction,
            PromptFamily::WritingSkill,
            PromptFamily::General,
        ];
        for family in families {
            assert!(!template(family.template_key()).is_empty(), "{:?}", family);
        }
    }
}
