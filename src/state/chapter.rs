//! The teachable unit: a chapter from a textbook, a grammar topic, a
//! writing skill, or a teacher-entered custom text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hindi,
    English,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Hindi => Language::English,
            Language::English => Language::Hindi,
        }
    }
}

/// Source book / category. Grammar and Writing entries are not literature:
/// their sections are produced entirely by generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Book {
    Sparsh,
    Sanchayan,
    Beehive,
    Moments,
    #[serde(rename = "First Flight")]
    FirstFlight,
    Footprints,
    Grammar,
    Writing,
    Correction,
    Custom,
}

impl Book {
    /// Categories whose default section is generated without user action.
    pub fn auto_generates(self) -> bool {
        matches!(self, Book::Grammar | Book::Writing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassLevel {
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    All,
    Custom,
}

impl ClassLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassLevel::Nine => "9",
            ClassLevel::Ten => "10",
            ClassLevel::All => "All",
            ClassLevel::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub book: Book,
    #[serde(rename = "class")]
    pub class_level: ClassLevel,
    pub language: Language,
    /// Secondary content document, fetched lazily on first selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qa: Option<String>,
    /// Section id -> externally hosted resource URL. Bypasses generation.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub external_resources: HashMap<String, String>,
}

impl Chapter {
    /// Custom chapters always show up regardless of the language filter.
    pub fn is_custom(&self) -> bool {
        self.book == Book::Custom
    }

    /// Generation needs raw source text to work from.
    pub fn has_source_text(&self) -> bool {
        self.original_text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Subtitle shown under the chapter title.
    pub fn subtitle(&self) -> String {
        format!("{:?} • Class {}", self.book, self.class_level.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_entry_parses() {
        let json = r#"{
            "id": "sparsh_1",
            "title": "साखी",
            "book": "Sparsh",
            "class": "10",
            "language": "hindi",
            "contentFile": "content/sparsh_1.json",
            "externalResources": {"drishyamala": "https://example.com/v"}
        }"#;
        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.book, Book::Sparsh);
        assert_eq!(chapter.class_level, ClassLevel::Ten);
        assert_eq!(chapter.language, Language::Hindi);
        assert!(!chapter.has_source_text());
        assert_eq!(chapter.external_resources["drishyamala"], "https://example.com/v");
    }

    #[test]
    fn test_auto_generating_categories() {
        assert!(Book::Grammar.auto_generates());
        assert!(Book::Writing.auto_generates());
        assert!(!Book::Sparsh.auto_generates());
        assert!(!Book::Custom.auto_generates());
    }

    #[test]
    fn test_blank_source_text_does_not_count() {
        let json = r#"{"id":"x","title":"t","book":"Custom","class":"Custom",
                       "language":"english","originalText":"   "}"#;
        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert!(!chapter.has_source_text());
    }
}
