//! The static section (tab) table.
//!
//! Row 1 holds content and teaching tools; row 2 holds grammar topics whose
//! labels differ entirely between the two languages. The generation policy
//! for a tab is derived from its id (see `llm::prompts`).

use crate::state::chapter::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabDef {
    pub id: &'static str,
    pub label_hi: &'static str,
    pub label_en: &'static str,
    pub row: u8,
    /// Fixed tabs are seeded from bundled chapter fields, not generated.
    pub fixed: bool,
}

impl TabDef {
    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::Hindi => self.label_hi,
            Language::English => self.label_en,
        }
    }
}

/// First tab shown for literature and custom chapters.
pub const DEFAULT_TAB: &str = "mool_path";
/// Auto-generated default for Grammar/Writing chapters.
pub const AUTO_TAB: &str = "vyakhya";

pub const TABS: &[TabDef] = &[
    // Row 1: fixed content and key teaching tools
    TabDef { id: "mool_path", label_hi: "मूल पाठ", label_en: "Original Text", row: 1, fixed: true },
    TabDef { id: "lekhak", label_hi: "लेखक/कवि", label_en: "Author/Poet", row: 1, fixed: true },
    TabDef { id: "vocabulary", label_hi: "शब्दार्थ", label_en: "Vocabulary", row: 1, fixed: true },
    TabDef { id: "qa", label_hi: "प्रश्न-उत्तर", label_en: "Q & A", row: 1, fixed: true },
    TabDef { id: "enrichment", label_hi: "योग्यता विस्तार", label_en: "Enrichment", row: 1, fixed: false },
    TabDef { id: "lesson_plan", label_hi: "पाठ योजना", label_en: "Lesson Plan", row: 1, fixed: false },
    TabDef { id: "quiz", label_hi: "क्विज़", label_en: "Quiz", row: 1, fixed: false },
    TabDef { id: "worksheet", label_hi: "कार्यपत्रिका", label_en: "Worksheet", row: 1, fixed: false },
    TabDef { id: "antarvishayi", label_hi: "अंतर्विषयक", label_en: "Interdisciplinary", row: 1, fixed: false },
    TabDef { id: "vyakhya", label_hi: "व्याख्या", label_en: "Explanation", row: 1, fixed: false },
    TabDef { id: "ek_jhalak", label_hi: "एक झलक", label_en: "Glimpse", row: 1, fixed: false },
    TabDef { id: "drishyamala", label_hi: "दृश्यमाला", label_en: "Visuals", row: 1, fixed: false },
    TabDef { id: "mind_map", label_hi: "माइंड मैप", label_en: "Mind Map", row: 1, fixed: false },
    // Row 2: grammar topics, mapped per language
    TabDef { id: "grammar_1", label_hi: "संधि", label_en: "Tenses", row: 2, fixed: false },
    TabDef { id: "grammar_2", label_hi: "समास", label_en: "Modals", row: 2, fixed: false },
    TabDef { id: "grammar_3", label_hi: "उपसर्ग", label_en: "Determiners", row: 2, fixed: false },
    TabDef { id: "grammar_4", label_hi: "प्रत्यय", label_en: "Sub-Verb Concord", row: 2, fixed: false },
    TabDef { id: "grammar_5", label_hi: "पदबंध", label_en: "Clauses", row: 2, fixed: false },
    TabDef { id: "grammar_6", label_hi: "मुहावरे", label_en: "Idioms", row: 2, fixed: false },
    TabDef { id: "grammar_7", label_hi: "अनुस्वार", label_en: "Reported Speech", row: 2, fixed: false },
    TabDef { id: "grammar_8", label_hi: "विराम चिह्न", label_en: "Punctuation", row: 2, fixed: false },
    TabDef { id: "grammar_9", label_hi: "रचना (वाक्य)", label_en: "Voice (Active/Passive)", row: 2, fixed: false },
    TabDef { id: "grammar_10", label_hi: "अर्थ (वाक्य)", label_en: "Transformation", row: 2, fixed: false },
];

pub fn tab(id: &str) -> Option<&'static TabDef> {
    TABS.iter().find(|t| t.id == id)
}

pub fn row_tabs(row: u8) -> impl Iterator<Item = &'static TabDef> {
    TABS.iter().filter(move |t| t.row == row)
}

/// Passive placeholders: never generated, always "not available".
pub fn is_placeholder(id: &str) -> bool {
    matches!(id, "ek_jhalak" | "drishyamala")
}

/// Tabs served directly from bundled chapter fields (literature chapters).
pub fn direct_field<'c>(chapter: &'c crate::state::Chapter, tab_id: &str) -> Option<&'c str> {
    let field = match tab_id {
        "mool_path" => &chapter.original_text,
        "lekhak" => &chapter.author_bio,
        "vocabulary" => &chapter.vocabulary,
        "qa" => &chapter.qa,
        _ => &None,
    };
    field.as_deref().filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(tab("quiz").unwrap().label_en, "Quiz");
        assert!(tab("no_such_tab").is_none());
    }

    #[test]
    fn test_placeholders() {
        assert!(is_placeholder("ek_jhalak"));
        assert!(is_placeholder("drishyamala"));
        assert!(!is_placeholder("quiz"));
    }

    #[test]
    fn test_rows_are_partitioned() {
        let row1 = row_tabs(1).count();
        let row2 = row_tabs(2).count();
        assert_eq!(row1 + row2, TABS.len());
        assert_eq!(row2, 10);
    }

    #[test]
    fn test_labels_follow_language() {
        let t = tab("grammar_1").unwrap();
        assert_eq!(t.label(Language::Hindi), "संधि");
        assert_eq!(t.label(Language::English), "Tenses");
    }
}
