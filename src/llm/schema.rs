//! Structured response schemas and their defensive parsers.
//!
//! Quiz and worksheet sections are stored as raw JSON strings in the cache;
//! the display layer parses them on every render and falls back to showing
//! the raw text when the model returned something malformed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u32,
    /// "mcq" for now; kept open for future question kinds.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub skill: Option<String>,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizData {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetMcq {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetSectionA {
    pub title: String,
    pub instructions: String,
    pub mcqs: Vec<WorksheetMcq>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetSectionB {
    pub title: String,
    pub instructions: String,
    /// Topic name -> exercise lines. Ordered for stable rendering.
    pub topics: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetLongQuestion {
    pub id: u32,
    pub question: String,
    pub marks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetSectionC {
    pub title: String,
    pub instructions: String,
    pub questions: Vec<WorksheetLongQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetSections {
    #[serde(default)]
    pub section_a: Option<WorksheetSectionA>,
    #[serde(default)]
    pub section_b: Option<WorksheetSectionB>,
    #[serde(default)]
    pub section_c: Option<WorksheetSectionC>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetData {
    pub total_marks: u32,
    pub duration: String,
    pub general_instructions: Vec<String>,
    pub sections: WorksheetSections,
}

/// Models sometimes wrap JSON in markdown fences despite the declared MIME
/// type. Strip one layer before parsing.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

pub fn parse_quiz(raw: &str) -> Option<QuizData> {
    serde_json::from_str(strip_code_fences(raw)).ok()
}

pub fn parse_worksheet(raw: &str) -> Option<WorksheetData> {
    serde_json::from_str(strip_code_fences(raw)).ok()
}

/// Response schema sent with quiz generation requests.
pub fn quiz_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "INTEGER" },
                        "type": { "type": "STRING" },
                        "skill": { "type": "STRING" },
                        "question": { "type": "STRING" },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "correctAnswer": { "type": "STRING" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["id", "type", "question", "options", "correctAnswer"]
                }
            }
        },
        "required": ["title", "questions"]
    })
}

/// Response schema sent with worksheet generation requests.
pub fn worksheet_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "totalMarks": { "type": "INTEGER" },
            "duration": { "type": "STRING" },
            "generalInstructions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "sections": {
                "type": "OBJECT",
                "properties": {
                    "sectionA": {
                        "type": "OBJECT",
                        "properties": {
                            "title": { "type": "STRING" },
                            "instructions": { "type": "STRING" },
                            "mcqs": {
                                "type": "ARRAY",
                                "items": {
                                    "type": "OBJECT",
                                    "properties": {
                                        "id": { "type": "INTEGER" },
                                        "question": { "type": "STRING" },
                                        "options": { "type": "ARRAY", "items": { "type": "STRING" } }
                                    },
                                    "required": ["id", "question", "options"]
                                }
                            }
                        },
                        "required": ["title", "instructions", "mcqs"]
                    },
                    "sectionC": {
                        "type": "OBJECT",
                        "properties": {
                            "title": { "type": "STRING" },
                            "instructions": { "type": "STRING" },
                            "questions": {
                                "type": "ARRAY",
                                "items": {
                                    "type": "OBJECT",
                                    "properties": {
                                        "id": { "type": "INTEGER" },
                                        "question": { "type": "STRING" },
                                        "marks": { "type": "INTEGER" }
                                    },
                                    "required": ["id", "question", "marks"]
                                }
                            }
                        },
                        "required": ["title", "instructions", "questions"]
                    }
                }
            }
        },
        "required": ["totalMarks", "duration", "generalInstructions", "sections"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quiz() {
        let raw = r#"{
            "title": "साखी क्विज़",
            "questions": [{
                "id": 1, "type": "mcq", "skill": "smaran",
                "question": "कबीर की भाषा?",
                "options": ["सधुक्कड़ी", "ब्रज", "अवधी", "खड़ी बोली"],
                "correctAnswer": "सधुक्कड़ी",
                "explanation": "मिश्रित लोकभाषा।"
            }]
        }"#;
        let quiz = parse_quiz(raw).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].correct_answer, "सधुक्कड़ी");
    }

    #[test]
    fn test_parse_quiz_strips_fences() {
        let raw = "```json\n{\"title\":\"t\",\"questions\":[]}\n```";
        assert!(parse_quiz(raw).is_some());
    }

    #[test]
    fn test_malformed_json_yields_none() {
        assert!(parse_quiz("sorry, I cannot do that").is_none());
        assert!(parse_worksheet("{\"totalMarks\": \"forty\"}").is_none());
    }

    #[test]
    fn test_worksheet_sections_optional() {
        let raw = r#"{
            "totalMarks": 40, "duration": "90 min",
            "generalInstructions": ["सभी प्रश्न अनिवार्य हैं।"],
            "sections": {
                "sectionC": {
                    "title": "वर्णनात्मक", "instructions": "विस्तार से लिखिए।",
                    "questions": [{"id": 1, "question": "भावार्थ लिखिए।", "marks": 5}]
                }
            }
        }"#;
        let ws = parse_worksheet(raw).unwrap();
        assert!(ws.sections.section_a.is_none());
        assert_eq!(ws.sections.section_c.unwrap().questions[0].marks, 5);
    }

    #[test]
    fn test_schemas_use_uppercase_types() {
        assert_eq!(quiz_schema()["type"], "OBJECT");
        assert_eq!(worksheet_schema()["properties"]["totalMarks"]["type"], "INTEGER");
    }
}
