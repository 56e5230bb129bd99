//! Generation layer: prompt construction, the Gemini client, structured
//! response schemas, and media analysis.

pub mod gemini;
pub mod media;
pub mod prompts;
pub mod schema;

pub use gemini::GeminiClient;

/// Expected shape of a generated section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Free-form rich text (simple HTML-ish markup).
    RichText,
    /// JSON conforming to the quiz schema.
    Quiz,
    /// JSON conforming to the worksheet schema.
    Worksheet,
}

/// A fully prepared generation request, ready to hand to a worker thread.
#[derive(Debug, Clone)]
pub struct GenRequest {
    pub chapter_id: String,
    pub section_id: String,
    pub prompt: String,
    pub shape: ResponseShape,
    pub temperature: f32,
}

/// Anything that can turn a request into section content. The production
/// implementation is [`GeminiClient`]; tests substitute counters and canned
/// responders.
pub trait Generator: Send + Sync {
    fn generate(&self, request: &GenRequest) -> Result<String, String>;
}
