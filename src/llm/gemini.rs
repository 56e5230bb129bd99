//! Gemini API implementation.
//!
//! All calls go through the non-streaming `generateContent` endpoint with
//! the blocking client; callers run on worker threads and report back over
//! a channel. No request timeout is set: long generations are expected.

use std::time::Duration;

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::constants::{CHAT_HISTORY_TURNS, GEMINI_BASE_URL};
use crate::llm::schema::{quiz_schema, worksheet_schema};
use crate::llm::{prompts, GenRequest, Generator, ResponseShape};
use crate::state::runtime::{ChatRole, ChatTurn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), inline_data: None }
    }

    pub fn inline_data(mime_type: &str, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData { mime_type: mime_type.to_string(), data }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

pub struct GeminiClient {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    text_model: String,
    vision_model: String,
    audio_model: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, String> {
        // Generation calls can legitimately take minutes; only the connect
        // phase is bounded.
        let client = Client::builder()
            .timeout(None)
            .connect_timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: GEMINI_BASE_URL.to_string(),
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
            audio_model: config.audio_model.clone(),
        })
    }

    pub fn vision_model(&self) -> &str {
        &self.vision_model
    }

    pub fn audio_model(&self) -> &str {
        &self.audio_model
    }

    fn call(&self, model: &str, request: &ApiRequest) -> Result<String, String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| "GEMINI_API_KEY not set".to_string())?;

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.expose_secret())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .map_err(|e| format!("Request failed: {e}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(format!("API error {}: {}", status, body));
        }

        let body: Value = response.json().map_err(|e| format!("Invalid response body: {e}"))?;
        let text = body["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err("Model returned no content".to_string());
        }
        Ok(text)
    }

    /// One-shot generation against `model` with explicit parts and config.
    /// Used directly by the media helpers.
    pub fn generate_parts(
        &self,
        model: &str,
        parts: Vec<Part>,
        temperature: Option<f32>,
    ) -> Result<String, String> {
        let request = ApiRequest {
            contents: vec![Content { role: None, parts }],
            system_instruction: None,
            generation_config: GenerationConfig { temperature, ..Default::default() },
        };
        self.call(model, &request)
    }

    /// Multi-turn chat. Only the most recent turns are sent; the system
    /// prompt carries the assistant persona.
    pub fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, String> {
        let start = history.len().saturating_sub(CHAT_HISTORY_TURNS);
        let mut contents: Vec<Content> = history[start..]
            .iter()
            .map(|turn| Content {
                role: Some(
                    match turn.role {
                        ChatRole::User => "user",
                        ChatRole::Model => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part::text(turn.text.clone())],
            })
            .collect();
        contents.push(Content { role: Some("user".to_string()), parts: vec![Part::text(message)] });

        let request = ApiRequest {
            contents,
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::text(prompts::chat_system())],
            }),
            generation_config: GenerationConfig { temperature: Some(0.7), ..Default::default() },
        };
        self.call(&self.text_model, &request)
    }
}

impl Generator for GeminiClient {
    fn generate(&self, request: &GenRequest) -> Result<String, String> {
        let generation_config = match request.shape {
            ResponseShape::RichText => GenerationConfig {
                temperature: Some(request.temperature),
                ..Default::default()
            },
            ResponseShape::Quiz => GenerationConfig {
                temperature: Some(request.temperature),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(quiz_schema()),
            },
            ResponseShape::Worksheet => GenerationConfig {
                temperature: Some(request.temperature),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(worksheet_schema()),
            },
        };
        let api_request = ApiRequest {
            contents: vec![Content { role: None, parts: vec![Part::text(request.prompt.clone())] }],
            system_instruction: None,
            generation_config,
        };
        self.call(&self.text_model, &api_request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_shape() {
        let request = ApiRequest {
            contents: vec![Content { role: None, parts: vec![Part::text("hello")] }],
            system_instruction: None,
            generation_config: GenerationConfig {
                temperature: Some(0.4),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(quiz_schema()),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(value["contents"][0].get("role").is_none());
    }

    #[test]
    fn test_inline_data_serialization() {
        let part = Part::inline_data("image/png", "QUJD".to_string());
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["inlineData"]["mimeType"], "image/png");
        assert_eq!(value["inlineData"]["data"], "QUJD");
        assert!(value.get("text").is_none());
    }

    #[test]
    fn test_missing_key_fails_at_call_time() {
        let config = AppConfig { api_key: None, ..AppConfig::default() };
        let client = GeminiClient::new(&config).unwrap();
        let request = GenRequest {
            chapter_id: "c".to_string(),
            section_id: "s".to_string(),
            prompt: "p".to_string(),
            shape: ResponseShape::RichText,
            temperature: 0.7,
        };
        let err = client.generate(&request).unwrap_err();
        assert!(err.contains("GEMINI_API_KEY"));
    }
}
