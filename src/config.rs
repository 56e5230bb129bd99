//! Installation configuration.
//!
//! The API key comes from the environment (`GEMINI_API_KEY`, loaded via
//! dotenvy) and is never persisted. Everything else lives in
//! `.pathshala/config.json` and falls back to defaults when the file is
//! missing or malformed.

use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE, DEFAULT_AUDIO_MODEL, DEFAULT_CONTENT_DIR, DEFAULT_TEXT_MODEL,
    DEFAULT_VISION_MODEL, STORE_DIR,
};
use crate::state::chapter::Language;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<SecretString>,
    pub content_dir: PathBuf,
    pub language: Language,
    pub text_model: String,
    pub vision_model: String,
    pub audio_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            language: Language::Hindi,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            audio_model: DEFAULT_AUDIO_MODEL.to_string(),
        }
    }
}

/// On-disk shape of `.pathshala/config.json`. All fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    content_dir: Option<String>,
    language: Option<Language>,
    text_model: Option<String>,
    vision_model: Option<String>,
    audio_model: Option<String>,
}

impl AppConfig {
    /// Load config from the default store directory plus the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::load_file(&Path::new(STORE_DIR).join(CONFIG_FILE));
        config.api_key = std::env::var("GEMINI_API_KEY").ok().map(SecretString::from);
        config
    }

    fn load_file(path: &Path) -> Self {
        let file: ConfigFile = fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        let defaults = Self::default();
        Self {
            api_key: None,
            content_dir: file.content_dir.map(PathBuf::from).unwrap_or(defaults.content_dir),
            language: file.language.unwrap_or(defaults.language),
            text_model: file.text_model.unwrap_or(defaults.text_model),
            vision_model: file.vision_model.unwrap_or(defaults.vision_model),
            audio_model: file.audio_model.unwrap_or(defaults.audio_model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load_file(Path::new("/nonexistent/config.json"));
        assert_eq!(config.content_dir, PathBuf::from(DEFAULT_CONTENT_DIR));
        assert_eq!(config.language, Language::Hindi);
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
    }

    #[test]
    fn test_partial_file_overrides_some_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut f = fs::File::create(&path).unwrap();
        write!(f, r#"{{"contentDir": "lessons", "language": "english"}}"#).unwrap();

        let config = AppConfig::load_file(&path);
        assert_eq!(config.content_dir, PathBuf::from("lessons"));
        assert_eq!(config.language, Language::English);
        assert_eq!(config.audio_model, DEFAULT_AUDIO_MODEL);
    }
}
