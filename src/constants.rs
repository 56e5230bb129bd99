//! Shared constants: store layout, external service endpoints, model names.

/// Root directory for all durable state, relative to the working directory.
pub const STORE_DIR: &str = ".pathshala";
/// Generated-content cache (chapter::section -> text).
pub const CACHE_FILE: &str = "cache.json";
/// Optional installation config.
pub const CONFIG_FILE: &str = "config.json";
/// Optional on-disk override for the embedded prompt templates.
pub const PROMPTS_FILE: &str = "prompts.yaml";
/// Error log directory under the store.
pub const ERRORS_DIR: &str = "errors";
/// Exported HTML documents land here.
pub const EXPORTS_DIR: &str = "exports";

/// Chapter manifest file name, looked up in the content directory.
pub const MANIFEST_FILE: &str = "master_chapters.json";
/// Default content directory when config.json does not name one.
pub const DEFAULT_CONTENT_DIR: &str = "content";

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_AUDIO_MODEL: &str = "gemini-2.0-flash-exp";

/// How many recent explorer turns are replayed as chat history.
pub const CHAT_HISTORY_TURNS: usize = 6;
