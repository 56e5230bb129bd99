//! Media helpers: image OCR for the custom chapter form and recording
//! analysis for the speaking activity. Files are read from disk, base64
//! encoded and sent inline.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::llm::gemini::{GeminiClient, Part};
use crate::llm::prompts;

fn mime_for_extension(path: &Path) -> Result<&'static str, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "wav" => Ok("audio/wav"),
        "mp3" => Ok("audio/mp3"),
        "m4a" => Ok("audio/mp4"),
        "ogg" => Ok("audio/ogg"),
        "webm" => Ok("audio/webm"),
        _ => Err(format!("unsupported file type: {}", path.display())),
    }
}

fn inline_part(path: &Path) -> Result<Part, String> {
    let mime = mime_for_extension(path)?;
    let bytes = std::fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    Ok(Part::inline_data(mime, STANDARD.encode(bytes)))
}

/// Extract the printed or handwritten text from an image on disk.
pub fn extract_text_from_image(client: &GeminiClient, path: &Path) -> Result<String, String> {
    let parts = vec![inline_part(path)?, Part::text(prompts::ocr_prompt())];
    client.generate_parts(client.vision_model(), parts, Some(0.2))
}

/// Analyze a recorded reading and produce a feedback report.
pub fn analyze_recording(client: &GeminiClient, path: &Path) -> Result<String, String> {
    let parts = vec![inline_part(path)?, Part::text(prompts::speech_report_prompt())];
    client.generate_parts(client.audio_model(), parts, Some(0.4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_mapping() {
        assert_eq!(mime_for_extension(Path::new("a.PNG")).unwrap(), "image/png");
        assert_eq!(mime_for_extension(Path::new("b.jpeg")).unwrap(), "image/jpeg");
        assert_eq!(mime_for_extension(Path::new("c.wav")).unwrap(), "audio/wav");
        assert!(mime_for_extension(Path::new("d.txt")).is_err());
        assert!(mime_for_extension(Path::new("noext")).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(inline_part(Path::new("/no/such/image.png")).is_err());
    }
}
