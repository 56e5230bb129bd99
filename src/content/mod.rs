//! Bundled chapter content: the manifest and per-chapter detail documents.

use std::fs;
use std::path::Path;

use crate::constants::MANIFEST_FILE;
use crate::state::Chapter;

/// Load the chapter manifest from `dir`. The manifest is required; a
/// missing content directory is a setup error surfaced to the caller.
pub fn load_manifest(dir: &Path) -> Result<Vec<Chapter>, String> {
    let path = dir.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&path)
        .map_err(|e| format!("failed to read manifest {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| format!("failed to parse manifest {}: {e}", path.display()))
}

/// Detail document referenced by a manifest entry's `contentFile`.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChapterDetails {
    #[serde(default)]
    original_text: Option<String>,
    #[serde(default)]
    author_bio: Option<String>,
    #[serde(default)]
    vocabulary: Option<String>,
    #[serde(default)]
    qa: Option<String>,
}

/// Merge the chapter's detail document into it, if one is declared and the
/// text has not already been loaded. Fields present in the manifest entry
/// win over the detail file.
pub fn load_details(chapter: &mut Chapter, dir: &Path) -> Result<(), String> {
    let Some(file) = chapter.content_file.as_deref() else {
        return Ok(());
    };
    if chapter.original_text.is_some() {
        return Ok(());
    }
    let path = dir.join(file);
    let raw = fs::read_to_string(&path)
        .map_err(|e| format!("failed to read chapter content {}: {e}", path.display()))?;
    let details: ChapterDetails = serde_json::from_str(&raw)
        .map_err(|e| format!("failed to parse chapter content {}: {e}", path.display()))?;
    chapter.original_text = chapter.original_text.take().or(details.original_text);
    chapter.author_bio = chapter.author_bio.take().or(details.author_bio);
    chapter.vocabulary = chapter.vocabulary.take().or(details.vocabulary);
    chapter.qa = chapter.qa.take().or(details.qa);
    Ok(())
}

/// Normalize bundled plain text for display. Text that already carries
/// markup is passed through; plain text gets its newlines made explicit.
pub fn to_rich_text(text: &str) -> String {
    if text.trim_start().starts_with('<') {
        text.to_string()
    } else {
        text.replace('\n', "<br>")
    }
}
