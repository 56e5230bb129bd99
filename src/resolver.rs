//! Content resolution: decides, for a (chapter, tab) pair, where the
//! section content comes from. Pure with respect to the network; the
//! caller spawns the actual generation when told to.

use crate::llm::prompts::build_request;
use crate::llm::GenRequest;
use crate::state::reader::SectionState;
use crate::state::tabs::{self, DEFAULT_TAB};
use crate::state::{Book, Chapter};
use crate::store::ContentCache;

#[derive(Debug)]
pub enum Resolution {
    /// Externally hosted resource; shown as a link, never generated.
    External(String),
    /// Found in the persistent cache.
    Cached(String),
    /// Served directly from a bundled chapter field.
    Direct(String),
    /// Needs a generation round-trip.
    Generate(Box<GenRequest>),
    /// Placeholder tab; content will never exist.
    Unavailable,
    /// Nothing available and nothing to generate from.
    Empty,
}

impl Resolution {
    /// Collapse into the section state plus an optional request the caller
    /// must dispatch.
    pub fn into_state(self) -> (SectionState, Option<GenRequest>) {
        match self {
            Resolution::External(url) => (SectionState::External(url), None),
            Resolution::Cached(text) | Resolution::Direct(text) => (SectionState::Ready(text), None),
            Resolution::Generate(request) => (SectionState::Loading, Some(*request)),
            Resolution::Unavailable => (SectionState::Unavailable, None),
            Resolution::Empty => (SectionState::Empty, None),
        }
    }
}

/// Chapters whose sections can be generated without source text: the topic
/// itself is the subject matter.
fn topic_driven(book: Book) -> bool {
    matches!(book, Book::Grammar | Book::Writing | Book::Correction)
}

/// Resolution order: external resource, placeholder, cache, bundled field,
/// generation. Generation requires source text unless the chapter is
/// topic-driven.
pub fn resolve(chapter: &Chapter, tab_id: &str, cache: &ContentCache) -> Resolution {
    if let Some(url) = chapter.external_resources.get(tab_id) {
        return Resolution::External(url.clone());
    }
    if tabs::is_placeholder(tab_id) {
        return Resolution::Unavailable;
    }
    if let Some(text) = cache.get(&chapter.id, tab_id) {
        return Resolution::Cached(text.to_string());
    }
    if let Some(text) = tabs::direct_field(chapter, tab_id) {
        return Resolution::Direct(crate::content::to_rich_text(text));
    }
    let Some(tab) = tabs::tab(tab_id) else {
        return Resolution::Empty;
    };
    // The source text tab cannot be generated from itself.
    if tab_id == DEFAULT_TAB {
        return Resolution::Empty;
    }
    if chapter.has_source_text() || topic_driven(chapter.book) {
        return Resolution::Generate(Box::new(build_request(chapter, tab)));
    }
    Resolution::Empty
}

/// Seed the cache with bundled fields so later lookups and exports hit the
/// same path as generated content. First-wins: regenerated or cached
/// content is never clobbered.
pub fn seed_direct(chapter: &Chapter, cache: &mut ContentCache) {
    for tab in tabs::TABS.iter().filter(|t| t.fixed) {
        if let Some(text) = tabs::direct_field(chapter, tab.id) {
            cache.put_if_absent(&chapter.id, tab.id, crate::content::to_rich_text(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClassLevel, Language};
    use std::collections::HashMap;

    fn chapter(book: Book, text: Option<&str>) -> Chapter {
        Chapter {
            id: "c1".to_string(),
            title: "t".to_string(),
            book,
            class_level: ClassLevel::Ten,
            language: Language::Hindi,
            content_file: None,
            original_text: text.map(str::to_string),
            author_bio: None,
            vocabulary: None,
            qa: None,
            external_resources: HashMap::new(),
        }
    }

    #[test]
    fn test_external_resource_wins_over_everything() {
        let mut ch = chapter(Book::Sparsh, Some("text"));
        ch.external_resources.insert("quiz".to_string(), "https://example.com/q".to_string());
        let mut cache = ContentCache::in_memory();
        cache.put("c1", "quiz", "cached".to_string());
        match resolve(&ch, "quiz", &cache) {
            Resolution::External(url) => assert_eq!(url, "https://example.com/q"),
            other => panic!("expected external, got {other:?}"),
        }
    }

    #[test]
    fn test_placeholder_is_unavailable() {
        let ch = chapter(Book::Sparsh, Some("text"));
        assert!(matches!(resolve(&ch, "ek_jhalak", &ContentCache::in_memory()), Resolution::Unavailable));
    }

    #[test]
    fn test_cache_beats_generation() {
        let ch = chapter(Book::Sparsh, Some("text"));
        let mut cache = ContentCache::in_memory();
        cache.put("c1", "vyakhya", "saved".to_string());
        assert!(matches!(resolve(&ch, "vyakhya", &cache), Resolution::Cached(t) if t == "saved"));
    }

    #[test]
    fn test_direct_field_is_normalized() {
        let mut ch = chapter(Book::Sparsh, Some("line1\nline2"));
        ch.vocabulary = Some("word: meaning".to_string());
        let cache = ContentCache::in_memory();
        match resolve(&ch, DEFAULT_TAB, &cache) {
            Resolution::Direct(text) => assert_eq!(text, "line1<br>line2"),
            other => panic!("expected direct, got {other:?}"),
        }
        assert!(matches!(resolve(&ch, "vocabulary", &cache), Resolution::Direct(_)));
    }

    #[test]
    fn test_generation_needs_source_text_unless_topic_driven() {
        let cache = ContentCache::in_memory();
        let bare = chapter(Book::Sparsh, None);
        assert!(matches!(resolve(&bare, "vyakhya", &cache), Resolution::Empty));
        let with_text = chapter(Book::Sparsh, Some("text"));
        assert!(matches!(resolve(&with_text, "vyakhya", &cache), Resolution::Generate(_)));
        let grammar = chapter(Book::Grammar, None);
        assert!(matches!(resolve(&grammar, "vyakhya", &cache), Resolution::Generate(_)));
    }

    #[test]
    fn test_source_tab_never_generates() {
        let ch = chapter(Book::Grammar, None);
        assert!(matches!(resolve(&ch, DEFAULT_TAB, &ContentCache::in_memory()), Resolution::Empty));
    }

    #[test]
    fn test_seed_direct_is_first_wins() {
        let mut ch = chapter(Book::Sparsh, Some("original"));
        ch.qa = Some("q: a".to_string());
        let mut cache = ContentCache::in_memory();
        cache.put("c1", "qa", "edited".to_string());
        seed_direct(&ch, &mut cache);
        assert_eq!(cache.get("c1", "qa"), Some("edited"));
        assert_eq!(cache.get("c1", "mool_path"), Some("original"));
    }
}
