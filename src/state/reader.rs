//! Section state machine for the reader panel.
//!
//! Every tab selection lands in exactly one of these states; the display
//! layer renders the state, never the decision logic. Transient quiz
//! answers live here too so a chapter switch can reset them without
//! touching the content cache.

use std::collections::{HashMap, HashSet};

use crate::state::tabs::DEFAULT_TAB;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionState {
    /// Nothing selected yet (startup only).
    Idle,
    /// A generation request is in flight for the active tab.
    Loading,
    /// Content available for display.
    Ready(String),
    /// No content and no request in flight; manual generate is offered.
    Empty,
    /// The tab maps to an externally hosted resource.
    External(String),
    /// Passive placeholder tab; no content will ever exist.
    Unavailable,
}

#[derive(Debug)]
pub struct ReaderState {
    pub active_tab: String,
    pub section: SectionState,
    /// Quiz: question id -> chosen option text.
    pub answers: HashMap<u32, String>,
    pub finished: bool,
    pub question_cursor: usize,
    pub scroll: u16,
    /// Chapter ids with an auto-generation request pending. Keys on the
    /// chapter only; manual per-section requests are not guarded here.
    auto_in_flight: HashSet<String>,
}

impl Default for ReaderState {
    fn default() -> Self {
        Self {
            active_tab: DEFAULT_TAB.to_string(),
            section: SectionState::Idle,
            answers: HashMap::new(),
            finished: false,
            question_cursor: 0,
            scroll: 0,
            auto_in_flight: HashSet::new(),
        }
    }
}

impl ReaderState {
    /// Reset transient answer/quiz/scroll state. Called on every tab or
    /// chapter switch; never touches the cache or the in-flight guard.
    pub fn reset_transients(&mut self) {
        self.answers.clear();
        self.finished = false;
        self.question_cursor = 0;
        self.scroll = 0;
    }

    /// Mark an auto-generation as started. Returns false if one is already
    /// pending for this chapter, in which case the caller must not issue a
    /// second request.
    pub fn begin_auto(&mut self, chapter_id: &str) -> bool {
        self.auto_in_flight.insert(chapter_id.to_string())
    }

    pub fn auto_pending(&self, chapter_id: &str) -> bool {
        self.auto_in_flight.contains(chapter_id)
    }

    pub fn finish_auto(&mut self, chapter_id: &str) {
        self.auto_in_flight.remove(chapter_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_guard_is_per_chapter() {
        let mut reader = ReaderState::default();
        assert!(reader.begin_auto("g1"));
        assert!(!reader.begin_auto("g1"));
        assert!(reader.begin_auto("g2"));
        reader.finish_auto("g1");
        assert!(reader.begin_auto("g1"));
    }

    #[test]
    fn test_reset_transients_keeps_guard() {
        let mut reader = ReaderState::default();
        reader.begin_auto("g1");
        reader.answers.insert(1, "a".to_string());
        reader.finished = true;
        reader.scroll = 7;
        reader.reset_transients();
        assert!(reader.answers.is_empty());
        assert!(!reader.finished);
        assert_eq!(reader.scroll, 0);
        assert!(reader.auto_pending("g1"));
    }
}
