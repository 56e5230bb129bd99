//! Persistent content cache.
//!
//! One JSON document maps `{chapter_id}::{section_id}` to rich text. The
//! file is read once at startup and rewritten after every mutation, so a
//! crash loses at most the entry being written.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::log::log_error;

fn cache_key(chapter_id: &str, section_id: &str) -> String {
    format!("{chapter_id}::{section_id}")
}

#[derive(Debug)]
pub struct ContentCache {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl ContentCache {
    /// Load the cache from `path`. A missing or unreadable file yields an
    /// empty cache; corruption is logged, not fatal.
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    log_error(&format!("cache {} unreadable, starting empty: {e}", path.display()));
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path: path.to_path_buf(), entries }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self { path: PathBuf::from("/dev/null"), entries: HashMap::new() }
    }

    pub fn get(&self, chapter_id: &str, section_id: &str) -> Option<&str> {
        self.entries.get(&cache_key(chapter_id, section_id)).map(String::as_str)
    }

    pub fn contains(&self, chapter_id: &str, section_id: &str) -> bool {
        self.entries.contains_key(&cache_key(chapter_id, section_id))
    }

    pub fn put(&mut self, chapter_id: &str, section_id: &str, content: String) {
        self.entries.insert(cache_key(chapter_id, section_id), content);
        self.flush();
    }

    /// Insert only if absent. Returns true when the value was written.
    /// Concurrent generations of the same section resolve to first-wins.
    pub fn put_if_absent(&mut self, chapter_id: &str, section_id: &str, content: String) -> bool {
        let key = cache_key(chapter_id, section_id);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, content);
        self.flush();
        true
    }

    pub fn remove(&mut self, chapter_id: &str, section_id: &str) -> bool {
        let removed = self.entries.remove(&cache_key(chapter_id, section_id)).is_some();
        if removed {
            self.flush();
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn flush(&self) {
        let write = || -> Result<(), String> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(|e| format!("create {}: {e}", parent.display()))?;
            }
            let raw = serde_json::to_string(&self.entries)
                .map_err(|e| format!("serialize cache: {e}"))?;
            fs::write(&self.path, raw).map_err(|e| format!("write {}: {e}", self.path.display()))
        };
        if let Err(e) = write() {
            // Persistence failures degrade to in-memory caching.
            log_error(&format!("cache flush failed: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        {
            let mut cache = ContentCache::load(&path);
            cache.put("sparsh_1", "quiz", "{\"title\":\"q\"}".to_string());
        }
        let cache = ContentCache::load(&path);
        assert_eq!(cache.get("sparsh_1", "quiz"), Some("{\"title\":\"q\"}"));
        assert!(!cache.contains("sparsh_1", "worksheet"));
    }

    #[test]
    fn test_put_if_absent_is_first_wins() {
        let mut cache = ContentCache::in_memory();
        assert!(cache.put_if_absent("c", "s", "first".to_string()));
        assert!(!cache.put_if_absent("c", "s", "second".to_string()));
        assert_eq!(cache.get("c", "s"), Some("first"));
    }

    #[test]
    fn test_remove_clears_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let mut cache = ContentCache::load(&path);
        cache.put("c", "s", "v".to_string());
        assert!(cache.remove("c", "s"));
        assert!(!cache.remove("c", "s"));
        assert_eq!(cache.get("c", "s"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "not json").unwrap();
        let cache = ContentCache::load(&path);
        assert_eq!(cache.len(), 0);
    }
}
