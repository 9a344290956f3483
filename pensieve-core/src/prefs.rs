//! Tolerant preference storage.
//!
//! A small key/value string store over a JSON file. The store never raises:
//! an unreadable or unwritable file degrades to in-memory defaults, and
//! failed writes are swallowed after a log warning. Absent keys read as
//! false for the boolean helpers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key for the spoiler visibility toggle.
pub const SPOILERS_ENABLED: &str = "spoilers-enabled";

/// Key for the dismissed-notice flag on the wizards and timeline pages.
pub const SPOILER_BANNER_DISMISSED: &str = "spoiler-banner-dismissed";

/// Key/value preference store with best-effort persistence.
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl PrefStore {
    /// Open a store backed by the given file. Missing or unreadable files
    /// yield an empty store; the path is kept so later writes can still
    /// try to persist.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(err) => {
                    log::warn!("ignoring malformed preference file {}: {err}", path.display());
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                log::warn!("preferences unavailable at {}: {err}", path.display());
                HashMap::new()
            }
        };

        Self {
            path: Some(path),
            values,
        }
    }

    /// A store with no backing file. Reads return defaults and writes stay
    /// in memory for the process lifetime.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: HashMap::new(),
        }
    }

    /// Read a raw value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store a value and persist best-effort.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
        self.persist();
    }

    /// Read a boolean flag; absent or non-"true" values are false.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    /// Store a boolean flag.
    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let text = match serde_json::to_string_pretty(&self.values) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("could not serialize preferences: {err}");
                return;
            }
        };
        if let Err(err) = std::fs::write(path, text) {
            log::warn!("could not write preferences to {}: {err}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_keys_read_as_false() {
        let store = PrefStore::in_memory();
        assert!(!store.flag(SPOILERS_ENABLED));
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn flags_round_trip_through_the_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("prefs.json");

        let mut store = PrefStore::open(&path);
        assert!(!store.flag(SPOILERS_ENABLED));
        store.set_flag(SPOILERS_ENABLED, true);

        // A fresh open sees the persisted value.
        let reopened = PrefStore::open(&path);
        assert!(reopened.flag(SPOILERS_ENABLED));
        assert_eq!(reopened.get(SPOILERS_ENABLED), Some("true"));
    }

    #[test]
    fn malformed_files_degrade_to_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json at all").expect("write");

        let store = PrefStore::open(&path);
        assert!(!store.flag(SPOILERS_ENABLED));
    }

    #[test]
    fn unwritable_store_swallows_writes() {
        let dir = TempDir::new().expect("temp dir");
        // A directory path cannot be read or written as a file.
        let mut store = PrefStore::open(dir.path());
        store.set_flag(SPOILER_BANNER_DISMISSED, true);
        // The in-memory view still reflects the write.
        assert!(store.flag(SPOILER_BANNER_DISMISSED));
    }

    #[test]
    fn independent_flags_do_not_interfere() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("prefs.json");

        let mut store = PrefStore::open(&path);
        store.set_flag(SPOILER_BANNER_DISMISSED, true);
        assert!(!store.flag(SPOILERS_ENABLED));
        assert!(store.flag(SPOILER_BANNER_DISMISSED));
    }
}
