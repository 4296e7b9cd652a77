//! # Persistence Gateway
//!
//! Durable key-value storage the session reads at startup and writes to as
//! edits settle. The in-memory store is always the source of truth; a failed
//! write is reported, never rolled back.
//!
//! Storage backends:
//! - **Memory**: test double with a write log and failure injection
//! - **JSON file**: the whole key space kept in one file on disk

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub trait PersistenceGateway {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

pub const DEFAULT_KEY_PREFIX: &str = "ap_";

/// Key naming for everything the session persists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    prefix: String,
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn field(&self, field_id: &str) -> String {
        format!("{}{}", self.prefix, field_id)
    }

    pub fn cta_url(&self) -> String {
        format!("{}cta_url", self.prefix)
    }

    pub fn cta_label(&self) -> String {
        format!("{}cta_label", self.prefix)
    }

    pub fn theme(&self) -> String {
        format!("{}mode", self.prefix)
    }

    pub fn section(&self, section_id: &str) -> String {
        format!("{}section_{}", self.prefix, section_id)
    }

    pub fn logo(&self) -> String {
        format!("{}logo", self.prefix)
    }

    pub fn video(&self) -> String {
        format!("{}vsl", self.prefix)
    }

    pub fn versions(&self) -> String {
        format!("{}versions", self.prefix)
    }

    pub fn countdown_deadline(&self) -> String {
        format!("{}countdown_deadline", self.prefix)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

/// In-memory gateway that records every write
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: Vec<(String, String)>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Every successful write, in order
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    pub fn writes_for(&self, key: &str) -> Vec<&str> {
        self.writes
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl PersistenceGateway for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if self.fail_reads {
            return Err(PersistenceError::Unavailable(format!("read of {}", key)));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Unavailable(format!("write of {}", key)));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Gateway backed by a single JSON object on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store file, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    fn write_file(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PersistenceGateway for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        let keys = StorageKeys::default();

        assert_eq!(keys.field("hero_headline"), "ap_hero_headline");
        assert_eq!(keys.cta_url(), "ap_cta_url");
        assert_eq!(keys.theme(), "ap_mode");
        assert_eq!(keys.section("roi"), "ap_section_roi");
        assert_eq!(keys.logo(), "ap_logo");
        assert_eq!(keys.video(), "ap_vsl");
        assert_eq!(keys.versions(), "ap_versions");
        assert_eq!(keys.countdown_deadline(), "ap_countdown_deadline");
        assert_eq!(StorageKeys::new("lp.").field("x"), "lp.x");
    }

    #[test]
    fn test_memory_store_records_writes() {
        let mut store = MemoryStore::new().with_entry("a", "1");

        assert_eq!(store.load("a").unwrap(), Some("1".to_string()));
        assert_eq!(store.load("b").unwrap(), None);

        store.save("b", "2").unwrap();
        store.save("b", "3").unwrap();
        assert_eq!(store.writes_for("b"), vec!["2", "3"]);
        assert_eq!(store.get("b"), Some("3"));
    }

    #[test]
    fn test_memory_store_failure_injection() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.save("a", "1").is_err());
        assert!(store.writes().is_empty());

        store.set_fail_reads(true);
        assert!(matches!(store.load("a"), Err(PersistenceError::Unavailable(_))));
    }

    #[test]
    fn test_json_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.entries().is_empty());
        store.save("ap_hero_headline", "Hello").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.load("ap_hero_headline").unwrap(),
            Some("Hello".to_string())
        );
    }

    #[test]
    fn test_json_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(PersistenceError::Serialization(_))
        ));
    }
}
