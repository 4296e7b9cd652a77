//! # Version Timeline
//!
//! User-named snapshots saved on request. The timeline lives alongside the
//! undo stack but never shares entries with it: saving a version leaves
//! history alone, and restoring one records a single checkpoint first so the
//! restore itself can be undone.

use crate::document::FieldStore;
use crate::snapshot::DocumentSnapshot;
use crate::undo_stack::UndoStack;
use crate::{EditorError, EditorResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_MAX_VERSIONS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredVersion")]
pub struct Version {
    /// Capture time in epoch milliseconds, strictly increasing per timeline
    pub id: u64,
    pub label: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: DocumentSnapshot,
}

/// A version as found in storage. Older timelines carry the flat collected
/// document under `data` instead of a `snapshot`.
#[derive(Deserialize)]
struct StoredVersion {
    id: u64,
    label: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    snapshot: Option<DocumentSnapshot>,
    #[serde(default)]
    data: Option<Map<String, Value>>,
}

impl TryFrom<StoredVersion> for Version {
    type Error = String;

    fn try_from(stored: StoredVersion) -> Result<Self, Self::Error> {
        let snapshot = match (stored.snapshot, stored.data) {
            (Some(snapshot), _) => snapshot,
            (None, Some(data)) => DocumentSnapshot::from_flat(&data),
            (None, None) => return Err(format!("version {} has no snapshot", stored.id)),
        };

        Ok(Self {
            id: stored.id,
            label: stored.label,
            timestamp: stored.timestamp,
            snapshot,
        })
    }
}

#[derive(Debug, Clone)]
pub struct VersionTimeline {
    /// Most recent first
    versions: Vec<Version>,
    max_versions: usize,
    last_id: u64,
}

impl VersionTimeline {
    pub fn new() -> Self {
        Self::with_max_versions(DEFAULT_MAX_VERSIONS)
    }

    /// A timeline keeping at most `max_versions`, never fewer than one
    pub fn with_max_versions(max_versions: usize) -> Self {
        Self {
            versions: Vec::new(),
            max_versions: max_versions.max(1),
            last_id: 0,
        }
    }

    /// Rebuild a timeline from stored versions (expected most recent first)
    pub fn from_versions(mut versions: Vec<Version>, max_versions: usize) -> Self {
        let max_versions = max_versions.max(1);
        versions.truncate(max_versions);
        let last_id = versions.iter().map(|v| v.id).max().unwrap_or(0);

        Self {
            versions,
            max_versions,
            last_id,
        }
    }

    pub fn from_json(json: &str, max_versions: usize) -> Result<Self, serde_json::Error> {
        let versions: Vec<Version> = serde_json::from_str(json)?;
        Ok(Self::from_versions(versions, max_versions))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.versions)
    }

    /// Capture the store as a new version at the head of the timeline.
    ///
    /// A missing or blank label becomes "Version N" where N is the count
    /// after saving. The oldest version is dropped past the limit.
    pub fn save(&mut self, store: &FieldStore, label: Option<&str>, now: DateTime<Utc>) -> Version {
        let label = match label.map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("Version {}", self.versions.len() + 1),
        };

        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;

        let version = Version {
            id,
            label,
            timestamp: now,
            snapshot: store.snapshot(),
        };
        self.versions.insert(0, version.clone());
        self.versions.truncate(self.max_versions);

        version
    }

    /// Restore a saved version into the store, checkpointing first
    pub fn restore(
        &self,
        id: u64,
        history: &mut UndoStack,
        store: &mut FieldStore,
    ) -> EditorResult<&Version> {
        let version = self.get(id).ok_or(EditorError::VersionNotFound(id))?;

        history.record_checkpoint(store);
        store.restore(&version.snapshot);

        Ok(version)
    }

    pub fn get(&self, id: u64) -> Option<&Version> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Versions, most recent first
    pub fn list(&self) -> &[Version] {
        &self.versions
    }

    pub fn latest(&self) -> Option<&Version> {
        self.versions.first()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn max_versions(&self) -> usize {
        self.max_versions
    }
}

impl Default for VersionTimeline {
    fn default() -> Self {
        Self::new()
    }
}
