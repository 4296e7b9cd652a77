//! # Collected Documents
//!
//! The one read path for export and submission code: a full snapshot plus
//! provenance metadata, rendered into the flat JSON shape the rest of the
//! builder exchanges.
//!
//! ```text
//! {
//!   "<fieldId>": "...",
//!   "cta": { "label": "...", "url": "..." },
//!   "theme": "light" | "dark",
//!   "sections": { "<sectionId>": true },
//!   "logo": "...",
//!   "video": "...",
//!   "meta": { "time": "<ISO 8601>", "url": "...", "version": "..." }
//! }
//! ```

use crate::snapshot::DocumentSnapshot;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub time: DateTime<Utc>,
    pub url: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedDocument {
    pub snapshot: DocumentSnapshot,
    pub meta: DocumentMeta,
}

impl CollectedDocument {
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();

        for (id, value) in self.snapshot.fields() {
            root.insert(id.to_string(), Value::String(value.trim().to_string()));
        }

        let settings = self.snapshot.settings();
        root.insert(
            "cta".to_string(),
            json!({ "label": settings.cta.label, "url": settings.cta.url }),
        );
        root.insert(
            "theme".to_string(),
            Value::String(settings.theme.as_str().to_string()),
        );
        root.insert(
            "sections".to_string(),
            Value::Object(
                settings
                    .sections
                    .iter()
                    .map(|(id, visible)| (id.clone(), Value::Bool(*visible)))
                    .collect(),
            ),
        );
        root.insert("logo".to_string(), Value::String(settings.logo.clone()));
        root.insert("video".to_string(), Value::String(settings.video.clone()));
        root.insert(
            "meta".to_string(),
            json!({
                "time": self.meta.time.to_rfc3339_opts(SecondsFormat::Millis, true),
                "url": self.meta.url,
                "version": self.meta.version,
            }),
        );

        Value::Object(root)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_json())
    }
}
