//! # Document Snapshots
//!
//! Immutable value copies of the whole document: every field value plus the
//! structured settings (CTA, theme, section visibility). Snapshots are what
//! the undo stack and the version timeline hold; they never alias the live
//! store.

use crate::schema::DocumentSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const DEFAULT_CTA_LABEL: &str = "Get Started";
pub const DEFAULT_VIDEO_URL: &str = "https://www.youtube.com/embed/CNRiNz0YYlM";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Anything other than "light" is dark
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("light") {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call-to-action link shared by the hero and final CTA buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cta {
    pub label: String,
    pub url: String,
}

impl Default for Cta {
    fn default() -> Self {
        Self {
            label: DEFAULT_CTA_LABEL.to_string(),
            url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cta: Cta,
    pub theme: Theme,

    /// Section id -> visible
    pub sections: BTreeMap<String, bool>,

    /// Logo image URI, usually a data URI. Empty shows the text logo.
    pub logo: String,

    /// Embedded sales video URL
    pub video: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cta: Cta::default(),
            theme: Theme::default(),
            sections: BTreeMap::new(),
            logo: String::new(),
            video: DEFAULT_VIDEO_URL.to_string(),
        }
    }
}

/// Immutable copy of every field value and the settings at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    fields: BTreeMap<String, String>,
    settings: Settings,
}

impl DocumentSnapshot {
    pub fn new(fields: BTreeMap<String, String>, settings: Settings) -> Self {
        Self { fields, settings }
    }

    /// Rebuild a snapshot from the flat collected-document shape.
    ///
    /// Top-level string values become fields; `cta`, `theme`, `sections`,
    /// `logo` and `video` become settings and `meta` is dropped. Settings
    /// missing from `data` keep their defaults.
    pub fn from_flat(data: &Map<String, Value>) -> Self {
        let mut fields = BTreeMap::new();
        let mut settings = Settings::default();

        for (key, value) in data {
            match (key.as_str(), value) {
                ("meta", _) => {}
                ("cta", Value::Object(cta)) => {
                    if let Some(label) = cta.get("label").and_then(Value::as_str) {
                        settings.cta.label = label.to_string();
                    }
                    if let Some(url) = cta.get("url").and_then(Value::as_str) {
                        settings.cta.url = url.to_string();
                    }
                }
                ("theme", Value::String(theme)) => settings.theme = Theme::parse_lenient(theme),
                ("sections", Value::Object(sections)) => {
                    for (id, visible) in sections {
                        if let Some(visible) = visible.as_bool() {
                            settings.sections.insert(id.clone(), visible);
                        }
                    }
                }
                ("logo", Value::String(logo)) => settings.logo = logo.clone(),
                ("video", Value::String(video)) => settings.video = video.clone(),
                (_, Value::String(text)) => {
                    fields.insert(key.clone(), text.clone());
                }
                _ => {}
            }
        }

        Self { fields, settings }
    }

    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drop fields and section flags the schema doesn't know about
    pub fn restricted_to(&self, schema: &DocumentSchema) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|(id, _)| schema.has_field(id))
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect();

        let mut settings = self.settings.clone();
        settings.sections.retain(|id, _| schema.has_section(id));

        Self { fields, settings }
    }

    /// Field ids whose values differ between two snapshots
    pub fn changed_fields<'a>(&'a self, other: &'a DocumentSnapshot) -> Vec<&'a str> {
        let mut changed: Vec<&str> = self
            .fields
            .iter()
            .filter(|(id, value)| other.fields.get(*id) != Some(*value))
            .map(|(id, _)| id.as_str())
            .collect();

        for id in other.fields.keys() {
            if !self.fields.contains_key(id) {
                changed.push(id.as_str());
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, SectionSpec};

    fn snapshot(pairs: &[(&str, &str)]) -> DocumentSnapshot {
        DocumentSnapshot::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            Settings::default(),
        )
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!(Theme::parse_lenient("light"), Theme::Light);
        assert_eq!(Theme::parse_lenient(" Light "), Theme::Light);
        assert_eq!(Theme::parse_lenient("dark"), Theme::Dark);
        assert_eq!(Theme::parse_lenient("sepia"), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }

    #[test]
    fn test_snapshots_compare_structurally() {
        assert_eq!(snapshot(&[("a", "1")]), snapshot(&[("a", "1")]));
        assert_ne!(snapshot(&[("a", "1")]), snapshot(&[("a", "2")]));
    }

    #[test]
    fn test_restricted_to_schema() {
        let schema = DocumentSchema::new()
            .with_field(FieldSpec::new("a"))
            .with_section(SectionSpec::new("hero", "Hero"));

        let mut settings = Settings::default();
        settings.sections.insert("hero".to_string(), false);
        settings.sections.insert("gone".to_string(), true);

        let full = DocumentSnapshot::new(
            [("a", "1"), ("b", "2")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            settings,
        );

        let restricted = full.restricted_to(&schema);
        assert_eq!(restricted.len(), 1);
        assert_eq!(restricted.field("a"), Some("1"));
        assert_eq!(restricted.field("b"), None);
        assert_eq!(restricted.settings().sections.len(), 1);
    }

    #[test]
    fn test_from_flat_collected_shape() {
        let data: Map<String, Value> = serde_json::from_str(
            r#"{
                "hero_headline": "Big promise",
                "cta": { "label": "Book a call", "url": "https://example.com/book" },
                "theme": "light",
                "logo": "data:image/png;base64,AAAA",
                "meta": { "time": "2024-05-01T12:00:00.000Z", "url": "", "version": "v9.1" }
            }"#,
        )
        .unwrap();

        let snapshot = DocumentSnapshot::from_flat(&data);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.field("hero_headline"), Some("Big promise"));

        let settings = snapshot.settings();
        assert_eq!(settings.cta.label, "Book a call");
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.logo, "data:image/png;base64,AAAA");
        assert_eq!(settings.video, DEFAULT_VIDEO_URL);
        assert!(settings.sections.is_empty());
    }

    #[test]
    fn test_changed_fields() {
        let before = snapshot(&[("a", "1"), ("b", "2")]);
        let after = snapshot(&[("a", "1"), ("b", "3"), ("c", "4")]);

        let mut changed = before.changed_fields(&after);
        changed.sort();
        assert_eq!(changed, vec!["b", "c"]);
    }
}
