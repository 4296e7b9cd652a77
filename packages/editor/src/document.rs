//! # Field Store
//!
//! Authoritative in-memory state for one landing page document.
//!
//! The store owns the live value of every field declared by the
//! [`DocumentSchema`] plus the structured settings. Everything else
//! (undo history, saved versions, durable storage) works on snapshots
//! taken from here.
//!
//! ```text
//! set/get ──▶ FieldStore ──snapshot()──▶ DocumentSnapshot
//!                 ▲                            │
//!                 └────────restore()───────────┘
//! ```

use crate::schema::DocumentSchema;
use crate::snapshot::{DocumentSnapshot, Settings, Theme};
use crate::{EditorError, EditorResult};
use std::collections::BTreeMap;

/// Character count of a field against its advisory limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthStatus {
    pub count: usize,
    pub max: Option<usize>,
    pub over_limit: bool,
}

#[derive(Debug, Clone)]
pub struct FieldStore {
    schema: DocumentSchema,
    values: BTreeMap<String, String>,
    settings: Settings,
}

impl FieldStore {
    /// Create a store holding every schema field at its default value,
    /// with all sections visible.
    pub fn new(schema: DocumentSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| (f.id.clone(), f.default_value.clone()))
            .collect();

        let mut settings = Settings::default();
        for id in schema.section_ids() {
            settings.sections.insert(id.to_string(), true);
        }

        Self {
            schema,
            values,
            settings,
        }
    }

    pub fn schema(&self) -> &DocumentSchema {
        &self.schema
    }

    pub fn get(&self, field_id: &str) -> EditorResult<&str> {
        self.values
            .get(field_id)
            .map(String::as_str)
            .ok_or_else(|| EditorError::UnknownField(field_id.to_string()))
    }

    /// Replace a field value. Length limits are not checked here.
    pub fn set(&mut self, field_id: &str, value: impl Into<String>) -> EditorResult<()> {
        let slot = self
            .values
            .get_mut(field_id)
            .ok_or_else(|| EditorError::UnknownField(field_id.to_string()))?;
        *slot = value.into();
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_cta_url(&mut self, url: impl Into<String>) {
        self.settings.cta.url = url.into();
    }

    pub fn set_cta_label(&mut self, label: impl Into<String>) {
        self.settings.cta.label = label.into();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    pub fn set_logo(&mut self, uri: impl Into<String>) {
        self.settings.logo = uri.into();
    }

    pub fn set_video(&mut self, url: impl Into<String>) {
        self.settings.video = url.into();
    }

    pub fn set_section_visible(&mut self, section_id: &str, visible: bool) -> EditorResult<()> {
        let slot = self
            .settings
            .sections
            .get_mut(section_id)
            .ok_or_else(|| EditorError::UnknownSection(section_id.to_string()))?;
        *slot = visible;
        Ok(())
    }

    pub fn is_section_visible(&self, section_id: &str) -> EditorResult<bool> {
        self.settings
            .sections
            .get(section_id)
            .copied()
            .ok_or_else(|| EditorError::UnknownSection(section_id.to_string()))
    }

    /// Deep copy of every field and the current settings
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot::new(self.values.clone(), self.settings.clone())
    }

    /// Overwrite state from a snapshot.
    ///
    /// Only ids known to this store's schema are touched: snapshot entries
    /// for unknown fields or sections are ignored, and schema fields the
    /// snapshot lacks keep their current value.
    pub fn restore(&mut self, snapshot: &DocumentSnapshot) {
        for (id, value) in self.values.iter_mut() {
            if let Some(saved) = snapshot.field(id) {
                saved.clone_into(value);
            }
        }

        let saved = snapshot.settings();
        self.settings.cta = saved.cta.clone();
        self.settings.theme = saved.theme;
        saved.logo.clone_into(&mut self.settings.logo);
        saved.video.clone_into(&mut self.settings.video);
        for (id, visible) in self.settings.sections.iter_mut() {
            if let Some(saved_visible) = saved.sections.get(id) {
                *visible = *saved_visible;
            }
        }
    }

    pub fn length_status(&self, field_id: &str) -> EditorResult<LengthStatus> {
        let value = self.get(field_id)?;
        let count = value.trim().chars().count();
        let max = self.schema.field(field_id).and_then(|f| f.max_len);

        Ok(LengthStatus {
            count,
            max,
            over_limit: max.map(|m| count > m).unwrap_or(false),
        })
    }

    /// Fields currently longer than their advisory limit, in schema order
    pub fn over_limit_fields(&self) -> Vec<&str> {
        self.schema
            .field_ids()
            .filter(|id| {
                self.length_status(id)
                    .map(|s| s.over_limit)
                    .unwrap_or(false)
            })
            .collect()
    }
}
