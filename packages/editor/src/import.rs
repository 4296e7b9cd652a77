//! # Document Import
//!
//! Turns an arbitrary JSON object into the list of mutations a session
//! applies in one undoable step. Planning never touches the store, so a
//! rejected import leaves nothing half-applied.
//!
//! Top-level keys:
//! - `cta` → `{ "url": .., "label": .. }`, routed to the CTA settings
//! - `theme` → `"light"` or anything else for dark
//! - `sections` → `{ "<section id>": bool }`
//! - `logo` → logo URI, applied as given (empty clears it)
//! - `video` → video URL, ignored when blank
//! - `meta` → provenance, ignored
//! - anything else with a string value → a field, if the schema has it

use crate::mutations::Mutation;
use crate::schema::DocumentSchema;
use crate::snapshot::Theme;
use crate::{EditorError, EditorResult};
use serde_json::{Map, Value};

pub const RESERVED_KEYS: [&str; 6] = ["cta", "meta", "theme", "sections", "logo", "video"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPlan {
    pub mutations: Vec<Mutation>,

    /// Keys that were neither applied nor reserved
    pub skipped: Vec<String>,
}

/// Outcome of an applied import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

impl ImportReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

/// Parse import text; anything but a JSON object is rejected
pub fn parse_import(json: &str) -> EditorResult<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| EditorError::ImportParse(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(EditorError::ImportParse(format!(
            "expected a JSON object, found {}",
            value_kind(&other)
        ))),
    }
}

pub fn plan_import(data: &Map<String, Value>, schema: &DocumentSchema) -> ImportPlan {
    let mut plan = ImportPlan::default();

    for (key, value) in data {
        match key.as_str() {
            "meta" => {}
            "cta" => plan_cta(value, &mut plan),
            "theme" => match value.as_str() {
                Some(theme) => plan.mutations.push(Mutation::SetTheme {
                    theme: Theme::parse_lenient(theme),
                }),
                None => plan.skipped.push(key.clone()),
            },
            "sections" => plan_sections(value, schema, &mut plan),
            "logo" => match value.as_str() {
                Some(uri) => plan.mutations.push(Mutation::SetLogo {
                    uri: uri.trim().to_string(),
                }),
                None => plan.skipped.push(key.clone()),
            },
            "video" => match value.as_str().map(str::trim) {
                Some("") => {}
                Some(url) => plan.mutations.push(Mutation::SetVideo {
                    url: url.to_string(),
                }),
                None => plan.skipped.push(key.clone()),
            },
            field_id => match value.as_str() {
                Some(text) if schema.has_field(field_id) => {
                    plan.mutations.push(Mutation::set_field(field_id, text));
                }
                _ => plan.skipped.push(key.clone()),
            },
        }
    }

    plan
}

fn plan_cta(value: &Value, plan: &mut ImportPlan) {
    let Some(cta) = value.as_object() else {
        plan.skipped.push("cta".to_string());
        return;
    };

    if let Some(url) = cta.get("url").and_then(Value::as_str).map(str::trim) {
        if !url.is_empty() {
            plan.mutations.push(Mutation::SetCtaUrl {
                url: url.to_string(),
            });
        }
    }

    if let Some(label) = cta.get("label").and_then(Value::as_str).map(str::trim) {
        if !label.is_empty() {
            plan.mutations.push(Mutation::SetCtaLabel {
                label: label.to_string(),
            });
        }
    }
}

fn plan_sections(value: &Value, schema: &DocumentSchema, plan: &mut ImportPlan) {
    let Some(sections) = value.as_object() else {
        plan.skipped.push("sections".to_string());
        return;
    };

    for (section_id, visible) in sections {
        match visible.as_bool() {
            Some(visible) if schema.has_section(section_id) => {
                plan.mutations.push(Mutation::SetSectionVisible {
                    section_id: section_id.clone(),
                    visible,
                });
            }
            _ => plan.skipped.push(format!("sections.{}", section_id)),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
