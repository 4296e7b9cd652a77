//! # Document Schema
//!
//! The fixed set of editable fields and togglable sections a landing page
//! template exposes. Identifiers come from the template and never change at
//! runtime; the store only ever holds values for ids listed here.

use serde::{Deserialize, Serialize};

/// A single editable text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,

    /// Advisory length limit (display only, never enforced)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,

    /// Example copy shown next to the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Value before anything has been edited or loaded
    #[serde(default)]
    pub default_value: String,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_len: None,
            hint: None,
            default_value: String::new(),
        }
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }
}

/// A page section whose visibility can be toggled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub name: String,
}

impl SectionSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSchema {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

impl DocumentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_section(mut self, section: SectionSpec) -> Self {
        self.sections.push(section);
        self
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.field(id).is_some()
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.section(id).is_some()
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.id.as_str())
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    /// The stock landing page template: hero, qualifier lines, cost of
    /// inaction, scarcity banner and footer copy, plus its 13 sections.
    pub fn landing_page() -> Self {
        Self::new()
            .with_field(
                FieldSpec::new("hero_headline")
                    .max_len(60)
                    .hint("GET 50+ QUALIFIED B2B LEADS MONTHLY"),
            )
            .with_field(
                FieldSpec::new("hero_sub").max_len(180).hint(
                    "Help B2B SaaS companies book 3-5 demos per week through AI-powered \
                     outreach, no cold calling, no giant sales team.",
                ),
            )
            .with_field(
                FieldSpec::new("q_who")
                    .max_len(60)
                    .hint("B2B SaaS founders doing $500K-$3M ARR"),
            )
            .with_field(
                FieldSpec::new("q_result")
                    .max_len(60)
                    .hint("50-80 qualified meetings per month"),
            )
            .with_field(
                FieldSpec::new("q_time")
                    .max_len(40)
                    .hint("in first 45 days"),
            )
            .with_field(
                FieldSpec::new("q_without")
                    .max_len(60)
                    .hint("hiring BDRs or learning complex tools"),
            )
            .with_field(
                FieldSpec::new("coi_sub").max_len(160).hint(
                    "Every month you wait costs you pipeline, momentum, and competitive advantage.",
                ),
            )
            .with_field(
                FieldSpec::new("scarcity_text")
                    .max_len(60)
                    .hint("Only 5 spots available this week"),
            )
            .with_field(FieldSpec::new("foot_legal").max_len(200))
            .with_field(FieldSpec::new("foot_contact").max_len(120))
            .with_section(SectionSpec::new("countdown", "Countdown Timer"))
            .with_section(SectionSpec::new("hero", "Hero"))
            .with_section(SectionSpec::new("coi", "Cost of Inaction"))
            .with_section(SectionSpec::new("who", "Who This Is For"))
            .with_section(SectionSpec::new("mechanism", "Why It Works"))
            .with_section(SectionSpec::new("process", "How It Works"))
            .with_section(SectionSpec::new("offer", "What You Get"))
            .with_section(SectionSpec::new("valuestack", "Value Breakdown"))
            .with_section(SectionSpec::new("roi", "ROI Snapshot"))
            .with_section(SectionSpec::new("proof", "Proof"))
            .with_section(SectionSpec::new("guarantee", "Guarantee"))
            .with_section(SectionSpec::new("finalcta", "Final CTA"))
            .with_section(SectionSpec::new("footer", "Footer"))
    }
}
