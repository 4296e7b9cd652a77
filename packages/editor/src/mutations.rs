//! # Document Mutations
//!
//! Every change the editing surface can make to a document, as data.
//!
//! ## Mutation Semantics
//!
//! ### SetField
//! - Atomic replacement of a field's text (not a character diff)
//! - Fails on ids outside the schema, never on length
//!
//! ### Settings
//! - `SetCtaUrl`, `SetCtaLabel`, `SetTheme`, `SetLogo` and `SetVideo`
//!   always succeed
//! - `SetSectionVisible` fails on unknown section ids
//!
//! Mutations carry no history of their own. Undo works on snapshots taken
//! by the session, so a mutation never needs an inverse.

use crate::document::FieldStore;
use crate::persistence::StorageKeys;
use crate::snapshot::Theme;
use crate::EditorResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mutation {
    /// Replace the text of a field
    SetField { field_id: String, value: String },

    /// Point both CTA buttons at a new URL
    SetCtaUrl { url: String },

    /// Change the CTA button text
    SetCtaLabel { label: String },

    SetTheme { theme: Theme },

    SetSectionVisible { section_id: String, visible: bool },

    /// Replace the logo image URI
    SetLogo { uri: String },

    /// Embed a different sales video
    SetVideo { url: String },
}

impl Mutation {
    pub fn set_field(field_id: impl Into<String>, value: impl Into<String>) -> Self {
        Mutation::SetField {
            field_id: field_id.into(),
            value: value.into(),
        }
    }

    /// Apply mutation to the store with validation
    pub fn apply(&self, store: &mut FieldStore) -> EditorResult<()> {
        match self {
            Mutation::SetField { field_id, value } => store.set(field_id, value.as_str()),

            Mutation::SetCtaUrl { url } => {
                store.set_cta_url(url.as_str());
                Ok(())
            }

            Mutation::SetCtaLabel { label } => {
                store.set_cta_label(label.as_str());
                Ok(())
            }

            Mutation::SetTheme { theme } => {
                store.set_theme(*theme);
                Ok(())
            }

            Mutation::SetSectionVisible {
                section_id,
                visible,
            } => store.set_section_visible(section_id, *visible),

            Mutation::SetLogo { uri } => {
                store.set_logo(uri.as_str());
                Ok(())
            }

            Mutation::SetVideo { url } => {
                store.set_video(url.as_str());
                Ok(())
            }
        }
    }

    /// Storage key and value that make this mutation durable
    pub fn persisted_entry(&self, keys: &StorageKeys) -> (String, String) {
        match self {
            Mutation::SetField { field_id, value } => (keys.field(field_id), value.clone()),
            Mutation::SetCtaUrl { url } => (keys.cta_url(), url.clone()),
            Mutation::SetCtaLabel { label } => (keys.cta_label(), label.clone()),
            Mutation::SetTheme { theme } => (keys.theme(), theme.as_str().to_string()),
            Mutation::SetSectionVisible {
                section_id,
                visible,
            } => (keys.section(section_id), visible.to_string()),
            Mutation::SetLogo { uri } => (keys.logo(), uri.clone()),
            Mutation::SetVideo { url } => (keys.video(), url.clone()),
        }
    }

    /// Key this mutation targets in an imported or collected document
    pub fn target(&self) -> &str {
        match self {
            Mutation::SetField { field_id, .. } => field_id.as_str(),
            Mutation::SetCtaUrl { .. } => "cta.url",
            Mutation::SetCtaLabel { .. } => "cta.label",
            Mutation::SetTheme { .. } => "theme",
            Mutation::SetSectionVisible { section_id, .. } => section_id.as_str(),
            Mutation::SetLogo { .. } => "logo",
            Mutation::SetVideo { .. } => "video",
        }
    }
}
