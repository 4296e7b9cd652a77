use crate::persistence::{StorageKeys, DEFAULT_KEY_PREFIX};
use crate::undo_stack::DEFAULT_UNDO_LEVELS;
use crate::versions::DEFAULT_MAX_VERSIONS;
use crate::{EditorError, EditorResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagesmith.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo checkpoints retained (0 = unlimited)
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,

    /// Saved versions retained
    #[serde(default = "default_version_limit")]
    pub version_limit: usize,

    /// Quiet period before a field edit is persisted
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Quiet period before a CTA URL change is persisted
    #[serde(default = "default_cta_debounce_ms")]
    pub cta_debounce_ms: u64,

    /// Prefix for every persisted key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Reported in collected document metadata
    #[serde(default = "default_builder_version")]
    pub builder_version: String,

    /// Page URL reported in collected document metadata
    #[serde(default)]
    pub source_url: String,

    /// Length of a fresh countdown
    #[serde(default = "default_countdown_days")]
    pub countdown_days: u32,
}

fn default_undo_depth() -> usize {
    DEFAULT_UNDO_LEVELS
}

fn default_version_limit() -> usize {
    DEFAULT_MAX_VERSIONS
}

fn default_debounce_ms() -> u64 {
    600
}

fn default_cta_debounce_ms() -> u64 {
    500
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

fn default_builder_version() -> String {
    "v9.1".to_string()
}

fn default_countdown_days() -> u32 {
    3
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when the
    /// directory has no config file
    pub fn load(dir: impl AsRef<Path>) -> EditorResult<Self> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json_str(json: &str) -> EditorResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EditorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// History and the version timeline must both keep at least one entry
    pub fn validate(&self) -> EditorResult<()> {
        if self.undo_depth == 0 {
            return Err(EditorError::Config("undoDepth must be at least 1".to_string()));
        }
        if self.version_limit == 0 {
            return Err(EditorError::Config(
                "versionLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cta_debounce_window(&self) -> Duration {
        Duration::from_millis(self.cta_debounce_ms)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::new(self.key_prefix.clone())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_depth: default_undo_depth(),
            version_limit: default_version_limit(),
            debounce_ms: default_debounce_ms(),
            cta_debounce_ms: default_cta_debounce_ms(),
            key_prefix: default_key_prefix(),
            builder_version: default_builder_version(),
            source_url: String::new(),
            countdown_days: default_countdown_days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "undoDepth": 50,
            "debounceMs": 250,
            "keyPrefix": "lp_",
            "sourceUrl": "https://example.com/offer"
        }"#;

        let config = EditorConfig::from_json_str(json).unwrap();
        assert_eq!(config.undo_depth, 50);
        assert_eq!(config.debounce_window(), Duration::from_millis(250));
        assert_eq!(config.storage_keys().field("x"), "lp_x");
        assert_eq!(config.source_url, "https://example.com/offer");
        // Unset keys keep their defaults
        assert_eq!(config.version_limit, 20);
        assert_eq!(config.cta_debounce_ms, 500);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.undo_depth, 30);
        assert_eq!(config.version_limit, 20);
        assert_eq!(config.debounce_ms, 600);
        assert_eq!(config.key_prefix, "ap_");
        assert_eq!(config.builder_version, "v9.1");
        assert_eq!(config.countdown_days, 3);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        assert!(matches!(
            EditorConfig::from_json_str(r#"{ "versionLimit": 0 }"#),
            Err(EditorError::Config(msg)) if msg.contains("versionLimit")
        ));
        assert!(matches!(
            EditorConfig::from_json_str(r#"{ "undoDepth": 0 }"#),
            Err(EditorError::Config(msg)) if msg.contains("undoDepth")
        ));
        assert!(EditorConfig::from_json_str(r#"{ "undoDepth": 1, "versionLimit": 1 }"#).is_ok());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();

        assert!(matches!(
            EditorConfig::load(dir.path()),
            Err(EditorError::Config(_))
        ));
    }
}
