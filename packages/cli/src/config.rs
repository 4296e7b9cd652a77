use anyhow::{Context as _, Result};
use pagesmith_editor::{DocumentSchema, DocumentSession, EditorConfig, JsonFileStore};
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_NAME: &str = "pagesmith.store.json";

/// Where a command reads its configuration and keeps its document
#[derive(Debug, Clone)]
pub struct Context {
    pub config_dir: PathBuf,
    pub store_path: PathBuf,
}

impl Context {
    pub fn new(cwd: &Path, config_dir: Option<PathBuf>, store: Option<PathBuf>) -> Self {
        let config_dir = config_dir.unwrap_or_else(|| cwd.to_path_buf());
        let store_path = store.unwrap_or_else(|| cwd.join(DEFAULT_STORE_NAME));

        Self {
            config_dir,
            store_path,
        }
    }

    pub fn load_config(&self) -> Result<EditorConfig> {
        EditorConfig::load(&self.config_dir).with_context(|| {
            format!("Failed to load config from {}", self.config_dir.display())
        })
    }

    /// Open a session over the landing page stored at `store_path`
    pub fn open_session(&self) -> Result<DocumentSession<JsonFileStore>> {
        let config = self.load_config()?;
        let store = JsonFileStore::open(&self.store_path)
            .with_context(|| format!("Failed to open store {}", self.store_path.display()))?;

        tracing::debug!(store = %self.store_path.display(), "Opened document store");

        Ok(DocumentSession::open(
            DocumentSchema::landing_page(),
            store,
            std::sync::Arc::new(pagesmith_editor::SystemClock),
            config,
        ))
    }
}

/// Write every pending change, failing if any write was refused
pub fn finish(session: &mut DocumentSession<JsonFileStore>) -> Result<Vec<String>> {
    let report = session.flush();
    let failed = report.failures.len();

    report
        .into_result()
        .with_context(|| format!("{} write(s) to the document store failed", failed))
}
