//! Error types for the editor

use crate::persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Version not found: {0}")]
    VersionNotFound(u64),

    #[error("No example copy for field: {0}")]
    NoExample(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("History is empty")]
    HistoryEmpty,

    #[error("Import parse error: {0}")]
    ImportParse(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
