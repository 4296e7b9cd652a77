//! # Pagesmith Editor
//!
//! Document state and history engine for the Pagesmith landing page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: inputs, toolbar, timers               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ DocumentSession: the mutation coordinator   │
//! │  - FieldStore (current values + settings)   │
//! │  - UndoStack (bounded checkpoints)          │
//! │  - VersionTimeline (named snapshots)        │
//! │  - Debouncer (per-key pending writes)       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ PersistenceGateway: string key/value store  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One writer**: every change goes through `DocumentSession`
//! 2. **Memory first**: the in-memory document is authoritative, the store
//!    is a write-behind copy
//! 3. **Snapshots are values**: undo checkpoints and versions never alias
//!    live state
//! 4. **Virtual time**: debouncing reads an injected `Clock`, and the host
//!    drives writes with `tick`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagesmith_editor::{DocumentSchema, DocumentSession, MemoryStore};
//!
//! let mut session = DocumentSession::with_defaults(
//!     DocumentSchema::landing_page(),
//!     MemoryStore::new(),
//! );
//!
//! session.begin_edit("hero_headline")?;
//! session.apply_edit("hero_headline", "Ship faster")?;
//! session.undo()?;
//!
//! // Called from the host's timer
//! let report = session.tick();
//! ```

mod clock;
mod collect;
mod config;
mod countdown;
mod debounce;
mod document;
mod errors;
mod import;
mod mutations;
mod persistence;
mod schema;
mod session;
mod snapshot;
mod templates;
mod undo_stack;
mod versions;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collect::{CollectedDocument, DocumentMeta};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use countdown::{deadline_from, parse_deadline, CountdownRemaining};
pub use debounce::{Debouncer, PendingWrite};
pub use document::{FieldStore, LengthStatus};
pub use errors::{EditorError, EditorResult};
pub use import::{parse_import, plan_import, ImportPlan, ImportReport, RESERVED_KEYS};
pub use mutations::Mutation;
pub use persistence::{
    JsonFileStore, MemoryStore, PersistenceError, PersistenceGateway, StorageKeys,
    DEFAULT_KEY_PREFIX,
};
pub use schema::{DocumentSchema, FieldSpec, SectionSpec};
pub use session::{DocumentSession, FlushReport, PersistenceFailure};
pub use snapshot::{
    Cta, DocumentSnapshot, Settings, Theme, DEFAULT_CTA_LABEL, DEFAULT_VIDEO_URL,
};
pub use templates::{find_template, template_names, Template, TEMPLATES};
pub use undo_stack::{UndoStack, DEFAULT_UNDO_LEVELS};
pub use versions::{Version, VersionTimeline, DEFAULT_MAX_VERSIONS};
