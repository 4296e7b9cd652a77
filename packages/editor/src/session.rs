//! # Document Session
//!
//! The single entry point for every change to a landing page document.
//!
//! A `DocumentSession` owns the field store, undo history, version timeline
//! and the debounced write table, plus the persistence gateway they drain
//! into. One session exists per editing session; callers hold it by `&mut`,
//! so mutations are serialized and no reader can observe a half-applied
//! import.
//!
//! ## Edit flow
//!
//! ```text
//! begin_edit ──▶ UndoStack::record_checkpoint (pre-edit snapshot)
//! apply_edit ──▶ FieldStore::set ──▶ Debouncer::schedule (per key)
//! tick       ──▶ due writes ──▶ PersistenceGateway::save
//! ```
//!
//! Deciding where an editing session begins (focus, first keystroke, ...)
//! is the caller's job. Every `begin_edit` records a checkpoint, even if
//! nothing changed since the last one.

use crate::clock::{Clock, SystemClock};
use crate::collect::{CollectedDocument, DocumentMeta};
use crate::config::EditorConfig;
use crate::countdown::{self, CountdownRemaining};
use crate::debounce::{Debouncer, PendingWrite};
use crate::document::{FieldStore, LengthStatus};
use crate::import::{parse_import, plan_import, ImportReport};
use crate::mutations::Mutation;
use crate::persistence::{PersistenceError, PersistenceGateway, StorageKeys};
use crate::schema::DocumentSchema;
use crate::snapshot::{DocumentSnapshot, Theme};
use crate::templates::find_template;
use crate::undo_stack::UndoStack;
use crate::versions::{Version, VersionTimeline};
use crate::{EditorError, EditorResult};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

/// A write the gateway refused
#[derive(Debug)]
pub struct PersistenceFailure {
    pub key: String,
    pub error: PersistenceError,
}

/// Result of draining pending writes
#[derive(Debug, Default)]
pub struct FlushReport {
    /// Keys written, in write order
    pub written: Vec<String>,
    pub failures: Vec<PersistenceFailure>,
}

impl FlushReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Written keys, or the first refused write as an error
    pub fn into_result(self) -> EditorResult<Vec<String>> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.error.into()),
            None => Ok(self.written),
        }
    }
}

pub struct DocumentSession<G: PersistenceGateway> {
    store: FieldStore,
    history: UndoStack,
    versions: VersionTimeline,
    pending: Debouncer,
    gateway: G,
    clock: Arc<dyn Clock>,
    keys: StorageKeys,
    config: EditorConfig,
}

impl<G: PersistenceGateway> DocumentSession<G> {
    /// Open a session, loading whatever the gateway already holds.
    ///
    /// Unreadable or malformed stored entries are logged and skipped; the
    /// schema defaults stand in for them. The loaded state is recorded as the
    /// first undo checkpoint.
    pub fn open(
        schema: DocumentSchema,
        gateway: G,
        clock: Arc<dyn Clock>,
        config: EditorConfig,
    ) -> Self {
        let keys = config.storage_keys();

        let mut session = Self {
            store: FieldStore::new(schema),
            history: UndoStack::with_max_levels(config.undo_depth.max(1)),
            versions: VersionTimeline::with_max_versions(config.version_limit),
            pending: Debouncer::new(),
            gateway,
            clock,
            keys,
            config,
        };
        session.load_persisted();
        session.checkpoint();
        session
    }

    /// Open with the wall clock and default configuration
    pub fn with_defaults(schema: DocumentSchema, gateway: G) -> Self {
        Self::open(schema, gateway, Arc::new(SystemClock), EditorConfig::default())
    }

    fn load_persisted(&mut self) {
        let field_ids: Vec<String> = self.store.schema().field_ids().map(str::to_string).collect();
        for id in field_ids {
            if let Some(value) = self.load_key(&self.keys.field(&id)) {
                // Schema ids always exist in the store
                let _ = self.store.set(&id, value);
            }
        }

        if let Some(url) = self.load_key(&self.keys.cta_url()) {
            let url = url.trim();
            if !url.is_empty() {
                self.store.set_cta_url(url);
            }
        }

        if let Some(label) = self.load_key(&self.keys.cta_label()) {
            if !label.trim().is_empty() {
                self.store.set_cta_label(label.trim());
            }
        }

        if let Some(theme) = self.load_key(&self.keys.theme()) {
            self.store.set_theme(Theme::parse_lenient(&theme));
        }

        if let Some(logo) = self.load_key(&self.keys.logo()) {
            if !logo.is_empty() {
                self.store.set_logo(logo);
            }
        }

        if let Some(video) = self.load_key(&self.keys.video()) {
            if !video.trim().is_empty() {
                self.store.set_video(video.trim());
            }
        }

        let section_ids: Vec<String> =
            self.store.schema().section_ids().map(str::to_string).collect();
        for id in section_ids {
            let Some(raw) = self.load_key(&self.keys.section(&id)) else {
                continue;
            };
            match raw.trim() {
                "true" => {
                    let _ = self.store.set_section_visible(&id, true);
                }
                "false" => {
                    let _ = self.store.set_section_visible(&id, false);
                }
                other => {
                    tracing::warn!(section = %id, value = %other, "Ignoring malformed section flag");
                }
            }
        }

        if let Some(json) = self.load_key(&self.keys.versions()) {
            match VersionTimeline::from_json(&json, self.config.version_limit) {
                Ok(timeline) => self.versions = timeline,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored version timeline is unreadable, starting empty");
                }
            }
        }

        tracing::debug!(
            fields = self.store.schema().fields.len(),
            versions = self.versions.len(),
            "Loaded persisted document state"
        );
    }

    fn load_key(&self, key: &str) -> Option<String> {
        match self.gateway.load(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to load persisted value");
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn get(&self, field_id: &str) -> EditorResult<&str> {
        self.store.get(field_id)
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn timeline(&self) -> &VersionTimeline {
        &self.versions
    }

    /// Saved versions, most recent first
    pub fn versions(&self) -> &[Version] {
        self.versions.list()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn into_gateway(self) -> G {
        self.gateway
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.store.snapshot()
    }

    pub fn length_status(&self, field_id: &str) -> EditorResult<LengthStatus> {
        self.store.length_status(field_id)
    }

    /// Full snapshot plus provenance, for export and submission
    pub fn collect(&self) -> CollectedDocument {
        CollectedDocument {
            snapshot: self.store.snapshot(),
            meta: DocumentMeta {
                time: self.clock.now(),
                url: self.config.source_url.clone(),
                version: self.config.builder_version.clone(),
            },
        }
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Record an undo checkpoint of the current state
    pub fn checkpoint(&mut self) {
        self.history.record_checkpoint(&self.store);
    }

    /// Mark the start of an editing session on a field
    pub fn begin_edit(&mut self, field_id: &str) -> EditorResult<()> {
        self.store.get(field_id)?;
        self.checkpoint();
        tracing::debug!(field_id, undo_levels = self.history.undo_levels(), "Edit session started");
        Ok(())
    }

    /// Set a field and schedule its debounced write
    pub fn apply_edit(&mut self, field_id: &str, value: impl Into<String>) -> EditorResult<()> {
        self.apply(Mutation::set_field(field_id, value))
    }

    /// Apply a mutation and schedule its persistence. Does not checkpoint.
    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<()> {
        mutation.apply(&mut self.store)?;
        self.schedule(&mutation);
        Ok(())
    }

    fn schedule(&mut self, mutation: &Mutation) {
        let (key, value) = mutation.persisted_entry(&self.keys);
        let window = self.window_for(mutation);
        let now = self.clock.now_millis();

        let replaced = self.pending.schedule(key.as_str(), value, now, window);
        tracing::debug!(key = %key, replaced, "Scheduled write");
    }

    fn window_for(&self, mutation: &Mutation) -> Duration {
        match mutation {
            Mutation::SetField { .. } => self.config.debounce_window(),
            Mutation::SetCtaUrl { .. } => self.config.cta_debounce_window(),
            _ => Duration::ZERO,
        }
    }

    /// Point the CTA buttons at `url`. Blank URLs are ignored and reported
    /// as `false`.
    pub fn set_cta_url(&mut self, url: &str) -> EditorResult<bool> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(false);
        }
        self.apply(Mutation::SetCtaUrl {
            url: url.to_string(),
        })?;
        Ok(true)
    }

    pub fn set_cta_label(&mut self, label: &str) -> EditorResult<()> {
        self.apply(Mutation::SetCtaLabel {
            label: label.trim().to_string(),
        })
    }

    pub fn set_theme(&mut self, theme: Theme) -> EditorResult<()> {
        self.apply(Mutation::SetTheme { theme })
    }

    pub fn toggle_theme(&mut self) -> EditorResult<Theme> {
        let next = self.store.settings().theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn set_section_visible(&mut self, section_id: &str, visible: bool) -> EditorResult<()> {
        self.apply(Mutation::SetSectionVisible {
            section_id: section_id.to_string(),
            visible,
        })
    }

    pub fn set_logo(&mut self, uri: &str) -> EditorResult<()> {
        self.apply(Mutation::SetLogo {
            uri: uri.trim().to_string(),
        })
    }

    /// Embed a different video. Blank URLs are ignored and reported as
    /// `false`.
    pub fn set_video(&mut self, url: &str) -> EditorResult<bool> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(false);
        }
        self.apply(Mutation::SetVideo {
            url: url.to_string(),
        })?;
        Ok(true)
    }

    /// Replace a field with its example copy, as one undoable edit
    pub fn apply_example(&mut self, field_id: &str) -> EditorResult<()> {
        let example = self
            .store
            .schema()
            .field(field_id)
            .ok_or_else(|| EditorError::UnknownField(field_id.to_string()))?
            .hint
            .clone()
            .ok_or_else(|| EditorError::NoExample(field_id.to_string()))?;

        self.checkpoint();
        self.apply_edit(field_id, example)?;
        tracing::debug!(field_id, "Example copy loaded");
        Ok(())
    }

    /// Flip a section's visibility, returning the new state
    pub fn toggle_section(&mut self, section_id: &str) -> EditorResult<bool> {
        let visible = !self.store.is_section_visible(section_id)?;
        self.set_section_visible(section_id, visible)?;
        Ok(visible)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> EditorResult<()> {
        let before = self.store.snapshot();
        self.history.undo(&mut self.store)?;
        self.schedule_changes(&before);
        tracing::debug!(undo_levels = self.history.undo_levels(), "Undone");
        Ok(())
    }

    pub fn redo(&mut self) -> EditorResult<()> {
        let before = self.store.snapshot();
        self.history.redo(&mut self.store)?;
        self.schedule_changes(&before);
        tracing::debug!(redo_levels = self.history.redo_levels(), "Redone");
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Schedule writes for everything that differs from `before`
    fn schedule_changes(&mut self, before: &DocumentSnapshot) {
        let after = self.store.snapshot();

        for id in before.changed_fields(&after) {
            if let Some(value) = after.field(id) {
                self.schedule(&Mutation::set_field(id, value));
            }
        }

        let (old, new) = (before.settings(), after.settings());
        if old.cta.url != new.cta.url {
            self.schedule(&Mutation::SetCtaUrl {
                url: new.cta.url.clone(),
            });
        }
        if old.cta.label != new.cta.label {
            self.schedule(&Mutation::SetCtaLabel {
                label: new.cta.label.clone(),
            });
        }
        if old.theme != new.theme {
            self.schedule(&Mutation::SetTheme { theme: new.theme });
        }
        if old.logo != new.logo {
            self.schedule(&Mutation::SetLogo {
                uri: new.logo.clone(),
            });
        }
        if old.video != new.video {
            self.schedule(&Mutation::SetVideo {
                url: new.video.clone(),
            });
        }
        for (id, visible) in &new.sections {
            if old.sections.get(id) != Some(visible) {
                self.schedule(&Mutation::SetSectionVisible {
                    section_id: id.clone(),
                    visible: *visible,
                });
            }
        }
    }

    // ------------------------------------------------------------------
    // Versions
    // ------------------------------------------------------------------

    /// Save the current document as a named version. History is untouched.
    pub fn save_version(&mut self, label: Option<&str>) -> Version {
        let now = self.clock.now();
        let version = self.versions.save(&self.store, label, now);
        tracing::info!(id = version.id, label = %version.label, "Version saved");

        self.schedule_timeline();
        version
    }

    /// Restore a saved version; the restore itself can be undone
    pub fn restore_version(&mut self, id: u64) -> EditorResult<()> {
        let before = self.store.snapshot();
        let version = self.versions.restore(id, &mut self.history, &mut self.store)?;
        tracing::info!(id, label = %version.label, "Version restored");

        self.schedule_changes(&before);
        Ok(())
    }

    fn schedule_timeline(&mut self) {
        match self.versions.to_json() {
            Ok(json) => {
                let now = self.clock.now_millis();
                self.pending
                    .schedule(self.keys.versions(), json, now, Duration::ZERO);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize version timeline");
            }
        }
    }

    // ------------------------------------------------------------------
    // Import
    // ------------------------------------------------------------------

    /// Apply a partial document as one undoable step.
    ///
    /// Keys the schema doesn't know are skipped, not rejected.
    pub fn import_document(&mut self, data: &Map<String, Value>) -> EditorResult<ImportReport> {
        let plan = plan_import(data, self.store.schema());
        self.apply_batch(plan.mutations, plan.skipped)
    }

    /// Parse and import JSON text. Malformed input changes nothing.
    pub fn import_json(&mut self, json: &str) -> EditorResult<ImportReport> {
        let data = parse_import(json)?;
        self.import_document(&data)
    }

    /// Load one of the starter copy presets, as an import
    pub fn apply_template(&mut self, name: &str) -> EditorResult<ImportReport> {
        let template =
            find_template(name).ok_or_else(|| EditorError::UnknownTemplate(name.to_string()))?;
        let (mutations, skipped) = template.plan(self.store.schema());
        self.apply_batch(mutations, skipped)
    }

    fn apply_batch(
        &mut self,
        mutations: Vec<Mutation>,
        skipped: Vec<String>,
    ) -> EditorResult<ImportReport> {
        self.checkpoint();

        let mut applied = Vec::with_capacity(mutations.len());
        for mutation in mutations {
            let target = mutation.target().to_string();
            self.apply(mutation)?;
            applied.push(target);
        }

        tracing::info!(
            applied = applied.len(),
            skipped = skipped.len(),
            "Imported document"
        );
        Ok(ImportReport { applied, skipped })
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write every pending value whose debounce window has elapsed
    pub fn tick(&mut self) -> FlushReport {
        let due = self.pending.take_due(self.clock.now_millis());
        self.write(due)
    }

    /// Write every pending value now
    pub fn flush(&mut self) -> FlushReport {
        let all = self.pending.take_all();
        self.write(all)
    }

    pub fn pending_writes(&self) -> usize {
        self.pending.pending_count()
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.is_pending(key)
    }

    /// Epoch millis of the earliest pending write
    pub fn next_write_due(&self) -> Option<i64> {
        self.pending.next_deadline()
    }

    fn write(&mut self, writes: Vec<PendingWrite>) -> FlushReport {
        let mut report = FlushReport::default();

        for write in writes {
            match self.gateway.save(&write.key, &write.value) {
                Ok(()) => report.written.push(write.key),
                Err(error) => {
                    tracing::warn!(key = %write.key, error = %error, "Failed to persist value");
                    report.failures.push(PersistenceFailure {
                        key: write.key,
                        error,
                    });
                }
            }
        }

        report
    }

    // ------------------------------------------------------------------
    // Countdown
    // ------------------------------------------------------------------

    /// Stored countdown deadline, starting a fresh one if none is stored
    pub fn countdown_deadline(&mut self) -> i64 {
        let key = self.keys.countdown_deadline();

        if let Some(deadline) = self
            .load_key(&key)
            .as_deref()
            .and_then(countdown::parse_deadline)
        {
            return deadline;
        }

        self.start_countdown()
    }

    /// Restart the countdown from now
    pub fn reset_countdown(&mut self) -> i64 {
        self.start_countdown()
    }

    pub fn countdown_remaining(&mut self) -> CountdownRemaining {
        let deadline = self.countdown_deadline();
        CountdownRemaining::until(deadline, self.clock.now_millis())
    }

    fn start_countdown(&mut self) -> i64 {
        let deadline = countdown::deadline_from(self.clock.now(), self.config.countdown_days);
        let key = self.keys.countdown_deadline();

        if let Err(e) = self.gateway.save(&key, &deadline.to_string()) {
            tracing::warn!(key = %key, error = %e, "Failed to persist countdown deadline");
        }
        deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::persistence::MemoryStore;
    use crate::schema::{FieldSpec, SectionSpec};

    fn schema() -> DocumentSchema {
        DocumentSchema::new()
            .with_field(
                FieldSpec::new("headline")
                    .default_value("A")
                    .hint("Ship landing pages faster"),
            )
            .with_field(FieldSpec::new("body"))
            .with_section(SectionSpec::new("hero", "Hero"))
    }

    fn session() -> (DocumentSession<MemoryStore>, ManualClock) {
        session_with(MemoryStore::new())
    }

    fn session_with(store: MemoryStore) -> (DocumentSession<MemoryStore>, ManualClock) {
        let clock = ManualClock::at_millis(1_700_000_000_000);
        let session = DocumentSession::open(
            schema(),
            store,
            Arc::new(clock.clone()),
            EditorConfig::default(),
        );
        (session, clock)
    }

    #[test]
    fn test_session_creation() {
        let (session, _) = session();

        assert_eq!(session.get("headline").unwrap(), "A");
        assert_eq!(session.history().undo_levels(), 1);
        assert!(!session.can_redo());
        assert_eq!(session.pending_writes(), 0);
        assert!(session.versions().is_empty());
    }

    #[test]
    fn test_open_loads_persisted_state() {
        let store = MemoryStore::new()
            .with_entry("ap_headline", "Stored")
            .with_entry("ap_cta_url", " https://example.com ")
            .with_entry("ap_mode", "light")
            .with_entry("ap_section_hero", "false")
            .with_entry("ap_unrelated", "ignored");
        let (session, _) = session_with(store);

        assert_eq!(session.get("headline").unwrap(), "Stored");
        let settings = session.store().settings();
        assert_eq!(settings.cta.url, "https://example.com");
        assert_eq!(settings.theme, Theme::Light);
        assert!(!session.store().is_section_visible("hero").unwrap());
    }

    #[test]
    fn test_open_survives_bad_persisted_data() {
        let store = MemoryStore::new()
            .with_entry("ap_versions", "{ broken")
            .with_entry("ap_section_hero", "maybe");
        let (session, _) = session_with(store);

        assert!(session.versions().is_empty());
        assert!(session.store().is_section_visible("hero").unwrap());
    }

    #[test]
    fn test_open_with_unreadable_gateway_uses_defaults() {
        let mut store = MemoryStore::new().with_entry("ap_headline", "Stored");
        store.set_fail_reads(true);
        let (session, _) = session_with(store);

        assert_eq!(session.get("headline").unwrap(), "A");
    }

    #[test]
    fn test_loaded_state_is_first_checkpoint() {
        let store = MemoryStore::new().with_entry("ap_headline", "Stored");
        let (mut session, _) = session_with(store);

        session.apply_edit("headline", "Typed without focus").unwrap();
        session.undo().unwrap();
        assert_eq!(session.get("headline").unwrap(), "Stored");
    }

    #[test]
    fn test_open_loads_media() {
        let store = MemoryStore::new()
            .with_entry("ap_logo", "data:image/png;base64,AAAA")
            .with_entry("ap_vsl", " https://example.com/embed/9 ");
        let (session, _) = session_with(store);

        let settings = session.store().settings();
        assert_eq!(settings.logo, "data:image/png;base64,AAAA");
        assert_eq!(settings.video, "https://example.com/embed/9");
    }

    #[test]
    fn test_media_setters_schedule_writes() {
        let (mut session, _) = session();

        assert!(!session.set_video("  ").unwrap());
        assert!(session.set_video("https://example.com/embed/3").unwrap());
        session.set_logo("data:image/png;base64,BBBB").unwrap();
        session.tick();

        assert_eq!(session.gateway().get("ap_vsl"), Some("https://example.com/embed/3"));
        assert_eq!(session.gateway().get("ap_logo"), Some("data:image/png;base64,BBBB"));
    }

    #[test]
    fn test_apply_example_is_undoable() {
        let (mut session, clock) = session();

        session.apply_example("headline").unwrap();
        assert_eq!(session.get("headline").unwrap(), "Ship landing pages faster");

        clock.advance(Duration::from_millis(600));
        session.tick();
        assert_eq!(
            session.gateway().get("ap_headline"),
            Some("Ship landing pages faster")
        );

        session.undo().unwrap();
        assert_eq!(session.get("headline").unwrap(), "A");
    }

    #[test]
    fn test_apply_example_without_copy() {
        let (mut session, _) = session();

        assert!(matches!(
            session.apply_example("body"),
            Err(EditorError::NoExample(_))
        ));
        assert!(matches!(
            session.apply_example("nope"),
            Err(EditorError::UnknownField(_))
        ));
        assert_eq!(session.history().undo_levels(), 1);
    }

    #[test]
    fn test_zero_limits_do_not_panic() {
        let config = EditorConfig {
            undo_depth: 0,
            version_limit: 0,
            ..EditorConfig::default()
        };
        let mut session = DocumentSession::open(
            schema(),
            MemoryStore::new(),
            Arc::new(ManualClock::at_millis(1_000)),
            config,
        );

        session.save_version(Some("first"));
        let latest = session.save_version(Some("second"));
        assert_eq!(session.versions(), &[latest]);

        for _ in 0..3 {
            session.begin_edit("headline").unwrap();
        }
        assert_eq!(session.history().undo_levels(), 1);
    }

    #[test]
    fn test_flush_report_into_result() {
        let (mut session, _) = session();
        session.apply_edit("headline", "B").unwrap();
        assert_eq!(
            session.flush().into_result().unwrap(),
            vec!["ap_headline".to_string()]
        );

        session.gateway_mut().set_fail_writes(true);
        session.apply_edit("headline", "C").unwrap();
        assert!(matches!(
            session.flush().into_result(),
            Err(EditorError::Persistence(_))
        ));
    }

    #[test]
    fn test_begin_edit_rejects_unknown_field() {
        let (mut session, _) = session();

        assert!(matches!(
            session.begin_edit("nope"),
            Err(EditorError::UnknownField(_))
        ));
        assert_eq!(session.history().undo_levels(), 1);
    }

    #[test]
    fn test_edit_undo_redo_scenario() {
        let (mut session, _) = session();

        session.begin_edit("headline").unwrap();
        session.apply_edit("headline", "B").unwrap();

        session.undo().unwrap();
        assert_eq!(session.get("headline").unwrap(), "A");

        session.redo().unwrap();
        assert_eq!(session.get("headline").unwrap(), "B");
    }

    #[test]
    fn test_apply_edit_is_debounced() {
        let (mut session, clock) = session();

        session.apply_edit("headline", "B").unwrap();
        assert!(session.is_pending("ap_headline"));
        assert!(session.tick().written.is_empty());

        clock.advance(Duration::from_millis(600));
        let report = session.tick();
        assert_eq!(report.written, vec!["ap_headline".to_string()]);
        assert_eq!(session.gateway().get("ap_headline"), Some("B"));
    }

    #[test]
    fn test_settings_are_written_on_next_tick() {
        let (mut session, _) = session();

        session.set_theme(Theme::Light).unwrap();
        assert!(!session.toggle_section("hero").unwrap());

        let report = session.tick();
        assert!(report.is_clean());
        assert_eq!(session.gateway().get("ap_mode"), Some("light"));
        assert_eq!(session.gateway().get("ap_section_hero"), Some("false"));
    }

    #[test]
    fn test_blank_cta_url_is_ignored() {
        let (mut session, clock) = session();

        assert!(!session.set_cta_url("   ").unwrap());
        assert_eq!(session.pending_writes(), 0);

        assert!(session.set_cta_url(" https://example.com/go ").unwrap());
        clock.advance(Duration::from_millis(500));
        session.tick();
        assert_eq!(session.gateway().get("ap_cta_url"), Some("https://example.com/go"));
    }

    #[test]
    fn test_undo_schedules_reverted_values() {
        let (mut session, clock) = session();

        session.begin_edit("headline").unwrap();
        session.apply_edit("headline", "B").unwrap();
        clock.advance(Duration::from_millis(600));
        session.tick();

        session.undo().unwrap();
        clock.advance(Duration::from_millis(600));
        session.tick();

        assert_eq!(session.gateway().writes_for("ap_headline"), vec!["B", "A"]);
    }

    #[test]
    fn test_persistence_failure_keeps_memory_state() {
        let (mut session, _) = session();
        session.gateway_mut().set_fail_writes(true);

        session.apply_edit("headline", "B").unwrap();
        let report = session.flush();

        assert!(!report.is_clean());
        assert_eq!(report.failures[0].key, "ap_headline");
        assert_eq!(session.get("headline").unwrap(), "B");
    }

    #[test]
    fn test_save_version_persists_timeline() {
        let (mut session, _) = session();

        let version = session.save_version(Some("Manual Save"));
        assert_eq!(version.label, "Manual Save");
        session.tick();

        let stored = session.gateway().get("ap_versions").unwrap();
        let timeline = VersionTimeline::from_json(stored, 20).unwrap();
        assert_eq!(timeline.list(), session.versions());
    }

    #[test]
    fn test_restore_missing_version() {
        let (mut session, _) = session();

        assert!(matches!(
            session.restore_version(7),
            Err(EditorError::VersionNotFound(7))
        ));
        assert_eq!(session.history().undo_levels(), 1);
    }

    #[test]
    fn test_unknown_template() {
        let (mut session, _) = session();

        assert!(matches!(
            session.apply_template("newsletter"),
            Err(EditorError::UnknownTemplate(_))
        ));
        assert_eq!(session.history().undo_levels(), 1);
    }

    #[test]
    fn test_countdown_is_created_once() {
        let (mut session, clock) = session();

        let deadline = session.countdown_deadline();
        assert_eq!(
            deadline - clock.now_millis(),
            3 * 24 * 60 * 60 * 1_000
        );

        clock.advance(Duration::from_secs(60));
        assert_eq!(session.countdown_deadline(), deadline);

        let remaining = session.countdown_remaining();
        assert_eq!(remaining.days, 2);
        assert_eq!(remaining.hours, 23);
        assert_eq!(remaining.minutes, 59);

        let reset = session.reset_countdown();
        assert!(reset > deadline);
    }
}
