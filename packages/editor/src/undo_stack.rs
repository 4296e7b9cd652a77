//! # Undo/Redo Stack
//!
//! Snapshot-based history for the field store.
//!
//! ## Design
//!
//! - A checkpoint is a full [`DocumentSnapshot`] taken at the *start* of an
//!   editing session, so one undo reverts a whole session rather than a
//!   single keystroke
//! - Undo stores the current state on the redo stack, then restores the
//!   most recent checkpoint
//! - Redo is the mirror image
//! - New checkpoints clear the redo stack
//! - The undo stack is bounded; the oldest checkpoint is dropped first
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let mut store = FieldStore::new(DocumentSchema::landing_page());
//!
//! stack.record_checkpoint(&store);
//! store.set("hero_headline", "New headline")?;
//!
//! stack.undo(&mut store)?;
//! stack.redo(&mut store)?;
//! ```

use crate::document::FieldStore;
use crate::snapshot::DocumentSnapshot;
use crate::{EditorError, EditorResult};

pub const DEFAULT_UNDO_LEVELS: usize = 30;

/// Undo/redo stack of document snapshots
#[derive(Debug, Clone)]
pub struct UndoStack {
    /// Checkpoints (most recent last)
    undo_stack: Vec<DocumentSnapshot>,

    /// States left behind by undo (most recent last)
    redo_stack: Vec<DocumentSnapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (30)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_UNDO_LEVELS)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the store's current state as an undo checkpoint
    pub fn record_checkpoint(&mut self, store: &FieldStore) {
        self.push_checkpoint(store.snapshot());
    }

    /// Push a snapshot to the undo stack
    fn push_checkpoint(&mut self, snapshot: DocumentSnapshot) {
        self.undo_stack.push(snapshot);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Revert the store to the most recent checkpoint.
    ///
    /// Fails with [`EditorError::HistoryEmpty`] and leaves the store
    /// untouched when there is nothing to undo.
    pub fn undo(&mut self, store: &mut FieldStore) -> EditorResult<()> {
        let previous = self.undo_stack.pop().ok_or(EditorError::HistoryEmpty)?;

        // undo + redo never exceeds max_levels, so redo needs no trimming
        self.redo_stack.push(store.snapshot());
        store.restore(&previous);

        Ok(())
    }

    /// Reapply the most recently undone state
    pub fn redo(&mut self, store: &mut FieldStore) -> EditorResult<()> {
        let next = self.redo_stack.pop().ok_or(EditorError::HistoryEmpty)?;

        self.undo_stack.push(store.snapshot());
        store.restore(&next);

        Ok(())
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Checkpoint the next undo would restore
    pub fn peek_undo(&self) -> Option<&DocumentSnapshot> {
        self.undo_stack.last()
    }

    /// Oldest checkpoint still retained
    pub fn oldest_undo(&self) -> Option<&DocumentSnapshot> {
        self.undo_stack.first()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DocumentSchema, FieldSpec};

    fn store() -> FieldStore {
        FieldStore::new(
            DocumentSchema::new().with_field(FieldSpec::new("headline").default_value("A")),
        )
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert_eq!(stack.max_levels(), 30);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_checkpoint_and_undo_text_edit() {
        let mut store = store();
        let mut stack = UndoStack::new();

        stack.record_checkpoint(&store);
        store.set("headline", "B").unwrap();

        assert_eq!(stack.undo_levels(), 1);
        assert!(stack.can_undo());

        // Undo
        stack.undo(&mut store).unwrap();
        assert_eq!(store.get("headline").unwrap(), "A");
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 1);

        // Redo
        stack.redo(&mut store).unwrap();
        assert_eq!(store.get("headline").unwrap(), "B");
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_empty_stacks_report_history_empty() {
        let mut store = store();
        let mut stack = UndoStack::new();

        assert!(matches!(stack.undo(&mut store), Err(EditorError::HistoryEmpty)));
        assert!(matches!(stack.redo(&mut store), Err(EditorError::HistoryEmpty)));
        assert_eq!(store.get("headline").unwrap(), "A");
    }

    #[test]
    fn test_new_checkpoint_clears_redo() {
        let mut store = store();
        let mut stack = UndoStack::new();

        stack.record_checkpoint(&store);
        store.set("headline", "B").unwrap();
        stack.undo(&mut store).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        stack.record_checkpoint(&store);
        assert_eq!(stack.redo_levels(), 0);
        assert!(matches!(stack.redo(&mut store), Err(EditorError::HistoryEmpty)));
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut store = store();
        let mut stack = UndoStack::with_max_levels(2);

        for i in 0..3 {
            store.set("headline", format!("Text {}", i)).unwrap();
            stack.record_checkpoint(&store);
        }

        // Should only keep 2 (max levels), oldest dropped
        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.oldest_undo().unwrap().field("headline"), Some("Text 1"));
        assert_eq!(stack.peek_undo().unwrap().field("headline"), Some("Text 2"));
    }

    #[test]
    fn test_unlimited_levels() {
        let store = store();
        let mut stack = UndoStack::with_max_levels(0);

        for _ in 0..100 {
            stack.record_checkpoint(&store);
        }

        assert_eq!(stack.undo_levels(), 100);
    }
}
