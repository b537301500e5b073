//! The edit log: records plus an undo/redo cursor.

use bevy::prelude::*;
use thiserror::Error;

use crate::constants::DEFAULT_HISTORY_CAPACITY;
use crate::document::DocumentMutator;

use super::data_types::EditOutcome;
use super::diagnostics::DiagnosticSink;
use super::records::EditRecord;

/// Why an undo or redo did nothing
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Resource holding the ordered edit history.
///
/// Records at `0..cursor` have been applied and can be undone, records at
/// `cursor..len` were undone and can be redone. Pushing a new record drops
/// the redo tail.
#[derive(Resource, Debug)]
pub struct EditLog {
    records: Vec<EditRecord>,
    cursor: usize,
    /// Maximum number of records kept; oldest are evicted first
    capacity: Option<usize>,
    /// Cursor position that matches the document on disk
    saved: Option<usize>,
}

impl Default for EditLog {
    fn default() -> Self {
        Self::with_capacity(Some(DEFAULT_HISTORY_CAPACITY))
    }
}

impl EditLog {
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            records: Vec::new(),
            cursor: 0,
            capacity,
            saved: Some(0),
        }
    }

    /// Push a record whose mutation has already been performed
    pub fn push(&mut self, record: EditRecord) {
        if self.cursor < self.records.len() {
            debug!(
                "Discarding {} redoable edit(s)",
                self.records.len() - self.cursor
            );
            self.records.truncate(self.cursor);
            if self.saved.is_some_and(|saved| saved > self.cursor) {
                self.saved = None;
            }
        }

        debug!("Recorded '{}'", record.label());
        self.records.push(record);
        self.cursor = self.records.len();
        self.enforce_capacity();
    }

    /// Apply a freshly captured record to the document, then push it
    pub fn perform<D: DocumentMutator + ?Sized>(
        &mut self,
        record: EditRecord,
        document: &mut D,
        sink: &mut dyn DiagnosticSink,
    ) -> EditOutcome {
        let outcome = record.apply(document, sink);
        self.push(record);
        outcome
    }

    /// Revert the most recent applied record. The cursor moves back even if
    /// the document rejected part of the revert.
    pub fn undo<D: DocumentMutator + ?Sized>(
        &mut self,
        document: &mut D,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<EditOutcome, HistoryError> {
        if self.cursor == 0 {
            return Err(HistoryError::NothingToUndo);
        }
        let outcome = self.records[self.cursor - 1].revert(document, sink);
        self.cursor -= 1;
        debug!("Undo -> cursor {}/{}", self.cursor, self.records.len());
        Ok(outcome)
    }

    /// Re-apply the next undone record. The cursor moves forward even if the
    /// document rejected part of the apply.
    pub fn redo<D: DocumentMutator + ?Sized>(
        &mut self,
        document: &mut D,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<EditOutcome, HistoryError> {
        if self.cursor == self.records.len() {
            return Err(HistoryError::NothingToRedo);
        }
        let outcome = self.records[self.cursor].apply(document, sink);
        self.cursor += 1;
        debug!("Redo -> cursor {}/{}", self.cursor, self.records.len());
        Ok(outcome)
    }

    /// Forget all history, e.g. after the document was reloaded and its
    /// identifiers no longer mean anything
    pub fn clear(&mut self) {
        self.records.clear();
        self.cursor = 0;
        self.saved = Some(0);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.records.len()
    }

    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    pub fn redo_count(&self) -> usize {
        self.records.len() - self.cursor
    }

    /// Record that would be reverted by the next undo
    pub fn next_undo(&self) -> Option<&EditRecord> {
        self.cursor.checked_sub(1).and_then(|i| self.records.get(i))
    }

    /// Record that would be applied by the next redo
    pub fn next_redo(&self) -> Option<&EditRecord> {
        self.records.get(self.cursor)
    }

    /// Labels of undoable records, most recent first
    pub fn undo_labels(&self) -> impl Iterator<Item = String> + '_ {
        self.records[..self.cursor].iter().rev().map(EditRecord::label)
    }

    /// Labels of redoable records, next redo first
    pub fn redo_labels(&self) -> impl Iterator<Item = String> + '_ {
        self.records[self.cursor..].iter().map(EditRecord::label)
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Change the bound, trimming right away if the log is already over it
    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
        self.enforce_capacity();
    }

    /// Remember the current position as matching the saved document
    pub fn mark_saved(&mut self) {
        self.saved = Some(self.cursor);
    }

    /// True while the document matches what was last saved
    pub fn is_saved(&self) -> bool {
        self.saved == Some(self.cursor)
    }

    fn enforce_capacity(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        if self.records.len() <= capacity {
            return;
        }

        // Only applied records leave from the front. A redo record depends on
        // every record before it, so if that is not enough the tail goes.
        let evicted = (self.records.len() - capacity).min(self.cursor);
        self.records.drain(..evicted);
        self.cursor -= evicted;
        self.saved = match self.saved {
            Some(saved) if saved >= evicted => Some(saved - evicted),
            _ => None,
        };

        if self.records.len() > capacity {
            self.records.truncate(capacity);
            if self.saved.is_some_and(|saved| saved > capacity) {
                self.saved = None;
            }
        }
        debug!("Trimmed history to {} edit(s)", self.records.len());
    }
}
