//! Where failed sub-steps of an edit get reported.
//!
//! Records never propagate a [`MutationError`]. They hand an
//! [`EditDiagnostic`] to whatever [`DiagnosticSink`] the caller injected and
//! carry on.

use std::collections::VecDeque;
use std::fmt;

use bevy::prelude::*;

use crate::constants::MAX_RECENT_DIAGNOSTICS;
use crate::document::MutationError;

use super::data_types::Direction;

/// A rejected sub-step of an edit record
#[derive(Clone, Debug, PartialEq)]
pub struct EditDiagnostic {
    /// Label of the record that was running
    pub label: String,
    pub direction: Direction,
    /// Zero-based index of the failing sub-step within the record
    pub step: usize,
    pub error: MutationError,
}

impl fmt::Display for EditDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' stopped at step {}: {}",
            self.direction, self.label, self.step, self.error
        )
    }
}

/// Receiver of edit diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: EditDiagnostic);
}

/// Sink that only logs
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: EditDiagnostic) {
        warn!("{}", diagnostic);
    }
}

impl DiagnosticSink for Vec<EditDiagnostic> {
    fn report(&mut self, diagnostic: EditDiagnostic) {
        self.push(diagnostic);
    }
}

/// Resource keeping the latest diagnostics for the UI, oldest dropped first
#[derive(Resource, Debug)]
pub struct RecentDiagnostics {
    entries: VecDeque<EditDiagnostic>,
    limit: usize,
}

impl Default for RecentDiagnostics {
    fn default() -> Self {
        Self::with_limit(MAX_RECENT_DIAGNOSTICS)
    }
}

impl RecentDiagnostics {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn latest(&self) -> Option<&EditDiagnostic> {
        self.entries.back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &EditDiagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl DiagnosticSink for RecentDiagnostics {
    fn report(&mut self, diagnostic: EditDiagnostic) {
        warn!("{}", diagnostic);
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(step: usize) -> EditDiagnostic {
        EditDiagnostic {
            label: "Remove Features".to_string(),
            direction: Direction::Revert,
            step,
            error: MutationError::not_found("shape #3 in layer 0"),
        }
    }

    #[test]
    fn test_diagnostic_display() {
        assert_eq!(
            diagnostic(1).to_string(),
            "revert 'Remove Features' stopped at step 1: target not found: shape #3 in layer 0"
        );
    }

    #[test]
    fn test_recent_diagnostics_drops_oldest() {
        let mut recent = RecentDiagnostics::with_limit(2);
        recent.report(diagnostic(0));
        recent.report(diagnostic(1));
        recent.report(diagnostic(2));

        assert_eq!(recent.len(), 2);
        assert_eq!(recent.iter().next().map(|d| d.step), Some(1));
        assert_eq!(recent.latest().map(|d| d.step), Some(2));
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<EditDiagnostic> = Vec::new();
        sink.report(diagnostic(0));
        assert_eq!(sink, vec![diagnostic(0)]);
    }
}
