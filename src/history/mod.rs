//! Undo/Redo history for map edits.
//!
//! Every reversible mutation of the map document is described by an
//! [`EditRecord`] that captures the state needed to undo it. Records are kept
//! in an [`EditLog`] with a cursor; undo reverts the record before the
//! cursor, redo re-applies the one after it.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last edit
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone edit
//!
//! ## Supported Operations
//!
//! - View extent changes
//! - Feature insertion, deletion, value replacement, split and merge
//! - Hole add / remove / fill
//! - Vertex add / move / delete on features and graphics
//! - Screen-space move and resize
//! - Graphic add / delete
//! - Whole point-sequence rewrites (smoothing, simplification)
//!
//! ## Module Structure
//!
//! - [`records`] - `EditRecord` enum defining all reversible edits
//! - [`execute`] - apply / revert for each record
//! - [`capture`] - Build records from document state before mutating
//! - [`edit_log`] - `EditLog` resource with the undo/redo cursor
//! - [`diagnostics`] - Sinks for rejected edit steps
//! - [`systems`] - Bevy messages and systems

pub mod capture;
mod data_types;
mod diagnostics;
mod edit_log;
mod execute;
mod records;
mod systems;


use std::marker::PhantomData;

use bevy::prelude::*;

use crate::config::ConfigLoaded;
use crate::document::DocumentMutator;
use crate::presentation::{sync_edit_menu_state, EditMenuState};

// Re-exports
pub use capture::NewShape;
pub use data_types::{Direction, EditKind, EditOutcome, SequenceEdit};
pub use diagnostics::{DiagnosticSink, EditDiagnostic, RecentDiagnostics, TracingSink};
pub use edit_log::{EditLog, HistoryError};
pub use records::EditRecord;
pub use systems::{
    apply_history_capacity, clear_history_on_request, handle_redo_shortcut, handle_undo_shortcut,
    process_redo_requests, process_undo_requests, ClearHistoryRequest, RedoRequest, UndoRequest,
};

/// Adds the edit history for a host document resource `D`
pub struct HistoryPlugin<D> {
    _document: PhantomData<fn() -> D>,
}

impl<D> Default for HistoryPlugin<D> {
    fn default() -> Self {
        Self {
            _document: PhantomData,
        }
    }
}

impl<D: DocumentMutator + Resource> Plugin for HistoryPlugin<D> {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditLog>()
            .init_resource::<RecentDiagnostics>()
            .init_resource::<EditMenuState>()
            .add_message::<UndoRequest>()
            .add_message::<RedoRequest>()
            .add_message::<ClearHistoryRequest>()
            .add_systems(Startup, apply_history_capacity.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    apply_history_capacity,
                    clear_history_on_request,
                    (handle_undo_shortcut, handle_redo_shortcut),
                    process_undo_requests::<D>,
                    process_redo_requests::<D>,
                    sync_edit_menu_state,
                )
                    .chain(),
            );
    }
}
