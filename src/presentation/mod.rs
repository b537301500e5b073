//! Undo/redo state as the host UI sees it.
//!
//! UI code reads [`EditMenuState`], a per-frame copy of what the log would
//! undo or redo next. It never touches the log directly; clicks turn into
//! [`UndoRequest`](crate::history::UndoRequest) /
//! [`RedoRequest`](crate::history::RedoRequest) messages.

mod edit_menu;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::history::EditLog;

pub use edit_menu::edit_menu_ui;

/// Read-only view of an undo history for menus and toolbars
pub trait HistoryView {
    /// Label of the edit the next undo would revert
    fn undo_label(&self) -> Option<String>;

    /// Label of the edit the next redo would re-apply
    fn redo_label(&self) -> Option<String>;

    fn can_undo(&self) -> bool {
        self.undo_label().is_some()
    }

    fn can_redo(&self) -> bool {
        self.redo_label().is_some()
    }
}

impl HistoryView for EditLog {
    fn undo_label(&self) -> Option<String> {
        self.next_undo().map(|r| r.label())
    }

    fn redo_label(&self) -> Option<String> {
        self.next_redo().map(|r| r.label())
    }
}

/// Resource mirroring the log for the Edit menu
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EditMenuState {
    pub undo_label: Option<String>,
    pub redo_label: Option<String>,
    /// False once the document differs from what was last saved
    pub is_saved: bool,
}

impl Default for EditMenuState {
    fn default() -> Self {
        Self {
            undo_label: None,
            redo_label: None,
            is_saved: true,
        }
    }
}

impl EditMenuState {
    pub fn from_log(log: &EditLog) -> Self {
        Self {
            undo_label: log.undo_label(),
            redo_label: log.redo_label(),
            is_saved: log.is_saved(),
        }
    }

    /// "Undo Move Vertex", or plain "Undo" when there is nothing to undo
    pub fn undo_text(&self) -> String {
        match &self.undo_label {
            Some(label) => format!("Undo {}", label),
            None => "Undo".to_string(),
        }
    }

    /// "Redo Move Vertex", or plain "Redo" when there is nothing to redo
    pub fn redo_text(&self) -> String {
        match &self.redo_label {
            Some(label) => format!("Redo {}", label),
            None => "Redo".to_string(),
        }
    }
}

impl HistoryView for EditMenuState {
    fn undo_label(&self) -> Option<String> {
        self.undo_label.clone()
    }

    fn redo_label(&self) -> Option<String> {
        self.redo_label.clone()
    }
}

/// Refresh the menu state when the log changed
pub fn sync_edit_menu_state(history: Res<EditLog>, mut state: ResMut<EditMenuState>) {
    if !history.is_changed() {
        return;
    }
    state.set_if_neq(EditMenuState::from_log(&history));
}

/// Draws the Edit menu; needs `EguiPlugin` and a `HistoryPlugin`
pub struct EditMenuPlugin;

impl Plugin for EditMenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, edit_menu_ui);
    }
}
