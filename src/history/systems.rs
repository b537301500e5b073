//! Bevy messages and systems driving the edit history.

use bevy::prelude::*;

use crate::config::AppConfig;
use crate::document::DocumentMutator;

use super::diagnostics::RecentDiagnostics;
use super::edit_log::EditLog;

/// Message asking for one undo step
#[derive(Message)]
pub struct UndoRequest;

/// Message asking for one redo step
#[derive(Message)]
pub struct RedoRequest;

/// Message to drop all history, sent when the document is replaced or reloaded
#[derive(Message)]
pub struct ClearHistoryRequest;

fn shortcuts_enabled(config: Option<&AppConfig>) -> bool {
    config.is_none_or(|c| c.data.keyboard_shortcuts)
}

/// System to handle undo keyboard shortcut (Ctrl+Z)
pub fn handle_undo_shortcut(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    config: Option<Res<AppConfig>>,
    mut requests: MessageWriter<UndoRequest>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    if !shortcuts_enabled(config.as_deref()) {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    // Ctrl+Z (without shift) = undo
    if ctrl && !shift && keyboard.just_pressed(KeyCode::KeyZ) {
        requests.write(UndoRequest);
    }
}

/// System to handle redo keyboard shortcut (Ctrl+Y or Ctrl+Shift+Z)
pub fn handle_redo_shortcut(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    config: Option<Res<AppConfig>>,
    mut requests: MessageWriter<RedoRequest>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    if !shortcuts_enabled(config.as_deref()) {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    // Ctrl+Y or Ctrl+Shift+Z = redo
    let redo_pressed = (ctrl && keyboard.just_pressed(KeyCode::KeyY))
        || (ctrl && shift && keyboard.just_pressed(KeyCode::KeyZ));

    if redo_pressed {
        requests.write(RedoRequest);
    }
}

/// Run one undo per request against the host document `D`
pub fn process_undo_requests<D: DocumentMutator + Resource>(
    mut requests: MessageReader<UndoRequest>,
    mut history: ResMut<EditLog>,
    mut document: ResMut<D>,
    mut diagnostics: ResMut<RecentDiagnostics>,
) {
    for _ in requests.read() {
        if let Err(e) = history.undo(&mut *document, &mut *diagnostics) {
            debug!("Undo ignored: {}", e);
        }
    }
}

/// Run one redo per request against the host document `D`
pub fn process_redo_requests<D: DocumentMutator + Resource>(
    mut requests: MessageReader<RedoRequest>,
    mut history: ResMut<EditLog>,
    mut document: ResMut<D>,
    mut diagnostics: ResMut<RecentDiagnostics>,
) {
    for _ in requests.read() {
        if let Err(e) = history.redo(&mut *document, &mut *diagnostics) {
            debug!("Redo ignored: {}", e);
        }
    }
}

/// System to drop the history when the document's identifiers are invalidated
pub fn clear_history_on_request(
    mut requests: MessageReader<ClearHistoryRequest>,
    mut history: ResMut<EditLog>,
    mut diagnostics: ResMut<RecentDiagnostics>,
) {
    if requests.read().count() == 0 {
        return;
    }
    history.clear();
    diagnostics.clear();
    info!("Edit history cleared");
}

/// Keep the log's capacity in step with the config
pub fn apply_history_capacity(config: Option<Res<AppConfig>>, mut history: ResMut<EditLog>) {
    let Some(config) = config else {
        return;
    };
    if !config.is_changed() || history.capacity() == config.data.history_capacity {
        return;
    }
    history.set_capacity(config.data.history_capacity);
    info!("History capacity is now {:?}", config.data.history_capacity);
}
