use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::history::{RecentDiagnostics, RedoRequest, UndoRequest};

use super::{EditMenuState, HistoryView};

/// Top bar with the Edit menu, save state and the latest failed edit
pub fn edit_menu_ui(
    mut contexts: EguiContexts,
    menu: Res<EditMenuState>,
    diagnostics: Res<RecentDiagnostics>,
    mut undo_requests: MessageWriter<UndoRequest>,
    mut redo_requests: MessageWriter<RedoRequest>,
) -> Result {
    egui::TopBottomPanel::top("edit_menu_bar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 6)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("Edit", |ui| {
                    let undo = egui::Button::new(menu.undo_text()).shortcut_text("Ctrl+Z");
                    if ui.add_enabled(menu.can_undo(), undo).clicked() {
                        undo_requests.write(UndoRequest);
                        ui.close();
                    }

                    let redo = egui::Button::new(menu.redo_text()).shortcut_text("Ctrl+Y");
                    if ui.add_enabled(menu.can_redo(), redo).clicked() {
                        redo_requests.write(RedoRequest);
                        ui.close();
                    }
                });

                if !menu.is_saved {
                    ui.label(egui::RichText::new("Unsaved changes").weak());
                }

                // Failed steps are not fatal; show the latest so the user knows
                if let Some(diagnostic) = diagnostics.latest() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.colored_label(
                            egui::Color32::from_rgb(230, 160, 60),
                            diagnostic.to_string(),
                        );
                    });
                }
            });
        });
    Ok(())
}
