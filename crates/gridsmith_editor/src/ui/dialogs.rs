//! Dialog windows for the editor

use bevy_egui::egui;
use std::path::PathBuf;

use crate::input::{InputEvent, UiCommand};
use crate::workspace::{MapType, NewProjectRequest, TILE_SIZE_PRESETS};

/// State of the new-project window
#[derive(Debug, Clone, Default)]
pub struct NewProjectDialog {
    pub open: bool,
    pub request: NewProjectRequest,
    /// Sheet path as typed; empty means "ask with the file picker"
    pub sheet_path: String,
}

pub fn render_new_project_dialog(
    ctx: &egui::Context,
    dialog: &mut NewProjectDialog,
    events: &mut Vec<InputEvent>,
) {
    if !dialog.open {
        return;
    }

    let mut create = false;
    let mut cancel = false;

    egui::Window::new("New Project")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("new_project_grid")
                .num_columns(2)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Map type:");
                    egui::ComboBox::from_id_salt("new_project_map_type")
                        .selected_text(dialog.request.map_type.label())
                        .show_ui(ui, |ui| {
                            for map_type in [MapType::Orthogonal, MapType::Isometric] {
                                ui.selectable_value(
                                    &mut dialog.request.map_type,
                                    map_type,
                                    map_type.label(),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label("Tile size:");
                    egui::ComboBox::from_id_salt("new_project_tile_size")
                        .selected_text(format!("{} px", dialog.request.tile_size))
                        .show_ui(ui, |ui| {
                            for size in TILE_SIZE_PRESETS {
                                ui.selectable_value(
                                    &mut dialog.request.tile_size,
                                    size,
                                    format!("{} px", size),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label("Sprite sheet:");
                    ui.add(
                        egui::TextEdit::singleline(&mut dialog.sheet_path)
                            .hint_text("choose when creating"),
                    );
                    ui.end_row();
                });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Create").clicked() {
                    create = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if create {
        let path = dialog.sheet_path.trim();
        let mut request = dialog.request.clone();
        request.sprite_sheet = (!path.is_empty()).then(|| PathBuf::from(path));
        events.push(InputEvent::Command(UiCommand::NewProject(request)));
        dialog.open = false;
    }
    if cancel {
        dialog.open = false;
    }
}

pub fn render_error_dialog(ctx: &egui::Context, last_error: &mut Option<String>) {
    let Some(error_msg) = last_error.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&error_msg);
            ui.separator();
            if ui.button("OK").clicked() {
                *last_error = None;
            }
        });
}
