//! Tile palette: every group's tiles, with the matrix editor per group

use bevy_egui::egui;
use gridsmith_core::{CellRef, MatrixSlot};

use crate::input::{InputEvent, UiCommand};
use crate::project::EditorProject;
use crate::render::sheet_uv;

const TILE_BUTTON: f32 = 32.0;

pub fn render_palette(
    ui: &mut egui::Ui,
    project: &EditorProject,
    texture: Option<&egui::TextureHandle>,
    events: &mut Vec<InputEvent>,
) {
    ui.heading("Tiles");
    ui.separator();

    if project.map.groups.values().all(|group| group.is_empty()) {
        ui.label("No tiles yet. Switch to tile mode to cut some from the sheet.");
    }

    egui::ScrollArea::vertical()
        .id_salt("palette_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for name in project.map.group_names() {
                let Ok(group) = project.map.group(name) else {
                    continue;
                };
                egui::CollapsingHeader::new(format!("{} ({})", name, group.tile_count()))
                    .id_salt(("group", name))
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            if ui.selectable_label(group.show_matrix, "Matrix").clicked() {
                                events.push(InputEvent::Command(UiCommand::ToggleMatrix(
                                    name.to_string(),
                                )));
                            }
                            if ui.button("Delete").clicked() {
                                events.push(InputEvent::Command(UiCommand::DeleteGroup(
                                    name.to_string(),
                                )));
                            }
                        });

                        ui.horizontal_wrapped(|ui| {
                            for id in group.tile_ids() {
                                let cell = CellRef::new(name, id);
                                let selected = project.selected.as_ref() == Some(&cell);
                                let button = match (texture, project.sheet.as_ref(), group.get_tile(id)) {
                                    (Some(texture), Some(sheet), Ok(region)) => egui::Button::image(
                                        egui::Image::new((
                                            texture.id(),
                                            egui::vec2(TILE_BUTTON, TILE_BUTTON),
                                        ))
                                        .uv(sheet_uv(sheet, region)),
                                    ),
                                    _ => egui::Button::new(id),
                                };
                                if ui.add(button.selected(selected)).on_hover_text(id).clicked() {
                                    events.push(InputEvent::Command(UiCommand::SelectTile(cell)));
                                }
                            }
                        });

                        if group.show_matrix {
                            ui.add_space(4.0);
                            let effective = group.effective_matrix();
                            egui::Grid::new(("matrix", name))
                                .num_columns(3)
                                .striped(true)
                                .show(ui, |ui| {
                                    for (i, slot) in MatrixSlot::ALL.iter().enumerate() {
                                        let response = match (
                                            group.matrix_slot(*slot),
                                            effective.get(*slot),
                                        ) {
                                            (Some(id), _) => ui.label(id),
                                            (None, Some(fallback)) => {
                                                ui.weak(format!("({})", fallback))
                                            }
                                            (None, None) => ui.weak("-"),
                                        };
                                        response.on_hover_text(slot.key());
                                        if i % 3 == 2 {
                                            ui.end_row();
                                        }
                                    }
                                });
                            if !group.is_matrix_complete() {
                                ui.colored_label(
                                    egui::Color32::YELLOW,
                                    "Matrix incomplete: center and edges are required",
                                );
                            }
                        }
                    });
            }
        });
}
