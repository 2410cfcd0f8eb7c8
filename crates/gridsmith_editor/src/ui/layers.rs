//! Layer list under the palette

use bevy_egui::egui;

use crate::commands::EditorAction;
use crate::input::InputEvent;
use crate::project::EditorProject;

pub fn render_layers(ui: &mut egui::Ui, project: &EditorProject, events: &mut Vec<InputEvent>) {
    ui.heading("Layers");
    ui.separator();

    let current = project.map.current_layer();
    // Top layer first
    for (index, name) in project.map.layer_names().iter().enumerate().rev() {
        let cells = project.map.cell_count(index);
        let text = if index == current && project.is_renaming() {
            format!("{}_", name)
        } else {
            name.clone()
        };
        ui.horizontal(|ui| {
            let _ = ui.selectable_label(index == current, text);
            ui.weak(format!("{} tiles", cells));
        });
    }

    ui.horizontal(|ui| {
        for (label, action) in [
            ("Up", EditorAction::NewLayer),
            ("Down", EditorAction::PreviousLayer),
            ("Rename", EditorAction::RenameLayer),
            ("Delete", EditorAction::DeleteLayer),
        ] {
            if ui.button(label).on_hover_text(action.label()).clicked() {
                events.push(InputEvent::Action(action));
            }
        }
    });
}
