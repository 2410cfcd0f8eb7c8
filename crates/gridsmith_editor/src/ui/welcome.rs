//! Welcome tab

use bevy_egui::egui;

use crate::input::{InputEvent, UiCommand};
use crate::preferences::RecentFiles;

use super::NewProjectDialog;

pub fn render_welcome(
    ui: &mut egui::Ui,
    recent: &RecentFiles,
    new_project: &mut NewProjectDialog,
    events: &mut Vec<InputEvent>,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.heading("gridsmith");
        ui.label("Tile maps from a single sprite sheet");
        ui.add_space(24.0);

        if ui.button("New Project...").clicked() {
            new_project.open = true;
        }
        if ui.button("Open Project...").clicked() {
            events.push(InputEvent::Command(UiCommand::OpenProject));
        }

        ui.add_space(24.0);
        ui.label(egui::RichText::new("Recent").strong());
        ui.separator();
        if recent.is_empty() {
            ui.weak("(No recent files)");
        }
        for path in recent.iter() {
            if ui.link(path.display().to_string()).clicked() {
                events.push(InputEvent::Command(UiCommand::OpenRecent(path.to_path_buf())));
            }
        }
    });
}
