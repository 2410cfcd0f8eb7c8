//! Settings/Preferences dialog

use bevy_egui::egui;

use crate::commands::{EditorAction, KeyChord};
use crate::preferences::EditorPreferences;

/// Render the Settings dialog. Returns true when the preferences were saved.
pub fn render_settings_dialog(
    ctx: &egui::Context,
    show: &mut bool,
    preferences: &mut EditorPreferences,
) -> bool {
    if !*show {
        return false;
    }

    let mut close_dialog = false;
    let mut save_and_close = false;

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(true)
        .default_size([450.0, 500.0])
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Input");
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Scroll zoom step:");
                    ui.add(
                        egui::DragValue::new(&mut preferences.scroll_sensitivity)
                            .speed(0.01)
                            .range(0.01..=5.0),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Pan sensitivity:");
                    ui.add(
                        egui::DragValue::new(&mut preferences.mouse_sensitivity)
                            .speed(0.05)
                            .range(0.1..=10.0),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Zoom range:");
                    ui.add(
                        egui::DragValue::new(&mut preferences.zoom_range[0])
                            .speed(0.05)
                            .range(0.05..=1.0),
                    );
                    ui.label("to");
                    ui.add(
                        egui::DragValue::new(&mut preferences.zoom_range[1])
                            .speed(0.1)
                            .range(1.0..=64.0),
                    );
                });

                ui.add_space(16.0);
                ui.heading("Layout");
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Palette width:");
                    ui.add(
                        egui::Slider::new(&mut preferences.sidebar_fraction, 0.1..=0.5)
                            .custom_formatter(|v, _| format!("{:.0}%", v * 100.0)),
                    );
                });
                ui.checkbox(&mut preferences.show_exit, "Show exit button in the menu bar");

                ui.add_space(16.0);
                ui.heading("Key Bindings");
                ui.separator();

                egui::Grid::new("bindings_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for action in EditorAction::ALL {
                            ui.label(action.label());
                            let mut chord = preferences.bindings.get(action).unwrap_or("").to_string();
                            let valid = chord.trim().is_empty() || KeyChord::parse(&chord).is_some();
                            let mut edit = egui::TextEdit::singleline(&mut chord).desired_width(140.0);
                            if !valid {
                                edit = edit.text_color(egui::Color32::LIGHT_RED);
                            }
                            if ui.add(edit).changed() {
                                preferences.bindings.set(action, chord);
                            }
                            ui.end_row();
                        }
                    });
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save_and_close = true;
                }
                if ui.button("Cancel").clicked() {
                    close_dialog = true;
                }
            });
        });

    if save_and_close {
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
        *show = false;
        return true;
    }

    if close_dialog {
        // Reload preferences to discard changes
        *preferences = EditorPreferences::load();
        *show = false;
    }
    false
}
