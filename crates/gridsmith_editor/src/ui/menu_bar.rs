//! Menu bar and tab strip

use bevy_egui::egui;

use super::UiState;
use crate::commands::{EditorAction, Keymap};
use crate::input::{InputEvent, UiCommand};
use crate::preferences::EditorPreferences;
use crate::workspace::{Tab, Workspace};

/// Menu entry for an action, showing its bound chord
fn action_button(
    ui: &mut egui::Ui,
    keymap: &Keymap,
    action: EditorAction,
    events: &mut Vec<InputEvent>,
) {
    let mut button = egui::Button::new(action.label());
    if let Some(chord) = keymap.chord_for(action) {
        button = button.shortcut_text(chord.to_string());
    }
    if ui.add(button).clicked() {
        events.push(InputEvent::Action(action));
        ui.close();
    }
}

/// Render the menu bar
pub fn render_menu_bar(
    ctx: &egui::Context,
    workspace: &Workspace,
    preferences: &EditorPreferences,
    ui_state: &mut UiState,
    events: &mut Vec<InputEvent>,
) {
    let keymap = workspace.keymap();
    let has_project = workspace.current_project().is_some();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Project...").clicked() {
                    ui_state.new_project.open = true;
                    ui.close();
                }
                if ui.button("Open Project...").clicked() {
                    events.push(InputEvent::Command(UiCommand::OpenProject));
                    ui.close();
                }

                ui.menu_button("Open Recent", |ui| {
                    if workspace.recent.is_empty() {
                        ui.label("(No recent files)");
                    }
                    for path in workspace.recent.iter() {
                        if ui.button(path.display().to_string()).clicked() {
                            events.push(InputEvent::Command(UiCommand::OpenRecent(
                                path.to_path_buf(),
                            )));
                            ui.close();
                        }
                    }
                });

                ui.separator();
                ui.add_enabled_ui(has_project, |ui| {
                    action_button(ui, keymap, EditorAction::Save, events);
                    action_button(ui, keymap, EditorAction::SaveAs, events);
                });
                ui.separator();
                if ui.button("Settings...").clicked() {
                    ui_state.show_settings = true;
                    ui.close();
                }
                ui.separator();
                action_button(ui, keymap, EditorAction::Exit, events);
            });

            ui.add_enabled_ui(has_project, |ui| {
                ui.menu_button("Edit", |ui| {
                    for action in [
                        EditorAction::ResetTile,
                        EditorAction::TileLookupRemoval,
                        EditorAction::SelectionAccept,
                        EditorAction::CancelSelection,
                        EditorAction::SwitchSheetField,
                        EditorAction::EditTile,
                        EditorAction::ExportTile,
                    ] {
                        action_button(ui, keymap, action, events);
                    }
                });

                ui.menu_button("Tools", |ui| {
                    let current = workspace.current_project().map(|p| p.tool);
                    for action in [
                        EditorAction::Brush,
                        EditorAction::Rect,
                        EditorAction::AutotileRect,
                    ] {
                        let active = current.is_some_and(|tool| {
                            crate::tools::Tool::from_action(action) == Some(tool)
                        });
                        if ui.selectable_label(active, action.label()).clicked() {
                            events.push(InputEvent::Action(action));
                            ui.close();
                        }
                    }
                });

                ui.menu_button("Layer", |ui| {
                    for action in [
                        EditorAction::NewLayer,
                        EditorAction::PreviousLayer,
                        EditorAction::RenameLayer,
                        EditorAction::DeleteLayer,
                    ] {
                        action_button(ui, keymap, action, events);
                    }
                });
            });

            ui.menu_button("View", |ui| {
                ui.add_enabled_ui(has_project, |ui| {
                    action_button(ui, keymap, EditorAction::ToggleTileMode, events);
                    action_button(ui, keymap, EditorAction::ScaleTileUp, events);
                    action_button(ui, keymap, EditorAction::ScaleTileDown, events);
                });
                ui.separator();
                action_button(ui, keymap, EditorAction::ProjectSelectionLeft, events);
                action_button(ui, keymap, EditorAction::ProjectSelectionRight, events);
                action_button(ui, keymap, EditorAction::ToggleFullscreen, events);
            });

            if preferences.show_exit {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").on_hover_text("Exit").clicked() {
                        events.push(InputEvent::Action(EditorAction::Exit));
                    }
                });
            }
        });
    });

    egui::TopBottomPanel::top("tab_strip").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for (index, tab) in workspace.tabs().iter().enumerate() {
                let selected = index == workspace.selected();
                if ui.selectable_label(selected, tab.label()).clicked() {
                    events.push(InputEvent::Command(UiCommand::SelectTab(index)));
                }
                if matches!(tab, Tab::Project(_)) && ui.small_button("x").clicked() {
                    events.push(InputEvent::Command(UiCommand::CloseTab(index)));
                }
                ui.separator();
            }
        });
    });
}
