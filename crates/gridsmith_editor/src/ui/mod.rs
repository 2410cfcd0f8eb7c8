//! Editor UI using bevy_egui
//!
//! Panels and dialogs only produce [`InputEvent`]s. Once per frame the events
//! are gathered together with the canvas input into one [`InputBatch`], the
//! workspace ticks, and the selected project is drawn into the canvas.

mod dialogs;
mod layers;
mod menu_bar;
mod palette;
mod settings_dialog;
pub mod surface;
mod welcome;

pub use dialogs::{render_error_dialog, render_new_project_dialog, NewProjectDialog};
pub use surface::EguiSurface;

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::commands::KeyChord;
use crate::input::{InputBatch, InputEvent, PointerButton};
use crate::picker::Picker;
use crate::preferences::EditorPreferences;
use crate::render::GridRenderer;
use crate::workspace::Workspace;
use layers::render_layers;
use menu_bar::render_menu_bar;
use palette::render_palette;
use settings_dialog::render_settings_dialog;
use welcome::render_welcome;

/// Scroll delta (points) that counts as one wheel line
const SCROLL_LINE: f32 = 40.0;

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

/// Frontend-only state: renderers per open project and dialog visibility
#[derive(Resource, Default)]
pub struct UiState {
    renderers: HashMap<Uuid, GridRenderer<egui::TextureHandle>>,
    last_pointer: Option<egui::Pos2>,
    pub new_project: NewProjectDialog,
    pub show_settings: bool,
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Turn this frame's egui input into editor events
///
/// Presses and scrolling only count over the canvas; moves and releases are
/// always forwarded so drags can finish outside it.
fn collect_input(
    ctx: &egui::Context,
    canvas_hovered: bool,
    last_pointer: &mut Option<egui::Pos2>,
    batch: &mut InputBatch,
) {
    let widget_has_keyboard = ctx.wants_keyboard_input();
    ctx.input(|input| {
        for event in &input.events {
            match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } if !widget_has_keyboard => {
                    batch.push(InputEvent::Key(KeyChord::from_egui(*key, *modifiers)));
                }
                egui::Event::Text(text) if !widget_has_keyboard => {
                    batch.push(InputEvent::Text(text.clone()));
                }
                egui::Event::PointerMoved(pos) => {
                    let delta = last_pointer.map_or(egui::Vec2::ZERO, |last| *pos - last);
                    *last_pointer = Some(*pos);
                    batch.push(InputEvent::PointerMoved { pos: *pos, delta });
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let Some(button) = map_button(*button) else {
                        continue;
                    };
                    if !*pressed {
                        batch.push(InputEvent::PointerReleased { pos: *pos, button });
                    } else if canvas_hovered {
                        batch.push(InputEvent::PointerPressed { pos: *pos, button });
                    }
                }
                _ => {}
            }
        }

        let lines = input.smooth_scroll_delta.y / SCROLL_LINE;
        if canvas_hovered && lines != 0.0 {
            if let Some(pos) = input.pointer.hover_pos() {
                batch.push(InputEvent::Scroll { pos, lines });
            }
        }
    });
}

#[allow(clippy::too_many_arguments)]
fn render_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    mut workspace: ResMut<Workspace>,
    mut preferences: ResMut<EditorPreferences>,
    mut picker: ResMut<Picker>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut app_exit: MessageWriter<AppExit>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let ctx = ctx.clone();
    let ui_state = &mut *ui_state;
    let mut events = Vec::new();

    render_menu_bar(&ctx, &workspace, &preferences, ui_state, &mut events);

    if render_settings_dialog(&ctx, &mut ui_state.show_settings, &mut preferences) {
        workspace.set_bindings(&preferences.bindings);
    }
    render_new_project_dialog(&ctx, &mut ui_state.new_project, &mut events);
    render_error_dialog(&ctx, &mut workspace.last_error);

    // Left panel - palette and layers
    if let Some(project) = workspace.current_project() {
        let renderer = ui_state.renderers.entry(project.id).or_default();
        let texture = project.sheet.as_ref().map(|sheet| {
            let mut surface =
                EguiSurface::new(&ctx, ctx.layer_painter(egui::LayerId::background()));
            renderer.sheet_texture(&mut surface, sheet).clone()
        });
        egui::SidePanel::left("palette")
            .exact_width(ctx.screen_rect().width() * preferences.sidebar_fraction)
            .show(&ctx, |ui| {
                egui::TopBottomPanel::bottom("layers")
                    .resizable(true)
                    .show_inside(ui, |ui| render_layers(ui, project, &mut events));
                egui::CentralPanel::default()
                    .show_inside(ui, |ui| render_palette(ui, project, texture.as_ref(), &mut events));
            });
    }

    // Central panel - the canvas, or the welcome page
    let mut canvas = None;
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(&ctx, |ui| {
            if workspace.current_project().is_some() {
                canvas = Some(ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag()));
            } else {
                render_welcome(ui, &workspace.recent, &mut ui_state.new_project, &mut events);
            }
        });

    let canvas_rect = canvas
        .as_ref()
        .map_or(egui::Rect::NOTHING, |(response, _)| response.rect);
    let canvas_hovered = canvas
        .as_ref()
        .is_some_and(|(response, _)| response.hovered());
    let mut batch = InputBatch::new(canvas_rect);
    batch.events = events;
    collect_input(&ctx, canvas_hovered, &mut ui_state.last_pointer, &mut batch);

    let outcome = workspace.tick(&batch, &mut *picker.0, &preferences);

    if let Some((response, painter)) = canvas {
        if let Some(project) = workspace.current_project_mut() {
            let renderer = ui_state.renderers.entry(project.id).or_default();
            let mut surface = EguiSurface::new(&ctx, painter);
            renderer.render(&mut surface, project, response.rect);
        }
    }

    let live: HashSet<Uuid> = workspace.projects().map(|project| project.id).collect();
    ui_state.renderers.retain(|id, _| live.contains(id));

    if outcome.toggle_fullscreen {
        if let Ok(mut window) = windows.single_mut() {
            window.mode = match window.mode {
                WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
                _ => WindowMode::Windowed,
            };
        }
    }
    if outcome.exit_requested {
        workspace.exit(&mut *picker.0);
        app_exit.write(AppExit::Success);
    }
}
