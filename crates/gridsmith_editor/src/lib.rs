//! gridsmith_editor - tile-map level editor built on one sprite sheet
//!
//! This crate provides:
//! - Multi-project workspace with a welcome tab and recent files
//! - Sprite-sheet tile mode for cutting named tiles out of the sheet
//! - Brush, rectangle and 3x3 autotile rectangle tools over layered grids
//! - Pan/zoom viewport with a scaled tile cache
//! - Rebindable key actions stored with the other preferences
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use gridsmith_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin)
//!         .run();
//! }
//! ```

pub mod commands;
pub mod input;
pub mod picker;
pub mod preferences;
pub mod project;
pub mod render;
pub mod sheet;
pub mod tools;
pub mod ui;
pub mod workspace;

// Re-export the data crates
pub use gridsmith_autotile;
pub use gridsmith_core;

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowCloseRequested};
use bevy_egui::EguiPlugin;

use picker::Picker;
use preferences::{EditorPreferences, RecentFiles};
use ui::EditorUiPlugin;
use workspace::Workspace;

/// Main editor plugin
///
/// Expects the primary window to be created with `close_when_requested: false`
/// so open projects can be saved before the app exits.
#[derive(Default)]
pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        let preferences = EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");
        let recent = RecentFiles::load();
        bevy::log::info!("{} recent files", recent.len());

        app.add_plugins(EguiPlugin::default())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_plugins(EditorUiPlugin)
            .insert_resource(Workspace::new(&preferences, recent))
            .insert_resource(preferences)
            .init_resource::<Picker>()
            .add_systems(Startup, setup_editor_camera)
            .add_systems(Update, (update_window_title, handle_close_requested));
    }
}

/// System to set up the editor camera
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    // Only spawn if no Camera2d exists
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

fn update_window_title(
    workspace: Res<Workspace>,
    diagnostics: Res<DiagnosticsStore>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());
    let title = workspace.title(fps);
    if let Ok(mut window) = windows.single_mut() {
        if window.title != title {
            window.title = title;
        }
    }
}

/// Save everything before honouring a window close
fn handle_close_requested(
    mut close_requests: MessageReader<WindowCloseRequested>,
    mut workspace: ResMut<Workspace>,
    mut picker: ResMut<Picker>,
    mut app_exit: MessageWriter<AppExit>,
) {
    if close_requests.read().count() == 0 {
        return;
    }
    bevy::log::info!("Window close requested, saving open projects");
    workspace.exit(&mut *picker.0);
    app_exit.write(AppExit::Success);
}
