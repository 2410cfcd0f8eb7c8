//! Standalone gridsmith editor binary
//!
//! Run with: gridsmith_editor

use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use gridsmith_editor::EditorPlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "gridsmith".to_string(),
                        resolution: WindowResolution::new(1600, 900)
                            .with_scale_factor_override(1.0),
                        ..default()
                    }),
                    // Projects are saved before the window goes away
                    close_when_requested: false,
                    ..default()
                })
                .set(ImagePlugin {
                    default_sampler: ImageSamplerDescriptor {
                        mag_filter: ImageFilterMode::Nearest,
                        min_filter: ImageFilterMode::Nearest,
                        mipmap_filter: ImageFilterMode::Nearest,
                        ..default()
                    },
                }),
        )
        .add_plugins(EditorPlugin)
        .run();
}

