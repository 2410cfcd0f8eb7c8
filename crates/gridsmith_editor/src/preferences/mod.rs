//! Editor preferences
//!
//! Stored as JSON in the platform config directory. Missing fields fall back
//! to their defaults, so older preference files keep loading.

mod file;
pub mod recent;

pub use file::PreferencesError;
pub use recent::RecentFiles;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::commands::Bindings;
use crate::render::viewport::DEFAULT_ZOOM_RANGE;

/// User preferences that persist across sessions
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Zoom change per wheel line
    pub scroll_sensitivity: f32,
    /// Multiplier for middle-drag panning
    pub mouse_sensitivity: f32,
    /// Map zoom bounds as `[min, max]`
    pub zoom_range: [f32; 2],
    /// Share of the window width taken by the tile palette
    pub sidebar_fraction: f32,
    /// Show the close button at the right of the menu bar
    pub show_exit: bool,
    pub bindings: Bindings,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            scroll_sensitivity: 0.25,
            mouse_sensitivity: 1.0,
            zoom_range: [DEFAULT_ZOOM_RANGE.0, DEFAULT_ZOOM_RANGE.1],
            sidebar_fraction: 0.25,
            show_exit: true,
            bindings: Bindings::default(),
        }
    }
}

impl EditorPreferences {
    /// Zoom bounds with min <= max and min > 0
    pub fn zoom_bounds(&self) -> (f32, f32) {
        let min = self.zoom_range[0].max(f32::EPSILON);
        (min, self.zoom_range[1].max(min))
    }
}
