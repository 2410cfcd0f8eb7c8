//! Map project - the canonical in-memory shape every file version decodes into

use crate::error::TileError;
use crate::grid::{CellRef, Layer};
use crate::region::{TileRegion, TileSize};
use crate::tile_group::TileGroup;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

/// Group every project starts with, and the only group of legacy files
pub const DEFAULT_GROUP: &str = "all";

/// Name of the layer a fresh project (or an emptied one) starts with
pub const FIRST_LAYER_NAME: &str = "Layer 0";

/// Tile groups, layers and sheet reference of one map
///
/// Layers and their names are kept in step: there is always at least one
/// layer, and `current_layer` always indexes a valid layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MapProject {
    pub tile_size: TileSize,
    /// Sprite-sheet image path, stored as given (never embedded)
    pub sprite_sheet: PathBuf,
    pub groups: HashMap<String, TileGroup>,
    layers: Vec<Layer>,
    layer_names: Vec<String>,
    current_layer: usize,
}

impl MapProject {
    /// A fresh project with the default group and one empty layer
    pub fn new(sprite_sheet: impl Into<PathBuf>, tile_size: TileSize) -> Self {
        let mut groups = HashMap::new();
        groups.insert(DEFAULT_GROUP.to_string(), TileGroup::new(DEFAULT_GROUP));
        Self {
            tile_size,
            sprite_sheet: sprite_sheet.into(),
            groups,
            layers: vec![Layer::new()],
            layer_names: vec![FIRST_LAYER_NAME.to_string()],
            current_layer: 0,
        }
    }

    /// Assemble a project from decoded parts
    ///
    /// Missing names are filled in as `layer {n}`, extra names are dropped,
    /// and an empty layer list becomes a single empty layer.
    pub fn from_parts(
        tile_size: TileSize,
        sprite_sheet: impl Into<PathBuf>,
        groups: HashMap<String, TileGroup>,
        mut layers: Vec<Layer>,
        mut layer_names: Vec<String>,
        current_layer: usize,
    ) -> Self {
        if layers.is_empty() {
            layers.push(Layer::new());
        }
        layer_names.truncate(layers.len());
        while layer_names.len() < layers.len() {
            layer_names.push(format!("layer {}", layer_names.len() + 1));
        }
        let current_layer = current_layer.min(layers.len() - 1);
        Self {
            tile_size,
            sprite_sheet: sprite_sheet.into(),
            groups,
            layers,
            layer_names,
            current_layer,
        }
    }

    // === Groups and tiles ===

    pub fn group(&self, name: &str) -> Result<&TileGroup, TileError> {
        self.groups
            .get(name)
            .ok_or_else(|| TileError::GroupNotFound(name.to_string()))
    }

    pub fn group_mut(&mut self, name: &str) -> Result<&mut TileGroup, TileError> {
        self.groups
            .get_mut(name)
            .ok_or_else(|| TileError::GroupNotFound(name.to_string()))
    }

    /// Get a group, creating it if it doesn't exist yet
    pub fn ensure_group(&mut self, name: &str) -> &mut TileGroup {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| TileGroup::new(name))
    }

    /// Remove a group. Cells referencing it become dangling.
    pub fn delete_group(&mut self, name: &str) -> Option<TileGroup> {
        let removed = self.groups.remove(name);
        if removed.is_some() {
            info!("Deleted tile group '{}'", name);
        }
        removed
    }

    /// Group names in sorted order
    pub fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up the sheet region a cell points at; `None` when the group or
    /// tile no longer exists
    pub fn resolve(&self, cell: &CellRef) -> Option<TileRegion> {
        self.groups
            .get(&cell.group)
            .and_then(|group| group.get_tile(&cell.tile).ok())
    }

    pub fn is_dangling(&self, cell: &CellRef) -> bool {
        self.resolve(cell).is_none()
    }

    /// Drop every dangling cell from every layer, returning how many were removed
    pub fn prune_dangling(&mut self) -> usize {
        let groups = &self.groups;
        self.layers
            .iter_mut()
            .map(|layer| {
                layer.retain_valid(|cell| {
                    groups
                        .get(&cell.group)
                        .is_some_and(|group| group.has_tile(&cell.tile))
                })
            })
            .sum()
    }

    // === Layers ===

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn layer_names(&self) -> &[String] {
        &self.layer_names
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn current_layer(&self) -> usize {
        self.current_layer
    }

    pub fn current_layer_name(&self) -> &str {
        &self.layer_names[self.current_layer]
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.current_layer]
    }

    pub fn active_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.current_layer]
    }

    /// Move up one layer, appending a new empty layer past the top
    ///
    /// Appended layers are named in lowercase (`layer 2`, `layer 3`, ...) while the
    /// first layer stays `Layer 0`; existing project files rely on both spellings.
    pub fn next_layer(&mut self) {
        self.current_layer += 1;
        if self.current_layer >= self.layers.len() {
            self.layers.push(Layer::new());
            self.layer_names
                .push(format!("layer {}", self.layers.len()));
            info!("New layer {}", self.current_layer);
        } else {
            info!("Layer up {}", self.current_layer);
        }
    }

    pub fn previous_layer(&mut self) {
        if self.current_layer > 0 {
            self.current_layer -= 1;
            info!("Layer down {}", self.current_layer);
        }
    }

    /// Remove the current layer and select the one below it
    pub fn delete_current_layer(&mut self) {
        info!("Deleting layer {}", self.current_layer);
        self.layers.remove(self.current_layer);
        self.layer_names.remove(self.current_layer);
        if self.layers.is_empty() {
            self.layers.push(Layer::new());
            self.layer_names.push(FIRST_LAYER_NAME.to_string());
        }
        self.current_layer = self
            .current_layer
            .saturating_sub(1)
            .min(self.layers.len() - 1);
    }

    pub fn rename_current_layer(&mut self, name: impl Into<String>) {
        self.layer_names[self.current_layer] = name.into();
    }

    pub fn push_layer_name_char(&mut self, c: char) {
        self.layer_names[self.current_layer].push(c);
    }

    pub fn pop_layer_name_char(&mut self) {
        self.layer_names[self.current_layer].pop();
    }

    /// Number of placed cells on one layer
    pub fn cell_count(&self, layer: usize) -> usize {
        self.layers.get(layer).map_or(0, Layer::len)
    }

    /// Brush write on the current layer: place `tile`, or erase when `None`
    pub fn paint(&mut self, cell: (i32, i32), tile: Option<CellRef>) {
        let layer = self.active_layer_mut();
        match tile {
            Some(tile) => {
                layer.set(cell, tile);
            }
            None => {
                layer.erase(cell);
            }
        }
    }
}

impl Default for MapProject {
    fn default() -> Self {
        Self::new(PathBuf::new(), TileSize::default())
    }
}
