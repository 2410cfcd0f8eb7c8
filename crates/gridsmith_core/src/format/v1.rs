//! Decoder and encoder for format 1.0.0

use super::{cell_key, parse_cell_key, CURRENT_VERSION};
use crate::error::FormatError;
use crate::grid::{CellRef, Layer};
use crate::project::MapProject;
use crate::region::{TileRegion, TileSize};
use crate::tile_group::{MatrixSlot, TileGroup};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ProjectFile {
    grid: Vec<BTreeMap<String, (String, String)>>,
    #[serde(rename = "current-layer", default)]
    current_layer: i64,
    #[serde(rename = "layer-names", default)]
    layer_names: Vec<String>,
    data: BTreeMap<String, GroupData>,
    img: String,
    #[serde(rename = "tile-size")]
    tile_size: TileSize,
    version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroupData {
    tiles: BTreeMap<String, TileRegion>,
    #[serde(default)]
    pos: [f32; 2],
    #[serde(default, alias = "_matrix", skip_serializing_if = "BTreeMap::is_empty")]
    matrix: BTreeMap<String, Option<String>>,
    #[serde(rename = "show-matrix", alias = "_draw_matrix", default)]
    show_matrix: bool,
}

pub(super) fn decode(value: Value) -> Result<MapProject, FormatError> {
    let file: ProjectFile =
        serde_json::from_value(value).map_err(|e| FormatError::Parse(e.to_string()))?;
    debug!("Tile size ({})", file.tile_size);

    let mut groups = HashMap::with_capacity(file.data.len());
    for (name, data) in file.data {
        let mut group = TileGroup::new(name.clone());
        for (id, region) in data.tiles {
            group.set_tile(id, region);
        }
        for (key, id) in data.matrix {
            let slot = MatrixSlot::parse_key(&key)
                .ok_or_else(|| FormatError::Parse(format!("invalid matrix slot '{}'", key)))?;
            if let Some(id) = id {
                group.set_matrix_slot(slot, id);
            }
        }
        group.position = data.pos;
        group.show_matrix = data.show_matrix;
        groups.insert(name, group);
    }
    debug!("Groups ({})", groups.len());

    let mut layers = Vec::with_capacity(file.grid.len());
    for cells in file.grid {
        let mut layer = Layer::new();
        for (key, (group, tile)) in cells {
            layer.set(parse_cell_key(&key)?, CellRef { group, tile });
        }
        layers.push(layer);
    }
    debug!("Grid ({} layers)", layers.len());
    debug!("Layer names ({:?})", file.layer_names);

    Ok(MapProject::from_parts(
        file.tile_size,
        file.img,
        groups,
        layers,
        file.layer_names,
        file.current_layer.max(0) as usize,
    ))
}

pub(super) fn encode(project: &MapProject) -> ProjectFile {
    let data = project
        .groups
        .iter()
        .map(|(name, group)| {
            let tiles = group
                .tiles()
                .map(|(id, region)| (id.to_string(), region))
                .collect();
            let matrix = MatrixSlot::ALL
                .iter()
                .filter_map(|slot| {
                    group
                        .matrix_slot(*slot)
                        .map(|id| (slot.key(), Some(id.to_string())))
                })
                .collect();
            let data = GroupData {
                tiles,
                pos: group.position,
                matrix,
                show_matrix: group.show_matrix,
            };
            (name.clone(), data)
        })
        .collect();

    let grid = project
        .layers()
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|(pos, cell)| (cell_key(pos), (cell.group.clone(), cell.tile.clone())))
                .collect()
        })
        .collect();

    ProjectFile {
        grid,
        current_layer: project.current_layer() as i64,
        layer_names: project.layer_names().to_vec(),
        data,
        img: project.sprite_sheet.to_string_lossy().into_owned(),
        tile_size: project.tile_size,
        version: CURRENT_VERSION.to_string(),
    }
}
