//! Decoder for files written before the `version` field existed
//!
//! These files hold one flat tile mapping with string-encoded regions, a
//! single grid layer and no tile size.

use super::parse_cell_key;
use crate::error::FormatError;
use crate::grid::{CellRef, Layer};
use crate::project::{MapProject, DEFAULT_GROUP};
use crate::region::{TileRegion, TileSize};
use crate::tile_group::TileGroup;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct LegacyFile {
    img: String,
    #[serde(default)]
    data: BTreeMap<String, String>,
    #[serde(default)]
    grid: BTreeMap<String, LegacyCell>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyCell {
    Pair(String, String),
    Bare(String),
}

impl LegacyCell {
    fn into_ref(self) -> CellRef {
        match self {
            LegacyCell::Pair(group, tile) => CellRef { group, tile },
            LegacyCell::Bare(tile) => CellRef::new(DEFAULT_GROUP, tile),
        }
    }
}

/// Decode one tile entry; whichever side parses as a region tuple is the region
fn tile_entry(key: &str, value: &str) -> Result<(String, TileRegion), FormatError> {
    if let Some(region) = TileRegion::parse_tuple(key) {
        Ok((value.to_string(), region))
    } else if let Some(region) = TileRegion::parse_tuple(value) {
        Ok((key.to_string(), region))
    } else {
        Err(FormatError::Parse(format!(
            "tile entry '{}': '{}' has no region",
            key, value
        )))
    }
}

pub(super) fn decode(value: Value) -> Result<MapProject, FormatError> {
    let file: LegacyFile =
        serde_json::from_value(value).map_err(|e| FormatError::Parse(e.to_string()))?;

    let mut group = TileGroup::new(DEFAULT_GROUP);
    for (key, value) in &file.data {
        let (id, region) = tile_entry(key, value)?;
        group.set_tile(id, region);
    }
    debug!("Tiles ({})", group.tile_count());

    let mut layer = Layer::new();
    for (key, cell) in file.grid {
        layer.set(parse_cell_key(&key)?, cell.into_ref());
    }
    debug!("Grid ({} cells)", layer.len());

    let mut groups = HashMap::new();
    groups.insert(DEFAULT_GROUP.to_string(), group);

    Ok(MapProject::from_parts(
        TileSize::LEGACY,
        file.img,
        groups,
        vec![layer],
        vec!["layer 1".to_string()],
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_entry_either_orientation() {
        assert_eq!(
            tile_entry("(0, 0, 32, 32)", "grass").unwrap(),
            ("grass".to_string(), TileRegion::new(0, 0, 32, 32))
        );
        assert_eq!(
            tile_entry("dirt", "(32,0,32,32)").unwrap(),
            ("dirt".to_string(), TileRegion::new(32, 0, 32, 32))
        );
        assert!(tile_entry("dirt", "grass").is_err());
    }

    #[test]
    fn test_legacy_cell_forms() {
        let pair: LegacyCell = serde_json::from_str(r#"["all", "grass"]"#).unwrap();
        assert_eq!(pair.into_ref(), CellRef::new("all", "grass"));
        let bare: LegacyCell = serde_json::from_str(r#""grass""#).unwrap();
        assert_eq!(bare.into_ref(), CellRef::new(DEFAULT_GROUP, "grass"));
    }
}
