use gridsmith_core::format::{self, CURRENT_VERSION};
use gridsmith_core::{
    CellRef, FormatError, MapProject, MatrixSlot, TileRegion, TileSize, DEFAULT_GROUP,
};
use serde_json::json;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gridsmith-{}-{}.world", name, uuid::Uuid::new_v4()))
}

fn current_file() -> serde_json::Value {
    json!({
        "grid": [
            {"0,0": ["ground", "mid"], "-3,2": ["ground", "top"]},
            {"1.0,1.0": ["deco", "flower"]}
        ],
        "current-layer": 1,
        "layer-names": ["floor", "decor"],
        "data": {
            "ground": {
                "tiles": {
                    "mid": [16, 16, 16, 16],
                    "top": [16.0, 0.0, 16.0, 16.0]
                },
                "pos": [0, 120],
                "matrix": {"0,0": "mid", "0,-1": "top"},
                "show-matrix": true
            },
            "deco": {
                "tiles": {"flower": [64, 0, 16, 16]},
                "pos": [0, 240]
            }
        },
        "img": "assets/sheet.png",
        "tile-size": [16, 16],
        "version": "1.0.0"
    })
}

fn legacy_file() -> serde_json::Value {
    json!({
        "img": "old/sheet.png",
        "data": {
            "(0, 0, 32, 32)": "grass",
            "(32, 0, 32, 32)": "dirt"
        },
        "grid": {
            "0,0": ["all", "grass"],
            "1,0": "dirt"
        }
    })
}

#[test]
fn test_load_current_version() {
    let project = format::load_str(&current_file().to_string()).unwrap();

    assert_eq!(project.tile_size, TileSize::square(16));
    assert_eq!(project.sprite_sheet, PathBuf::from("assets/sheet.png"));
    assert_eq!(project.layer_count(), 2);
    assert_eq!(project.layer_names(), ["floor".to_string(), "decor".to_string()]);
    assert_eq!(project.current_layer(), 1);

    let ground = project.group("ground").unwrap();
    assert_eq!(ground.get_tile("top"), Ok(TileRegion::new(16, 0, 16, 16)));
    assert_eq!(ground.matrix_slot(MatrixSlot::TOP), Some("top"));
    assert_eq!(ground.matrix_slot(MatrixSlot::LEFT), None);
    assert!(ground.show_matrix);
    assert_eq!(ground.position, [0.0, 120.0]);

    let floor = project.layer(0).unwrap();
    assert_eq!(floor.get((-3, 2)), Some(&CellRef::new("ground", "top")));
    let decor = project.layer(1).unwrap();
    assert_eq!(decor.get((1, 1)), Some(&CellRef::new("deco", "flower")));
}

#[test]
fn test_load_legacy_upgrades_shape() {
    let project = format::load_str(&legacy_file().to_string()).unwrap();

    assert_eq!(project.tile_size, TileSize::new(32, 32));
    assert_eq!(project.group_names(), vec![DEFAULT_GROUP]);
    assert_eq!(project.layer_names(), ["layer 1".to_string()]);

    let all = project.group(DEFAULT_GROUP).unwrap();
    assert_eq!(all.get_tile("grass"), Ok(TileRegion::new(0, 0, 32, 32)));
    assert_eq!(all.get_tile("dirt"), Ok(TileRegion::new(32, 0, 32, 32)));

    let layer = project.layer(0).unwrap();
    assert_eq!(layer.get((1, 0)), Some(&CellRef::new(DEFAULT_GROUP, "dirt")));
}

#[test]
fn test_save_then_load_is_stable() {
    for fixture in [current_file(), legacy_file()] {
        let loaded = format::load_str(&fixture.to_string()).unwrap();
        let saved = format::to_string(&loaded).unwrap();
        let reloaded = format::load_str(&saved).unwrap();
        assert_eq!(reloaded, loaded);

        // Saving again produces byte-identical output
        assert_eq!(format::to_string(&reloaded).unwrap(), saved);
    }
}

#[test]
fn test_save_writes_current_version() {
    let project = format::load_str(&legacy_file().to_string()).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&format::to_string(&project).unwrap()).unwrap();
    assert_eq!(saved["version"], json!(CURRENT_VERSION));
    assert_eq!(saved["tile-size"], json!([32, 32]));
    assert_eq!(saved["data"]["all"]["tiles"]["grass"], json!([0, 0, 32, 32]));
    assert_eq!(saved["grid"][0]["1,0"], json!(["all", "dirt"]));
}

#[test]
fn test_region_at_the_edge_of_u32_loads_and_clamps() {
    let mut file = current_file();
    file["data"]["deco"]["tiles"]["big"] = json!([4294967295u64, 0, 16, 16]);
    let project = format::load_str(&file.to_string()).unwrap();

    let big = project.group("deco").unwrap().get_tile("big").unwrap();
    assert_eq!(big.x, u32::MAX);
    assert_eq!(big.right(), u32::MAX);
    assert!(big.clamped_to(64, 64).is_empty());
}

#[test]
fn test_unsupported_version_is_rejected_whole() {
    let mut file = current_file();
    file["version"] = json!("0.5.0-beta");
    let result = format::load_str(&file.to_string());
    assert_eq!(
        result,
        Err(FormatError::UnsupportedFormat("0.5.0-beta".to_string()))
    );
}

#[test]
fn test_bad_cell_key_fails_whole_load() {
    let mut file = current_file();
    file["grid"][1]["nowhere"] = json!(["deco", "flower"]);
    assert!(matches!(
        format::load_str(&file.to_string()),
        Err(FormatError::Parse(_))
    ));
}

#[test]
fn test_matrix_aliases_and_float_tile_size() {
    let file = json!({
        "grid": [{}],
        "layer-names": ["base"],
        "data": {
            "walls": {
                "tiles": {"w": [0, 0, 8, 8]},
                "pos": [0, 0],
                "_matrix": {"1,0": "w"},
                "_draw_matrix": true
            }
        },
        "img": "sheet.png",
        "tile-size": [0.5, 8.0],
        "version": "1.0.0"
    });
    let project = format::load_str(&file.to_string()).unwrap();
    let walls = project.group("walls").unwrap();
    assert_eq!(walls.matrix_slot(MatrixSlot::RIGHT), Some("w"));
    assert!(walls.show_matrix);
    assert_eq!(project.tile_size, TileSize::new(1, 8));
}

#[test]
fn test_current_layer_is_clamped() {
    let mut file = current_file();
    file["current-layer"] = json!(7);
    let project = format::load_str(&file.to_string()).unwrap();
    assert_eq!(project.current_layer(), 1);

    file["current-layer"] = json!(-1);
    let project = format::load_str(&file.to_string()).unwrap();
    assert_eq!(project.current_layer(), 0);
}

#[test]
fn test_save_and_load_path() {
    let mut project = MapProject::new("sheet.png", TileSize::square(24));
    project
        .ensure_group(DEFAULT_GROUP)
        .set_tile("stone", TileRegion::new(0, 24, 24, 24));
    project.paint((5, -5), Some(CellRef::new(DEFAULT_GROUP, "stone")));

    let path = temp_path("save");
    format::save_path(&project, &path).unwrap();
    let loaded = format::load_path(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, project);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let path = temp_path("missing");
    assert!(matches!(format::load_path(&path), Err(FormatError::Io(_))));
}
