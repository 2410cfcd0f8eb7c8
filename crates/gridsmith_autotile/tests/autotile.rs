use gridsmith_autotile::{apply_autotile_rect, autotile_current_layer, plan_autotile_rect};
use gridsmith_core::{
    CellRect, CellRef, Layer, MapProject, MatrixSlot, TileError, TileGroup, TileRegion, TileSize,
};
use std::collections::HashSet;

/// Group with only the five cross slots set
fn ground() -> TileGroup {
    let mut group = TileGroup::new("ground");
    for (i, (slot, id)) in [
        (MatrixSlot::CENTER, "mid"),
        (MatrixSlot::TOP, "top"),
        (MatrixSlot::BOTTOM, "bot"),
        (MatrixSlot::LEFT, "left"),
        (MatrixSlot::RIGHT, "right"),
    ]
    .into_iter()
    .enumerate()
    {
        group.set_tile(id, TileRegion::new(i as u32 * 16, 0, 16, 16));
        group.set_matrix_slot(slot, id);
    }
    group
}

/// Group with all nine slots set to distinct tiles
fn full_ground() -> TileGroup {
    let mut group = ground();
    for (slot, id) in [
        (MatrixSlot::TOP_LEFT, "nw"),
        (MatrixSlot::TOP_RIGHT, "ne"),
        (MatrixSlot::BOTTOM_LEFT, "sw"),
        (MatrixSlot::BOTTOM_RIGHT, "se"),
    ] {
        group.set_tile(id, TileRegion::new(0, 16, 16, 16));
        group.set_matrix_slot(slot, id);
    }
    group
}

fn tile_at(layer: &Layer, cell: (i32, i32)) -> Option<&str> {
    layer.get(cell).map(|c| c.tile.as_str())
}

#[test]
fn test_single_cell_gets_center() {
    let mut layer = Layer::new();
    assert!(apply_autotile_rect(
        &mut layer,
        &ground(),
        CellRect::from_corners((4, -2), (4, -2))
    ));
    assert_eq!(layer.len(), 1);
    assert_eq!(tile_at(&layer, (4, -2)), Some("mid"));
}

#[test]
fn test_3x3_with_corner_fallback() {
    let mut layer = Layer::new();
    assert!(apply_autotile_rect(
        &mut layer,
        &ground(),
        CellRect::new(0, 0, 3, 3)
    ));

    let expected = [
        ((0, 0), "left"),
        ((1, 0), "top"),
        ((2, 0), "right"),
        ((0, 1), "left"),
        ((1, 1), "mid"),
        ((2, 1), "right"),
        ((0, 2), "left"),
        ((1, 2), "bot"),
        ((2, 2), "right"),
    ];
    assert_eq!(layer.len(), expected.len());
    for (cell, tile) in expected {
        assert_eq!(tile_at(&layer, cell), Some(tile), "cell {:?}", cell);
    }
    assert!(layer
        .iter()
        .all(|(_, cell)| cell.group == "ground"));
}

#[test]
fn test_4x4_covers_every_cell_once() {
    let rect = CellRect::new(10, 10, 14, 14);
    let plan = plan_autotile_rect(&full_ground(), rect).unwrap();
    assert_eq!(plan.len(), 16);

    let unique: HashSet<(i32, i32)> = plan.iter().map(|(pos, _)| pos).collect();
    assert_eq!(unique.len(), 16);

    assert_eq!(plan.get((10, 10)), Some("nw"));
    assert_eq!(plan.get((13, 10)), Some("ne"));
    assert_eq!(plan.get((10, 13)), Some("sw"));
    assert_eq!(plan.get((13, 13)), Some("se"));

    for x in 11..13 {
        assert_eq!(plan.get((x, 10)), Some("top"));
        assert_eq!(plan.get((x, 13)), Some("bot"));
    }
    for y in 11..13 {
        assert_eq!(plan.get((10, y)), Some("left"));
        assert_eq!(plan.get((13, y)), Some("right"));
        for x in 11..13 {
            assert_eq!(plan.get((x, y)), Some("mid"));
        }
    }
}

#[test]
fn test_strips() {
    let row = plan_autotile_rect(&full_ground(), CellRect::new(0, 0, 4, 1)).unwrap();
    let tiles: Vec<String> = row.iter().map(|(_, cell)| cell.tile).collect();
    assert_eq!(tiles, vec!["nw", "top", "top", "ne"]);

    let column = plan_autotile_rect(&full_ground(), CellRect::new(0, 0, 1, 4)).unwrap();
    let tiles: Vec<String> = column.iter().map(|(_, cell)| cell.tile).collect();
    assert_eq!(tiles, vec!["nw", "left", "left", "sw"]);
}

#[test]
fn test_incomplete_matrix_is_noop() {
    let mut group = ground();
    group.clear_matrix_slot(MatrixSlot::BOTTOM);

    let mut layer = Layer::new();
    layer.set((1, 1), CellRef::new("other", "keep"));
    let before = layer.clone();

    assert!(!apply_autotile_rect(&mut layer, &group, CellRect::new(0, 0, 3, 3)));
    assert_eq!(layer, before);
}

#[test]
fn test_overwrites_existing_cells() {
    let mut layer = Layer::new();
    layer.set((0, 0), CellRef::new("other", "old"));
    apply_autotile_rect(&mut layer, &ground(), CellRect::new(0, 0, 2, 2));
    assert_eq!(layer.get((0, 0)), Some(&CellRef::new("ground", "left")));
    assert_eq!(layer.len(), 4);
}

#[test]
fn test_autotile_current_layer() {
    let mut project = MapProject::new("sheet.png", TileSize::square(16));
    project.groups.insert("ground".to_string(), ground());
    project.next_layer();

    let placed = autotile_current_layer(&mut project, "ground", CellRect::new(0, 0, 2, 2));
    assert_eq!(placed, Ok(true));
    assert_eq!(project.cell_count(0), 0);
    assert_eq!(project.cell_count(1), 4);

    let missing = autotile_current_layer(&mut project, "water", CellRect::new(0, 0, 2, 2));
    assert_eq!(missing, Err(TileError::GroupNotFound("water".to_string())));
}
