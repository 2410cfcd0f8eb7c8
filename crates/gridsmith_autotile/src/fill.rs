//! Plain rectangle fill

use gridsmith_core::{CellRect, CellRef, Layer};

/// Write `tile` into every cell of `rect`, or erase the rectangle when `None`
///
/// Returns the number of cells that changed.
pub fn fill_rect(layer: &mut Layer, rect: CellRect, tile: Option<&CellRef>) -> usize {
    let mut changed = 0;
    for pos in rect.cells() {
        match tile {
            Some(tile) => {
                if layer.set(pos, tile.clone()).as_ref() != Some(tile) {
                    changed += 1;
                }
            }
            None => {
                if layer.erase(pos).is_some() {
                    changed += 1;
                }
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect() {
        let mut layer = Layer::new();
        let grass = CellRef::new("all", "grass");
        let changed = fill_rect(&mut layer, CellRect::from_corners((0, 0), (2, 1)), Some(&grass));
        assert_eq!(changed, 6);
        assert_eq!(layer.len(), 6);

        // Refilling with the same tile changes nothing
        let changed = fill_rect(&mut layer, CellRect::new(0, 0, 3, 2), Some(&grass));
        assert_eq!(changed, 0);
    }

    #[test]
    fn test_fill_rect_erases_without_tile() {
        let mut layer = Layer::new();
        let grass = CellRef::new("all", "grass");
        fill_rect(&mut layer, CellRect::new(0, 0, 4, 4), Some(&grass));
        let erased = fill_rect(&mut layer, CellRect::new(1, 1, 3, 3), None);
        assert_eq!(erased, 4);
        assert_eq!(layer.len(), 12);
        assert!(layer.get((1, 1)).is_none());
        assert!(layer.get((0, 0)).is_some());
    }
}
