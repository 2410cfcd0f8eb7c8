//! Scaled tile texture cache

use gridsmith_core::{TileRegion, TileSize};
use std::collections::HashMap;

/// Pre-scaled tile textures keyed by sheet region
///
/// Entries are only valid for the zoom and tile size they were scaled for.
/// Panning doesn't change the scaled size, so it never invalidates the cache.
#[derive(Debug, Clone)]
pub struct TileCache<T> {
    scale: Option<(u32, TileSize)>,
    entries: HashMap<TileRegion, T>,
}

impl<T> Default for TileCache<T> {
    fn default() -> Self {
        Self {
            scale: None,
            entries: HashMap::new(),
        }
    }
}

impl<T> TileCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the cache matches the current scale, clearing it otherwise
    ///
    /// Returns true when entries were dropped.
    pub fn validate(&mut self, zoom: f32, tile_size: TileSize) -> bool {
        let scale = (zoom.to_bits(), tile_size);
        if self.scale == Some(scale) {
            return false;
        }
        self.scale = Some(scale);
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    pub fn get(&self, region: &TileRegion) -> Option<&T> {
        self.entries.get(region)
    }

    pub fn get_or_insert_with(&mut self, region: TileRegion, make: impl FnOnce() -> T) -> &T {
        self.entries.entry(region).or_insert_with(make)
    }

    /// Like [`Self::get_or_insert_with`], but nothing is cached when `make` fails
    pub fn get_or_try_insert_with(
        &mut self,
        region: TileRegion,
        make: impl FnOnce() -> Option<T>,
    ) -> Option<&T> {
        if !self.entries.contains_key(&region) {
            let value = make()?;
            self.entries.insert(region, value);
        }
        self.entries.get(&region)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRASS: TileRegion = TileRegion::new(0, 0, 16, 16);
    const WATER: TileRegion = TileRegion::new(16, 0, 16, 16);

    #[test]
    fn test_reuses_entries() {
        let mut cache = TileCache::new();
        cache.validate(1.0, TileSize::square(16));

        let mut builds = 0;
        for _ in 0..3 {
            cache.get_or_insert_with(GRASS, || {
                builds += 1;
                "grass"
            });
        }
        assert_eq!(builds, 1);
        assert_eq!(cache.get(&GRASS), Some(&"grass"));
    }

    #[test]
    fn test_zoom_change_clears() {
        let mut cache = TileCache::new();
        cache.validate(1.0, TileSize::square(16));
        cache.get_or_insert_with(GRASS, || 1);
        cache.get_or_insert_with(WATER, || 2);

        assert!(!cache.validate(1.0, TileSize::square(16)));
        assert_eq!(cache.len(), 2);

        assert!(cache.validate(1.5, TileSize::square(16)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_tile_size_change_clears() {
        let mut cache = TileCache::new();
        cache.validate(2.0, TileSize::square(16));
        cache.get_or_insert_with(GRASS, || ());
        assert!(cache.validate(2.0, TileSize::square(32)));
        assert!(cache.get(&GRASS).is_none());
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let mut cache: TileCache<u8> = TileCache::new();
        assert!(cache.get_or_try_insert_with(GRASS, || None).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_try_insert_with(GRASS, || Some(7)), Some(&7));
    }
}
