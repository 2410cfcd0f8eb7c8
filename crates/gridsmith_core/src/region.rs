//! Sprite-sheet regions and tile sizes

use serde::{Deserialize, Serialize};

/// A rectangle in sprite-sheet pixel space identifying one tile's source pixels
///
/// Serialized as `[x, y, w, h]`. Older files sometimes stored the components as
/// floats, so decoding accepts any JSON number and truncates toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[u32; 4]")]
pub struct TileRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRegion {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a region from two corner points in any order
    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Self {
        let x = a.0.min(b.0);
        let y = a.1.min(b.1);
        Self {
            x,
            y,
            width: a.0.max(b.0) - x,
            height: a.1.max(b.1) - y,
        }
    }

    /// Exclusive right edge, saturating at `u32::MAX`
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `u32::MAX`
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Clamp the region so it lies inside an image of the given size
    pub fn clamped_to(&self, image_width: u32, image_height: u32) -> Self {
        let x = self.x.min(image_width);
        let y = self.y.min(image_height);
        Self {
            x,
            y,
            width: self.right().min(image_width) - x,
            height: self.bottom().min(image_height) - y,
        }
    }

    /// Parse the string encoding used by the legacy format: `"(x, y, w, h)"`
    pub fn parse_tuple(text: &str) -> Option<Self> {
        let inner = text
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let mut parts = inner.split(',').map(|p| p.trim().parse::<f64>());
        let x = parts.next()?.ok()?;
        let y = parts.next()?.ok()?;
        let w = parts.next()?.ok()?;
        let h = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::from([x, y, w, h]))
    }
}

fn truncate_component(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

impl From<[f64; 4]> for TileRegion {
    fn from(v: [f64; 4]) -> Self {
        Self {
            x: truncate_component(v[0]),
            y: truncate_component(v[1]),
            width: truncate_component(v[2]),
            height: truncate_component(v[3]),
        }
    }
}

impl From<TileRegion> for [u32; 4] {
    fn from(r: TileRegion) -> Self {
        [r.x, r.y, r.width, r.height]
    }
}

/// Tile size in sheet pixels; both dimensions are always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[u32; 2]")]
pub struct TileSize {
    width: u32,
    height: u32,
}

impl TileSize {
    /// Size used by files that predate the `tile-size` field
    pub const LEGACY: TileSize = TileSize {
        width: 32,
        height: 32,
    };

    /// Create a tile size, clamping zero dimensions up to 1
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Double both dimensions
    pub fn scale_up(&self) -> Self {
        Self::new(self.width.saturating_mul(2), self.height.saturating_mul(2))
    }

    /// Halve both dimensions, never going below 1
    pub fn scale_down(&self) -> Self {
        Self::new(self.width / 2, self.height / 2)
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::LEGACY
    }
}

impl From<[f64; 2]> for TileSize {
    fn from(v: [f64; 2]) -> Self {
        Self::new(truncate_component(v[0]), truncate_component(v[1]))
    }
}

impl From<TileSize> for [u32; 2] {
    fn from(s: TileSize) -> Self {
        [s.width, s.height]
    }
}

impl std::fmt::Display for TileSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
