//! Error types for tile lookups and the project file format

/// Lookup failures in the tile model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    NotFound { group: String, tile: String },
    GroupNotFound(String),
}

impl std::fmt::Display for TileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileError::NotFound { group, tile } => {
                write!(f, "Tile '{}' not found in group '{}'", tile, group)
            }
            TileError::GroupNotFound(name) => write!(f, "Tile group '{}' not found", name),
        }
    }
}

impl std::error::Error for TileError {}

/// Errors raised while reading or writing a project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    Io(String),
    Parse(String),
    UnsupportedFormat(String),
    Serialize(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Io(e) => write!(f, "IO error: {}", e),
            FormatError::Parse(e) => write!(f, "Parse error: {}", e),
            FormatError::UnsupportedFormat(v) => write!(f, "Unsupported format version '{}'", v),
            FormatError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for FormatError {}
