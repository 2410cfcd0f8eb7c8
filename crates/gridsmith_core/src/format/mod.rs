//! Versioned `.world` project files
//!
//! A file carries its format version as a string field. Loading dispatches on
//! that field to a per-version decoder; every decoder produces the same
//! [`MapProject`]. Saving always writes the current version, so opening an old
//! file and saving it upgrades it.

mod legacy;
mod v1;

use crate::error::FormatError;
use crate::project::MapProject;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Version written by [`to_string`] and [`save_path`]
pub const CURRENT_VERSION: &str = "1.0.0";

/// Version assumed for files without a `version` field
pub const LEGACY_VERSION: &str = "? 0.12";

/// Known file format versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// Single implicit group, flat string-encoded tiles, one layer, 32x32 tiles
    Legacy,
    /// Named groups with matrices, multiple named layers
    V1,
}

impl FormatVersion {
    /// Match a version string; an empty string means legacy
    pub fn parse(version: &str) -> Option<Self> {
        match version.trim() {
            "" | LEGACY_VERSION => Some(FormatVersion::Legacy),
            CURRENT_VERSION => Some(FormatVersion::V1),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatVersion::Legacy => LEGACY_VERSION,
            FormatVersion::V1 => CURRENT_VERSION,
        }
    }
}

/// Load a project, detecting the version from the file
pub fn load_str(text: &str) -> Result<MapProject, FormatError> {
    load_with_version(text, None)
}

/// Load a project, optionally forcing the decoder version
///
/// Nothing is returned unless the whole file decodes.
pub fn load_with_version(text: &str, forced: Option<&str>) -> Result<MapProject, FormatError> {
    let value: Value = serde_json::from_str(text).map_err(|e| FormatError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(FormatError::Parse("project file must be a JSON object".to_string()));
    }

    let detected = match value.get("version") {
        None => LEGACY_VERSION.to_string(),
        Some(Value::String(version)) => version.clone(),
        Some(other) => other.to_string(),
    };
    let version = forced.map(str::to_string).unwrap_or(detected);

    let project = match FormatVersion::parse(&version) {
        Some(FormatVersion::V1) => {
            debug!("Version matched ({})", CURRENT_VERSION);
            v1::decode(value)?
        }
        Some(FormatVersion::Legacy) => {
            debug!("Version matched ({})", LEGACY_VERSION);
            legacy::decode(value)?
        }
        None => {
            warn!("Unsupported project version '{}'", version);
            return Err(FormatError::UnsupportedFormat(version));
        }
    };

    info!(
        "Loaded project: {} groups, {} layers",
        project.groups.len(),
        project.layer_count()
    );
    Ok(project)
}

/// Read and decode a project file
pub fn load_path(path: &Path) -> Result<MapProject, FormatError> {
    let content = std::fs::read_to_string(path).map_err(|e| FormatError::Io(e.to_string()))?;
    load_str(&content)
}

/// Encode a project in the current format
pub fn to_string(project: &MapProject) -> Result<String, FormatError> {
    let file = v1::encode(project);
    serde_json::to_string_pretty(&file).map_err(|e| FormatError::Serialize(e.to_string()))
}

/// Encode a project and write it to `path`
pub fn save_path(project: &MapProject, path: &Path) -> Result<(), FormatError> {
    let content = to_string(project)?;
    std::fs::write(path, content).map_err(|e| FormatError::Io(e.to_string()))?;
    info!("Saved project to {:?}", path);
    Ok(())
}

/// Parse a `"x,y"` grid key; components may be written as floats
pub(crate) fn parse_cell_key(key: &str) -> Result<(i32, i32), FormatError> {
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i32)
    };
    key.split_once(',')
        .and_then(|(x, y)| Some((parse(x)?, parse(y)?)))
        .ok_or_else(|| FormatError::Parse(format!("invalid grid key '{}'", key)))
}

pub(crate) fn cell_key(cell: (i32, i32)) -> String {
    format!("{},{}", cell.0, cell.1)
}
