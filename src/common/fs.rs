use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::common::{read_features, write_features};
use crate::feature::Feature;

/// Read GeoJSON features from a file.
pub fn read_features_from_path(path: &Path) -> Result<Vec<Feature>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    read_features(&bytes)
        .with_context(|| format!("Failed to read features from {}", path.display()))
}

/// Write features to a file as a GeoJSON FeatureCollection, creating parent
/// directories as needed.
pub fn write_features_to_path(path: &Path, features: &[Feature]) -> Result<()> {
    ensure_parent_exists(path)?;
    fs::write(path, write_features(features)?)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Serialize `value` as pretty JSON to a file, creating parent directories as needed.
pub fn write_json_to_path<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_exists(path)?;
    let bytes = serde_json::to_vec_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Create the parent directory of `path` if it doesn't exist; error if a non-directory exists there.
fn ensure_parent_exists(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else { return Ok(()) };
    if parent.exists() {
        if !parent.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", parent.display());
        }
    } else {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
