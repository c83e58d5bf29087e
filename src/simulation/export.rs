//! Export of the recent detections log as JSON

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use super::records::DetectionRecord;
use super::types::EXPORT_FILE_NAME;
use super::world::SimWorld;

/// Pretty-print detections, newest first. An empty log yields `[]`.
pub fn detections_to_json(detections: &[DetectionRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(detections)
}

/// Write the world's recent detections to `dir/vehicle_detections_log.json`
pub fn export_detections(world: &SimWorld, dir: &Path) -> Result<PathBuf> {
    let detections = world.recent_detections.to_vec();
    let json = detections_to_json(&detections).context("Failed to serialize detections")?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write detections log to {}", path.display()))?;

    info!(
        "Exported {} detections to {}",
        detections.len(),
        path.display()
    );
    Ok(path)
}
