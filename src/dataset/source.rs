use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::types::{kind_of, VideoRecord};
use crate::config::DataConfig;
use crate::error::PipelineError;

/// Locate the scraper export: the configured file next to or inside the data directory,
/// otherwise the first `*.json` in the data directory.
pub fn find_dataset(data: &DataConfig) -> Result<PathBuf, PipelineError> {
    let parent = data.dir.parent().unwrap_or_else(|| Path::new("."));
    for dir in [parent, data.dir.as_path()] {
        let candidate = dir.join(&data.dataset_file);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    match first_json_file(&data.dir) {
        Some(path) => {
            warn!(
                "{} not found, using substitute dataset {}",
                data.dataset_file,
                path.display()
            );
            Ok(path)
        }
        None => Err(PipelineError::MissingInput {
            what: "video dataset (JSON)",
            path: data.dir.join(&data.dataset_file),
        }),
    }
}

fn first_json_file(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Read the video list. Entries that are not video-shaped objects are skipped.
pub fn load_videos(path: &Path) -> Result<Vec<VideoRecord>> {
    info!("Reading videos from {}", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let entries = match document {
        Value::Array(entries) => entries,
        other => anyhow::bail!(
            "{} holds {}, expected a list of videos",
            path.display(),
            kind_of(&other)
        ),
    };

    let mut videos = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!("Skipping video entry #{}: {} is not an object", i, kind_of(&entry));
            continue;
        }
        match serde_json::from_value::<VideoRecord>(entry) {
            Ok(video) => videos.push(video),
            Err(e) => warn!("Skipping video entry #{}: {}", i, e),
        }
    }

    info!("Loaded {} videos", videos.len());
    Ok(videos)
}
