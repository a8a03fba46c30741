use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::dataset::CommentRecord;
use crate::error::PipelineError;

/// Load a comment table written by `CommentWriter`. Rows that do not parse are skipped.
pub fn read_comments(path: &Path) -> Result<Vec<CommentRecord>> {
    if !path.is_file() {
        return Err(PipelineError::MissingInput {
            what: "comment table (CSV)",
            path: path.to_path_buf(),
        }
        .into());
    }

    info!("Reading comments from {}", path.display());
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut comments = Vec::new();
    for (i, row) in reader.deserialize::<CommentRecord>().enumerate() {
        match row {
            Ok(comment) => comments.push(comment),
            // +2: header line and 1-based numbering
            Err(e) => warn!("Skipping CSV row {}: {}", i + 2, e),
        }
    }

    info!("Read {} comments", comments.len());
    Ok(comments)
}
