//! Failure kinds of a pipeline run.
//!
//! Only `MissingInput` ends a run. The other variants are logged where they happen and
//! the offending record or URL is skipped.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{what} not found at {}", .path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    #[error("malformed comment record: {0}")]
    MalformedRecord(String),

    #[error("failed to fetch {url}: {reason}")]
    RemoteFetch { url: String, reason: String },
}

impl PipelineError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord(reason.into())
    }
}
