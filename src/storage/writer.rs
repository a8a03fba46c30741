use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dataset::CommentRecord;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the flat comment table that the analysis stage reads back.
pub struct CommentWriter {
    path: PathBuf,
}

impl CommentWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file with `comments`, BOM-prefixed so spreadsheet tools pick UTF-8.
    pub fn write(&self, comments: &[CommentRecord]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).context("Failed to create data directory")?;
        }

        let mut file = std::fs::File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        file.write_all(UTF8_BOM).context("Failed to write byte order mark")?;

        let mut writer = csv::Writer::from_writer(file);
        if comments.is_empty() {
            writer
                .write_record(HEADER)
                .context("Failed to write CSV header")?;
        }
        for comment in comments {
            writer
                .serialize(comment)
                .context("Failed to write comment row")?;
        }
        writer.flush().context("Failed to flush CSV file")?;

        info!("Saved {} comments to {}", comments.len(), self.path.display());
        Ok(())
    }
}

/// Column order of the comment table.
pub const HEADER: [&str; 8] = [
    "cid",
    "videoId",
    "videoUrl",
    "author",
    "text",
    "likes",
    "reply_count",
    "time",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CommentRecord {
        CommentRecord {
            cid: Some("7300".into()),
            video_id: "v1".into(),
            video_url: Some("https://t/v1".into()),
            author: None,
            text: Some("hay, \"quá\"\nluôn".into()),
            likes: 3,
            reply_count: 0,
            time: Some("1707140000".into()),
        }
    }

    #[test]
    fn test_writes_bom_header_and_quoted_rows() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CommentWriter::new(dir.path().join("nested").join("comments.csv"));
        writer.write(&[sample()]).unwrap();

        let bytes = std::fs::read(writer.path()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("7300,v1,https://t/v1,,\"hay, \"\"quá\"\"")
        );
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CommentWriter::new(dir.path().join("comments.csv"));
        writer.write(&[]).unwrap();

        let text = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(text.trim_start_matches('\u{feff}').trim_end(), HEADER.join(","));
    }
}
