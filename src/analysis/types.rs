use crate::dataset::CommentRecord;

use super::sentiment::Sentiment;

/// A comment with its video's engagement counters; `None` when the video is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegratedRow {
    pub comment: CommentRecord,
    pub play_count: Option<i64>,
    pub digg_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRow {
    pub row: IntegratedRow,
    pub cleaned: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRow {
    pub row: CleanedRow,
    pub sentiment: Sentiment,
}

impl TaggedRow {
    pub fn cleaned(&self) -> &str {
        &self.row.cleaned
    }
}
