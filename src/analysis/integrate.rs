use std::collections::HashMap;
use tracing::info;

use super::types::IntegratedRow;
use crate::dataset::{CommentRecord, VideoRecord};

#[derive(Debug, Clone, Copy)]
struct Engagement {
    play_count: Option<i64>,
    digg_count: Option<i64>,
}

/// Left join of comments onto video metadata by video id. Every comment yields one row.
pub fn integrate(comments: Vec<CommentRecord>, metadata: &[VideoRecord]) -> Vec<IntegratedRow> {
    let mut by_video: HashMap<String, Engagement> = HashMap::with_capacity(metadata.len());
    for video in metadata {
        let Some(id) = video.id.as_deref() else {
            continue;
        };
        // later duplicates do not override the first entry
        by_video.entry(join_key(id)).or_insert(Engagement {
            play_count: video.play_count,
            digg_count: video.digg_count,
        });
    }

    let rows: Vec<IntegratedRow> = comments
        .into_iter()
        .map(|comment| {
            let engagement = by_video.get(&join_key(&comment.video_id));
            IntegratedRow {
                play_count: engagement.and_then(|e| e.play_count),
                digg_count: engagement.and_then(|e| e.digg_count),
                comment,
            }
        })
        .collect();

    let matched = rows.iter().filter(|r| r.play_count.is_some() || r.digg_count.is_some()).count();
    info!("Integrated {} rows ({} with video metadata)", rows.len(), matched);
    rows
}

/// Ids arrive as JSON numbers on one side and CSV text on the other.
fn join_key(id: &str) -> String {
    id.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comment(video_id: &str) -> CommentRecord {
        CommentRecord {
            video_id: video_id.into(),
            ..CommentRecord::default()
        }
    }

    fn metadata() -> Vec<VideoRecord> {
        serde_json::from_value(json!([
            {"id": 7312345678901234567u64, "playCount": 1000, "diggCount": 50},
            {"id": "abc", "playCount": 5},
            {"playCount": 99}
        ]))
        .unwrap()
    }

    #[test]
    fn test_numeric_and_text_ids_join() {
        let rows = integrate(vec![comment("7312345678901234567"), comment(" abc ")], &metadata());
        assert_eq!(rows[0].play_count, Some(1000));
        assert_eq!(rows[0].digg_count, Some(50));
        assert_eq!(rows[1].play_count, Some(5));
        assert_eq!(rows[1].digg_count, None);
    }

    #[test]
    fn test_unmatched_rows_are_kept_with_empty_counters() {
        let rows = integrate(vec![comment("nope"), comment("")], &metadata());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.play_count.is_none() && r.digg_count.is_none()));
        assert_eq!(rows[0].comment.video_id, "nope");
    }

    #[test]
    fn test_row_count_always_matches_comment_count() {
        let comments: Vec<_> = ["abc", "x", "abc", "7312345678901234567", "y"]
            .iter()
            .map(|id| comment(id))
            .collect();
        assert_eq!(integrate(comments.clone(), &metadata()).len(), comments.len());
        assert_eq!(integrate(comments.clone(), &[]).len(), comments.len());
        assert!(integrate(Vec::new(), &metadata()).is_empty());
    }

    #[test]
    fn test_duplicate_video_ids_use_first_entry() {
        let metadata: Vec<VideoRecord> = serde_json::from_value(json!([
            {"id": "1", "playCount": 1},
            {"id": 1, "playCount": 2}
        ]))
        .unwrap();
        let rows = integrate(vec![comment("1")], &metadata);
        assert_eq!(rows[0].play_count, Some(1));
    }
}
