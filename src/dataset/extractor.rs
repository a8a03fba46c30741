use tracing::{debug, info, warn};

use super::fetch::RemoteFetchCache;
use super::normalize::{normalize, CommentOrigin, ParentVideo};
use super::types::{CommentRecord, CommentSource, RawComment, VideoRecord};

/// Flatten every video's comments into canonical records, in video order then source order.
pub async fn extract(videos: &[VideoRecord], cache: &mut RemoteFetchCache) -> Vec<CommentRecord> {
    info!("Extracting comments from {} videos", videos.len());

    let mut comments = Vec::new();
    let total = videos.len();

    for (i, video) in videos.iter().enumerate() {
        let video_id = video.video_id();
        let parent = ParentVideo {
            id: &video_id,
            url: video.parent_url(),
        };

        let before = comments.len();
        match video.comment_source() {
            CommentSource::Inline(entries) => {
                comments.extend(entries.iter().filter_map(|entry| {
                    normalize(RawComment::from(entry.clone()), parent, CommentOrigin::Inline)
                }));
            }
            CommentSource::Remote(url) => {
                info!("Downloading comments for video {}/{}", i + 1, total);
                let entries = cache.fetch(url).await;
                comments.extend(entries.iter().filter_map(|entry| {
                    normalize(RawComment::from(entry.clone()), parent, CommentOrigin::Remote)
                }));
            }
            CommentSource::InlineMalformed => {
                warn!("Video {} has a `comments` field that is not a list, skipping", video_id);
            }
            CommentSource::None => {}
        }

        debug!("Video {} contributed {} comments", video_id, comments.len() - before);
    }

    info!(
        "Extracted {} comments ({} dataset downloads)",
        comments.len(),
        cache.requests_sent()
    );
    comments
}
