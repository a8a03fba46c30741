use serde_json::{Map, Value};
use tracing::warn;

use super::types::{count_from_value, is_truthy, kind_of, text_from_value, CommentRecord, RawComment};
use crate::error::PipelineError;

/// How a comment reached us, which decides where its `videoUrl` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOrigin {
    /// Embedded in the video record; always uses the parent's URL.
    Inline,
    /// Downloaded from a comments dataset; may carry its own video URL.
    Remote,
}

/// Identity of the video a comment belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ParentVideo<'a> {
    pub id: &'a str,
    pub url: Option<&'a str>,
}

/// One attempt in a fallback chain.
#[derive(Debug, Clone, Copy)]
enum Accessor {
    Key(&'static str),
    /// `parent.key`; a non-object parent is ignored unless `strict`.
    Nested {
        parent: &'static str,
        key: &'static str,
        strict: bool,
    },
}

use Accessor::{Key, Nested};

const CID: &[Accessor] = &[Key("cid"), Key("id")];
const AUTHOR: &[Accessor] = &[
    Key("authorName"),
    Key("uniqueId"),
    Nested { parent: "authorMeta", key: "nickName", strict: false },
];
const TEXT: &[Accessor] = &[
    Key("text"),
    Nested { parent: "input", key: "text", strict: true },
];
const OWN_VIDEO_URL: &[Accessor] = &[Key("videoWebUrl"), Key("webVideoUrl")];
const LIKES: &[Accessor] = &[Key("diggCount"), Key("likes")];
const REPLY_COUNT: &[Accessor] = &[Key("replyCommentTotal")];
const TIME: &[Accessor] = &[Key("createTime"), Key("createTimeISO")];

/// Build a `CommentRecord` from a raw entry, or `None` when the entry has to be dropped.
pub fn normalize(raw: RawComment, parent: ParentVideo<'_>, origin: CommentOrigin) -> Option<CommentRecord> {
    match try_normalize(raw, parent, origin) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Skipping comment of video {}: {}", parent.id, e);
            None
        }
    }
}

pub fn try_normalize(
    raw: RawComment,
    parent: ParentVideo<'_>,
    origin: CommentOrigin,
) -> Result<CommentRecord, PipelineError> {
    let map = raw.into_mapping()?;

    let video_url = match origin {
        CommentOrigin::Inline => parent.url.map(str::to_owned),
        CommentOrigin::Remote => text_field(&map, "videoUrl", OWN_VIDEO_URL)?.or_else(|| parent.url.map(str::to_owned)),
    };

    Ok(CommentRecord {
        cid: text_field(&map, "cid", CID)?,
        video_id: parent.id.to_owned(),
        video_url,
        author: text_field(&map, "author", AUTHOR)?,
        text: text_field(&map, "text", TEXT)?,
        likes: count_field(&map, "likes", LIKES)?,
        reply_count: count_field(&map, "reply_count", REPLY_COUNT)?,
        time: text_field(&map, "time", TIME)?,
    })
}

/// First truthy value along `chain`.
fn resolve<'a>(map: &'a Map<String, Value>, chain: &[Accessor]) -> Result<Option<&'a Value>, PipelineError> {
    for accessor in chain {
        let value = match *accessor {
            Key(key) => map.get(key),
            Nested { parent, key, strict } => match map.get(parent) {
                Some(Value::Object(inner)) => inner.get(key),
                Some(other) if strict && is_truthy(other) => {
                    return Err(PipelineError::malformed(format!(
                        "`{}` is {}, expected an object",
                        parent,
                        kind_of(other)
                    )))
                }
                _ => None,
            },
        };

        if let Some(value) = value.filter(|v| is_truthy(v)) {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn text_field(map: &Map<String, Value>, field: &str, chain: &[Accessor]) -> Result<Option<String>, PipelineError> {
    resolve(map, chain)?
        .map(|value| {
            text_from_value(value).ok_or_else(|| {
                PipelineError::malformed(format!("`{}` is {}, expected text", field, kind_of(value)))
            })
        })
        .transpose()
}

fn count_field(map: &Map<String, Value>, field: &str, chain: &[Accessor]) -> Result<i64, PipelineError> {
    match resolve(map, chain)? {
        Some(value) => count_from_value(value).ok_or_else(|| {
            PipelineError::malformed(format!("`{}` is {}, expected an integer", field, kind_of(value)))
        }),
        None => Ok(0),
    }
}
