use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::PipelineError;

/// One scraped video as found in the scraper export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub play_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub digg_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub web_video_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub video_web_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub submitted_video_url: Option<String>,
    #[serde(default)]
    pub comments: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub comments_dataset_url: Option<String>,
}

/// Where a video's comments come from.
#[derive(Debug)]
pub enum CommentSource<'a> {
    Inline(&'a [Value]),
    /// `comments` is set but is not a list.
    InlineMalformed,
    Remote(&'a str),
    None,
}

impl VideoRecord {
    pub fn video_id(&self) -> String {
        self.id.clone().unwrap_or_default()
    }

    pub fn parent_url(&self) -> Option<&str> {
        [&self.web_video_url, &self.video_web_url, &self.submitted_video_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.is_empty())
    }

    pub fn comment_source(&self) -> CommentSource<'_> {
        match &self.comments {
            Some(Value::Array(entries)) if !entries.is_empty() => CommentSource::Inline(entries),
            Some(value) if is_truthy(value) => CommentSource::InlineMalformed,
            _ => match self.comments_dataset_url.as_deref() {
                Some(url) if !url.is_empty() => CommentSource::Remote(url),
                _ => CommentSource::None,
            },
        }
    }
}

/// An untyped comment entry before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawComment {
    Mapping(Map<String, Value>),
    EncodedText(String),
    RawBytes(Vec<u8>),
    Unrecognized(Value),
}

impl From<Value> for RawComment {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RawComment::Mapping(map),
            Value::String(text) => RawComment::EncodedText(text),
            Value::Array(items) => match byte_values(&items) {
                Some(bytes) => RawComment::RawBytes(bytes),
                None => RawComment::Unrecognized(Value::Array(items)),
            },
            other => RawComment::Unrecognized(other),
        }
    }
}

impl RawComment {
    /// Coerce into a JSON object. Bytes are decoded lossily, text is parsed as JSON.
    pub fn into_mapping(self) -> Result<Map<String, Value>, PipelineError> {
        let text = match self {
            RawComment::Mapping(map) => return Ok(map),
            RawComment::EncodedText(text) => text,
            RawComment::RawBytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            RawComment::Unrecognized(value) => {
                return Err(PipelineError::malformed(format!(
                    "unsupported comment shape: {}",
                    kind_of(&value)
                )))
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(PipelineError::malformed(format!(
                "encoded comment decodes to {}, not an object",
                kind_of(&other)
            ))),
            Err(e) => Err(PipelineError::malformed(format!("encoded comment is not JSON: {}", e))),
        }
    }
}

fn byte_values(items: &[Value]) -> Option<Vec<u8>> {
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
        .collect()
}

/// Canonical comment row, also the CSV layout (column order follows field order).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommentRecord {
    pub cid: Option<String>,
    #[serde(rename = "videoId")]
    pub video_id: String,
    #[serde(rename = "videoUrl")]
    pub video_url: Option<String>,
    pub author: Option<String>,
    pub text: Option<String>,
    pub likes: i64,
    pub reply_count: i64,
    pub time: Option<String>,
}

/// Scraper-style truthiness: null, "", 0, false and empty containers count as missing.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Integer counts as the scraper writes them: ints, integral floats or numeric strings.
pub fn count_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .filter(|v| !v.is_boolean())
        .and_then(text_from_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video(value: Value) -> VideoRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_video_parses_numeric_id_and_lenient_counts() {
        let v = video(json!({
            "id": 7312345678901234567u64,
            "playCount": "1500",
            "diggCount": 42.0,
            "webVideoUrl": "https://www.tiktok.com/@a/video/1"
        }));
        assert_eq!(v.video_id(), "7312345678901234567");
        assert_eq!(v.play_count, Some(1500));
        assert_eq!(v.digg_count, Some(42));
    }

    #[test]
    fn test_video_ignores_unusable_counts() {
        let v = video(json!({"id": "1", "playCount": {"n": 1}, "diggCount": null}));
        assert_eq!(v.play_count, None);
        assert_eq!(v.digg_count, None);
    }

    #[test]
    fn test_parent_url_fallback_order() {
        let v = video(json!({"videoWebUrl": "b", "submittedVideoUrl": "c"}));
        assert_eq!(v.parent_url(), Some("b"));

        let v = video(json!({"webVideoUrl": "", "submittedVideoUrl": "c"}));
        assert_eq!(v.parent_url(), Some("c"));

        let v = video(json!({"webVideoUrl": "a", "videoWebUrl": "b"}));
        assert_eq!(v.parent_url(), Some("a"));

        assert_eq!(video(json!({})).parent_url(), None);
    }

    #[test]
    fn test_comment_source_prefers_inline_comments() {
        let v = video(json!({"comments": [{"text": "hi"}], "commentsDatasetUrl": "http://x"}));
        assert!(matches!(v.comment_source(), CommentSource::Inline(entries) if entries.len() == 1));

        let v = video(json!({"comments": [], "commentsDatasetUrl": "http://x"}));
        assert!(matches!(v.comment_source(), CommentSource::Remote("http://x")));

        let v = video(json!({"comments": "oops"}));
        assert!(matches!(v.comment_source(), CommentSource::InlineMalformed));

        let v = video(json!({"commentsDatasetUrl": ""}));
        assert!(matches!(v.comment_source(), CommentSource::None));
    }

    #[test]
    fn test_raw_comment_from_json_shapes() {
        assert!(matches!(RawComment::from(json!({"a": 1})), RawComment::Mapping(_)));
        assert!(matches!(RawComment::from(json!("{}")), RawComment::EncodedText(_)));
        assert!(matches!(RawComment::from(json!([123, 125])), RawComment::RawBytes(_)));
        assert!(matches!(RawComment::from(json!([1, 300])), RawComment::Unrecognized(_)));
        assert!(matches!(RawComment::from(json!(5)), RawComment::Unrecognized(_)));
    }

    #[test]
    fn test_into_mapping_decodes_text_and_bytes() {
        let map = RawComment::from(json!(r#"{"text": "xin chào"}"#))
            .into_mapping()
            .unwrap();
        assert_eq!(map["text"], "xin chào");

        let map = RawComment::RawBytes(br#"{"cid": "9"}"#.to_vec()).into_mapping().unwrap();
        assert_eq!(map["cid"], "9");
    }

    #[test]
    fn test_into_mapping_replaces_invalid_utf8() {
        let mut bytes = br#"{"text": "a"#.to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(br#""}"#);
        let map = RawComment::RawBytes(bytes).into_mapping().unwrap();
        assert_eq!(map["text"], "a\u{fffd}");
    }

    #[test]
    fn test_into_mapping_rejects_non_objects() {
        assert!(RawComment::from(json!("not json")).into_mapping().is_err());
        assert!(RawComment::from(json!("[1, 2]")).into_mapping().is_err());
        assert!(RawComment::from(json!(null)).into_mapping().is_err());
        assert!(RawComment::from(json!(true)).into_mapping().is_err());
    }

    #[test]
    fn test_truthiness() {
        for value in [json!(null), json!(""), json!(0), json!(0.0), json!(false), json!([]), json!({})] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
        for value in [json!("x"), json!(1), json!(true), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
    }

    #[test]
    fn test_count_from_value() {
        assert_eq!(count_from_value(&json!(12)), Some(12));
        assert_eq!(count_from_value(&json!(" 7 ")), Some(7));
        assert_eq!(count_from_value(&json!(3.0)), Some(3));
        assert_eq!(count_from_value(&json!(3.5)), None);
        assert_eq!(count_from_value(&json!("many")), None);
        assert_eq!(count_from_value(&json!([1])), None);
    }
}
