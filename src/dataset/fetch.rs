use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::kind_of;
use crate::config::FetchConfig;
use crate::error::PipelineError;

/// Downloads remote comment datasets, at most once per URL for the lifetime of the cache.
///
/// Failed downloads are remembered as empty lists, so a broken URL is not retried
/// when another video points at it.
pub struct RemoteFetchCache {
    client: Client,
    delay: Duration,
    cache: HashMap<String, Vec<Value>>,
    requests_sent: usize,
}

impl RemoteFetchCache {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid fetch.user_agent")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(&config.accept).context("Invalid fetch.accept")?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            delay: config.delay(),
            cache: HashMap::new(),
            requests_sent: 0,
        })
    }

    /// Comment entries behind `url`; empty when the download failed.
    pub async fn fetch(&mut self, url: &str) -> &[Value] {
        if !self.cache.contains_key(url) {
            let items = match self.download(url).await {
                Ok(payload) => comment_items(url, payload),
                Err(e) => {
                    warn!("{}", e);
                    Vec::new()
                }
            };
            self.cache.insert(url.to_string(), items);
        } else {
            debug!("Serving {} from cache", url);
        }

        self.cache.get(url).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn requests_sent(&self) -> usize {
        self.requests_sent
    }

    async fn download(&mut self, url: &str) -> Result<Value, PipelineError> {
        tokio::time::sleep(self.delay).await;
        self.requests_sent += 1;

        let remote_error = |reason: String| PipelineError::RemoteFetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| remote_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(remote_error(format!("server returned {}", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| remote_error(format!("invalid JSON body: {}", e)))
    }
}

/// The comment list inside a dataset payload: either the payload itself or its `items`.
fn comment_items(url: &str, payload: Value) -> Vec<Value> {
    let payload = match payload {
        Value::Object(mut map) if map.contains_key("items") => map.remove("items").unwrap_or(Value::Null),
        other => other,
    };

    match payload {
        Value::Array(items) => items,
        other => {
            warn!("Dataset {} is {}, expected a list of comments", url, kind_of(&other));
            Vec::new()
        }
    }
}
