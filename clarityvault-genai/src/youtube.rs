/// YouTube video search
///
/// Thin proxy over the YouTube Data API v3 `search` endpoint. It returns
/// watch URLs for the two most relevant videos. There is no paging and no
/// caching.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{GenAiError, GenAiResult};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
const MAX_RESULTS: &str = "2";

/// Finds videos related to a topic
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Watch URLs, most relevant first
    async fn search(&self, title: &str, language: &str) -> GenAiResult<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> GenAiResult<Self> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, title: &str, language: &str) -> GenAiResult<Vec<String>> {
        let url = format!("{}/youtube/v3/search", self.base_url.trim_end_matches('/'));
        debug!(title = %title, language = %language, "Searching YouTube");

        let response = self
            .http
            .get(url)
            .query(&[
                ("part", "snippet"),
                ("q", title),
                ("type", "video"),
                ("maxResults", MAX_RESULTS),
                ("relevanceLanguage", language),
                ("order", "relevance"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let err = GenAiError::from_response(response).await;
            warn!(error = %err, "YouTube search failed");
            return Err(err);
        }

        let results: SearchListResponse = serde_json::from_str(&response.text().await?)?;

        Ok(results
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .map(|video_id| format!("{WATCH_URL_PREFIX}{video_id}"))
            .collect())
    }
}
