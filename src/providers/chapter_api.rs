use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::providers::{ChapterProvider, ChapterText, VerseLine, endpoint_url, get_json, http_client};

/// Client for the secondary, chapter-granular translation API
///
/// `GET {endpoint}/{translation}/{book code}/{chapter}` serving one fixed
/// translation.
#[derive(Debug, Clone)]
pub struct ChapterApiClient {
    client: Client,
    endpoint: String,
    /// Translation identifier sent to the API
    translation: String,
    /// Label reported on results
    label: String,
}

/// The API answers either `{ "verses": [...] }` or a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChapterApiResponse {
    Wrapped { verses: Vec<VerseLine> },
    Bare(Vec<VerseLine>),
}

impl ChapterApiResponse {
    fn into_verses(self) -> Vec<VerseLine> {
        match self {
            Self::Wrapped { verses } | Self::Bare(verses) => verses,
        }
    }
}

impl ChapterApiClient {
    pub fn new(endpoint: impl Into<String>, translation: impl Into<String>, label: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            endpoint: endpoint.into(),
            translation: translation.into(),
            label: label.into(),
        }
    }

    /// URL of a chapter lookup
    pub fn chapter_url(&self, book_code: &str, chapter: u32) -> Result<url::Url, ProviderError> {
        let chapter = chapter.to_string();
        endpoint_url(&self.endpoint, &[self.translation.as_str(), book_code, chapter.as_str()])
    }
}

#[async_trait]
impl ChapterProvider for ChapterApiClient {
    fn name(&self) -> &str {
        "chapter-api"
    }

    async fn fetch_chapter(&self, book_code: &str, chapter: u32) -> Result<ChapterText, ProviderError> {
        let url = self.chapter_url(book_code, chapter)?;
        let response: ChapterApiResponse = get_json(&self.client, url, self.name()).await?;

        let verses = response.into_verses();
        if verses.is_empty() {
            return Err(ProviderError::EmptyResponse(format!("{} {}", book_code, chapter)));
        }

        Ok(ChapterText {
            version_label: self.label.clone(),
            verses,
        })
    }
}
