use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::providers::{CommentaryProvider, RemoteCommentary, endpoint_url, get_json, http_client};

/// Client for the remote commentary API
///
/// `GET {endpoint}/{book}/{chapter}`; a 404 means the chapter has no
/// commentary and is reported as an empty response.
#[derive(Debug, Clone)]
pub struct CommentaryApiClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentaryApiResponse {
    #[serde(default, alias = "commentary")]
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
}

impl CommentaryApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            endpoint: endpoint.into(),
        }
    }

    pub fn commentary_url(&self, book: &str, chapter: u32) -> Result<url::Url, ProviderError> {
        let chapter = chapter.to_string();
        endpoint_url(&self.endpoint, &[book, chapter.as_str()])
    }
}

#[async_trait]
impl CommentaryProvider for CommentaryApiClient {
    fn name(&self) -> &str {
        "commentary-api"
    }

    async fn fetch_commentary(&self, book: &str, chapter: u32) -> Result<RemoteCommentary, ProviderError> {
        let url = self.commentary_url(book, chapter)?;
        let response: CommentaryApiResponse = match get_json(&self.client, url, self.name()).await {
            Ok(response) => response,
            Err(ProviderError::ApiError { status_code: 404, .. }) => {
                return Err(ProviderError::EmptyResponse(format!("{} {}", book, chapter)));
            }
            Err(e) => return Err(e),
        };

        let text = response.text.trim();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse(format!("{} {}", book, chapter)));
        }

        Ok(RemoteCommentary {
            text: text.to_string(),
            source: response.source.filter(|s| !s.trim().is_empty()),
        })
    }
}
