use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::providers::{PassageText, VerseLine, VerseProvider, endpoint_url, get_json, http_client};

/// Client for the primary translation API (bible-api.com shape)
///
/// `GET {endpoint}/{reference}?translation={code}`
#[derive(Debug, Clone)]
pub struct BibleApiClient {
    /// HTTP client for API requests
    client: Client,
    /// API base URL
    endpoint: String,
}

/// Passage response body
#[derive(Debug, Deserialize)]
pub struct BibleApiResponse {
    /// Combined passage text
    #[serde(default)]
    pub text: String,
    /// Translation identifier, e.g. "kjv"
    #[serde(default)]
    pub translation_id: Option<String>,
    /// Per-verse breakdown
    #[serde(default)]
    pub verses: Vec<BibleApiVerse>,
}

/// Individual verse in a passage response
#[derive(Debug, Deserialize)]
pub struct BibleApiVerse {
    pub verse: u32,
    pub text: String,
}

impl BibleApiClient {
    /// Create a new client with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            endpoint: endpoint.into(),
        }
    }

    /// URL of a passage lookup
    pub fn passage_url(&self, reference: &str, translation: &str) -> Result<url::Url, ProviderError> {
        let mut url = endpoint_url(&self.endpoint, &[reference.trim()])?;
        url.query_pairs_mut().append_pair("translation", translation);
        Ok(url)
    }

    /// Convert a response body into passage text
    pub fn into_passage(response: BibleApiResponse, reference: &str, translation: &str) -> Result<PassageText, ProviderError> {
        let text = response.text.trim().to_string();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse(format!("{} ({})", reference, translation)));
        }

        let version_label = response.translation_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| translation.to_string())
            .to_uppercase();

        let verses = response.verses.into_iter()
            .map(|v| VerseLine { verse: v.verse, text: v.text.trim().to_string() })
            .collect();

        Ok(PassageText { text, version_label, verses })
    }
}

#[async_trait]
impl VerseProvider for BibleApiClient {
    fn name(&self) -> &str {
        "bible-api"
    }

    async fn fetch_passage(&self, reference: &str, translation: &str) -> Result<PassageText, ProviderError> {
        let url = self.passage_url(reference, translation)?;
        let response: BibleApiResponse = get_json(&self.client, url, self.name()).await?;
        Self::into_passage(response, reference, translation)
    }
}
