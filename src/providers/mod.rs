/*!
 * Upstream providers consulted by the study engine.
 *
 * This module contains the collaborator interfaces and their HTTP clients:
 * - `bible_api`: primary translation provider, one passage per translation
 * - `chapter_api`: secondary translation provider, whole chapters
 * - `commentary_api`: remote commentary by book and chapter
 * - `mock`: in-process provider used by the test suites
 */

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;

pub mod bible_api;
pub mod chapter_api;
pub mod commentary_api;
pub mod mock;

pub use bible_api::BibleApiClient;
pub use chapter_api::ChapterApiClient;
pub use commentary_api::CommentaryApiClient;
pub use mock::{MockBehavior, MockProvider};

/// One numbered verse of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseLine {
    pub verse: u32,
    pub text: String,
}

/// Passage text returned by a translation provider
#[derive(Debug, Clone, PartialEq)]
pub struct PassageText {
    /// Full passage text
    pub text: String,
    /// Short translation label, e.g. "KJV"
    pub version_label: String,
    /// Per-verse breakdown, when the provider supplies one
    pub verses: Vec<VerseLine>,
}

/// A whole chapter from a chapter-granular provider
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterText {
    /// Short translation label, e.g. "KJV"
    pub version_label: String,
    pub verses: Vec<VerseLine>,
}

/// Freeform commentary for a chapter
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCommentary {
    pub text: String,
    /// Attribution, when the provider names one
    pub source: Option<String>,
}

/// Translation provider serving any reference in several translations
#[async_trait]
pub trait VerseProvider: Send + Sync + Debug {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Fetch the passage for `reference` in the translation `translation`
    async fn fetch_passage(&self, reference: &str, translation: &str) -> Result<PassageText, ProviderError>;
}

/// Translation provider serving a single translation one chapter at a time
#[async_trait]
pub trait ChapterProvider: Send + Sync + Debug {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Fetch every verse of `chapter` in the book identified by `book_code`
    async fn fetch_chapter(&self, book_code: &str, chapter: u32) -> Result<ChapterText, ProviderError>;
}

/// Commentary provider keyed by book name and chapter
#[async_trait]
pub trait CommentaryProvider: Send + Sync + Debug {
    /// Name used in diagnostics and as the commentary map key
    fn name(&self) -> &str;

    /// Fetch commentary for a chapter of `book` (display name, e.g. "John")
    async fn fetch_commentary(&self, book: &str, chapter: u32) -> Result<RemoteCommentary, ProviderError>;
}

/// Build the HTTP client shared by one provider, with a per-request timeout
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("scripture-study/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

/// GET `url` and decode a JSON body, mapping non-success statuses to errors
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: url::Url, provider: &str) -> Result<T, ProviderError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("{} API error ({}): {}", provider, status, error_text);
        return Err(ProviderError::ApiError {
            status_code: status.as_u16(),
            message: error_text,
        });
    }

    response.json::<T>().await
        .map_err(|e| ProviderError::ParseError(format!("{} response: {}", provider, e)))
}

/// Parse an endpoint and append path segments, percent-encoding each one
pub(crate) fn endpoint_url(endpoint: &str, segments: &[&str]) -> Result<url::Url, ProviderError> {
    let mut url = url::Url::parse(endpoint)
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

    url.path_segments_mut()
        .map_err(|_| ProviderError::RequestFailed(format!("Endpoint '{}' cannot take a path", endpoint)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
