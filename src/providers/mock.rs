/*!
 * Mock provider implementations for testing.
 *
 * A single [`MockProvider`] stands in for every upstream collaborator:
 * - `MockProvider::working()` - Always succeeds with synthetic text
 * - `MockProvider::failing()` - Always fails with an API error
 * - `MockProvider::empty()` - Answers with nothing
 * - `MockProvider::slow(ms)` - Succeeds after a delay
 *
 * Every call is counted so tests can assert that the cache prevented a
 * network round trip.
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{
    ChapterProvider, ChapterText, CommentaryProvider, PassageText, RemoteCommentary, VerseLine, VerseProvider,
};

/// Verses returned per chapter by a working mock
pub const MOCK_CHAPTER_LENGTH: u32 = 40;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an error
    Failing,
    /// Answers successfully with no content
    Empty,
    /// Succeeds after sleeping
    Slow { delay_ms: u64 },
}

/// Mock provider for testing study aggregation
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    /// Translations that fail even when the behavior is otherwise working
    failing_translations: Vec<String>,
    /// Calls made so far, shared between clones
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            failing_translations: Vec::new(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Fail passage lookups for the given translation codes only
    pub fn with_failing_translations(mut self, codes: &[&str]) -> Self {
        self.failing_translations = codes.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Number of calls made against this provider (and its clones)
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Count the call and apply the configured behavior
    async fn respond<T>(&self, what: String, produce: impl FnOnce() -> T) -> Result<T, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(produce()),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 503,
                message: format!("Mock provider unavailable for {}", what),
            }),
            MockBehavior::Empty => Err(ProviderError::EmptyResponse(what)),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(produce())
            }
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            failing_translations: self.failing_translations.clone(),
            call_count: Arc::clone(&self.call_count),
        }
    }
}

#[async_trait]
impl VerseProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_passage(&self, reference: &str, translation: &str) -> Result<PassageText, ProviderError> {
        if self.failing_translations.iter().any(|code| code == translation) {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            return Err(ProviderError::ConnectionError(format!("Mock {} unreachable", translation)));
        }

        self.respond(format!("{} ({})", reference, translation), || PassageText {
            text: format!("[{}] Text of {}", translation.to_uppercase(), reference),
            version_label: translation.to_uppercase(),
            verses: vec![VerseLine { verse: 1, text: format!("Text of {}", reference) }],
        }).await
    }
}

#[async_trait]
impl ChapterProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_chapter(&self, book_code: &str, chapter: u32) -> Result<ChapterText, ProviderError> {
        self.respond(format!("{} {}", book_code, chapter), || ChapterText {
            version_label: "KJV".to_string(),
            verses: (1..=MOCK_CHAPTER_LENGTH)
                .map(|verse| VerseLine {
                    verse,
                    text: format!("{} {}:{} text.", book_code, chapter, verse),
                })
                .collect(),
        }).await
    }
}

#[async_trait]
impl CommentaryProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_commentary(&self, book: &str, chapter: u32) -> Result<RemoteCommentary, ProviderError> {
        self.respond(format!("{} {}", book, chapter), || RemoteCommentary {
            text: format!("Mock commentary on {} {}.", book, chapter),
            source: Some("Mock Commentary".to_string()),
        }).await
    }
}
