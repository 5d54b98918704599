/*!
 * Tests for the verse fetcher and its chapter fallback
 */

use std::sync::Arc;

use scripture_study::providers::MockProvider;
use scripture_study::reference::parse;
use scripture_study::study::{SourceStatus, StudyCache, VerseFetcher};

use crate::common::{FALLBACK_TRANSLATION, TRANSLATIONS, init_logger, translations};

fn fetcher(primary: &MockProvider, fallback: Option<&MockProvider>, cache: &StudyCache) -> VerseFetcher {
    init_logger();
    let fetcher = VerseFetcher::new(Arc::new(primary.clone()), translations(), cache.clone());
    match fallback {
        Some(fallback) => fetcher.with_fallback(Arc::new(fallback.clone()), FALLBACK_TRANSLATION),
        None => fetcher,
    }
}

#[tokio::test]
async fn test_fetch_versions_withWorkingPrimary_shouldReturnEveryTranslation() {
    let primary = MockProvider::working();
    let fallback = MockProvider::working();
    let fetcher = fetcher(&primary, Some(&fallback), &StudyCache::default());

    let report = fetcher.fetch_versions(&parse("John 3:16").unwrap()).await;

    assert_eq!(report.verses.len(), TRANSLATIONS.len());
    for code in TRANSLATIONS {
        let verse = &report.verses[code];
        assert_eq!(verse.version_label, code.to_uppercase());
        assert!(verse.text.contains("John 3:16"));
        assert!(verse.source_verse_breakdown.is_some());
    }
    assert_eq!(primary.calls(), 3);
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn test_fetch_versions_withOneFailingTranslation_shouldOmitOnlyThatCode() {
    let primary = MockProvider::working().with_failing_translations(&["web"]);
    let fallback = MockProvider::working();
    let fetcher = fetcher(&primary, Some(&fallback), &StudyCache::default());

    let report = fetcher.fetch_versions(&parse("John 3:16").unwrap()).await;

    assert_eq!(report.verses.keys().collect::<Vec<_>>(), vec!["bbe", "kjv"]);
    let web = report.sources.iter().find(|s| s.source == "verse:web").unwrap();
    assert_eq!(web.status, SourceStatus::Failed);
    assert!(web.detail.is_some());
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn test_fetch_versions_withAllPrimariesFailing_shouldUseSingleFallbackEntry() {
    let primary = MockProvider::failing();
    let fallback = MockProvider::working();
    let fetcher = fetcher(&primary, Some(&fallback), &StudyCache::default());

    let report = fetcher.fetch_versions(&parse("Genesis 1:1-3").unwrap()).await;

    assert_eq!(report.verses.len(), 1);
    let verse = &report.verses[FALLBACK_TRANSLATION];
    assert_eq!(verse.version_label, "KJV");
    assert_eq!(verse.text, "GEN 1:1 text. GEN 1:2 text. GEN 1:3 text.");
    let breakdown = verse.source_verse_breakdown.as_ref().unwrap();
    assert_eq!(breakdown.iter().map(|v| v.verse).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(fallback.calls(), 1);
}

#[tokio::test]
async fn test_fetch_versions_withEmptyPrimaries_shouldUseFallback() {
    let primary = MockProvider::empty();
    let fallback = MockProvider::working();
    let fetcher = fetcher(&primary, Some(&fallback), &StudyCache::default());

    let report = fetcher.fetch_versions(&parse("John 3:16").unwrap()).await;

    assert_eq!(report.verses.len(), 1);
    assert!(report.sources.iter().take(3).all(|s| s.status == SourceStatus::Empty));
}

#[tokio::test]
async fn test_fetch_versions_withEverythingFailing_shouldReturnEmptyMap() {
    let primary = MockProvider::failing();
    let fallback = MockProvider::failing();
    let fetcher = fetcher(&primary, Some(&fallback), &StudyCache::default());

    let report = fetcher.fetch_versions(&parse("John 3:16").unwrap()).await;

    assert!(report.verses.is_empty());
    assert_eq!(report.sources.len(), TRANSLATIONS.len() + 1);
    assert!(report.sources.iter().all(|s| s.status == SourceStatus::Failed));
}

#[tokio::test]
async fn test_fetch_versions_withoutFallback_shouldReturnEmptyMap() {
    let primary = MockProvider::failing();
    let fetcher = fetcher(&primary, None, &StudyCache::default());

    let report = fetcher.fetch_versions(&parse("John 3:16").unwrap()).await;

    assert!(report.verses.is_empty());
    assert_eq!(report.sources.len(), TRANSLATIONS.len());
}

#[tokio::test]
async fn test_fetch_versions_withVersesBeyondChapter_shouldReportFallbackEmpty() {
    let primary = MockProvider::failing();
    let fallback = MockProvider::working();
    let fetcher = fetcher(&primary, Some(&fallback), &StudyCache::default());

    // The mock chapter has 40 verses
    let report = fetcher.fetch_versions(&parse("Psalms 119:100").unwrap()).await;

    assert!(report.verses.is_empty());
    assert_eq!(report.sources.last().unwrap().status, SourceStatus::Empty);
}

#[tokio::test]
async fn test_fetch_versions_calledTwice_shouldServeSecondFromCache() {
    let primary = MockProvider::working().with_failing_translations(&["bbe"]);
    let cache = StudyCache::default();
    let fetcher = fetcher(&primary, None, &cache);
    let parsed = parse("John 3:16").unwrap();

    let first = fetcher.fetch_versions(&parsed).await;
    let second = fetcher.fetch_versions(&parsed).await;

    assert_eq!(first.verses, second.verses);
    // kjv and web are cached; the failed bbe lookup is retried
    assert_eq!(primary.calls(), 3 + 1);
    assert!(cache.get("verse:John 3:16:kjv").is_some());
    assert!(cache.get("verse:John 3:16:bbe").is_none());
}

#[test]
fn test_fetch_versions_fromBlockingContext_shouldResolveFallbackFromCache() {
    let primary = MockProvider::failing();
    let fallback = MockProvider::working();
    let cache = StudyCache::default();
    let fetcher = fetcher(&primary, Some(&fallback), &cache);
    let parsed = parse("Genesis 1:1-3").unwrap();

    let first = tokio_test::block_on(fetcher.fetch_versions(&parsed));
    let second = tokio_test::block_on(fetcher.fetch_versions(&parsed));

    assert_eq!(first.verses, second.verses);
    assert_eq!(fallback.calls(), 1);
}
