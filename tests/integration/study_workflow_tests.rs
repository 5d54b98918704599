/*!
 * End-to-end tests of StudyService::study over mock providers
 */

use std::time::{Duration, Instant};

use scripture_study::ReferenceError;
use scripture_study::providers::MockProvider;
use scripture_study::study::SourceStatus;
use scripture_study::study::commentary::{DEFAULT_KEY, STORED_KEY};

use crate::common::{FALLBACK_TRANSLATION, TRANSLATIONS, harness, harness_with_ttl};

#[tokio::test]
async fn test_study_withWorkingProviders_shouldAssembleEverySection() {
    let h = harness(MockProvider::working(), MockProvider::working(), MockProvider::working());

    let material = h.service.study("John 3:16").await.unwrap();

    assert_eq!(material.reference, "John 3:16");
    assert_eq!(material.parsed.provider_code, "JHN");
    assert_eq!(material.parsed.display_name, "John");
    assert_eq!(material.parsed.chapter, 3);
    assert_eq!(material.parsed.verse_start, 16);
    assert_eq!(material.parsed.verse_end, 16);

    assert_eq!(material.verses.len(), TRANSLATIONS.len());
    assert_eq!(material.verses["web"].version_label, "WEB");

    assert!(material.commentary.contains_key("mock"));
    assert!(material.commentary.contains_key(STORED_KEY));
    assert!(!material.commentary.contains_key(DEFAULT_KEY));

    assert!(material.cross_references.contains(&"Romans 5:8".to_string()));
    assert_eq!(material.study_questions.len(), 8);
    assert_eq!(material.external_links.len(), 4);
    assert!(material.sources.iter().all(|s| s.status == SourceStatus::Success));
    assert_eq!(h.fallback.calls(), 0);
}

#[tokio::test]
async fn test_study_withRange_shouldKeepBothEnds() {
    let h = harness(MockProvider::working(), MockProvider::working(), MockProvider::working());

    let material = h.service.study("  Genesis 1:1-3 ").await.unwrap();

    assert_eq!(material.reference, "Genesis 1:1-3");
    assert_eq!(material.parsed.verse_start, 1);
    assert_eq!(material.parsed.verse_end, 3);
    assert!(material.study_questions.iter().all(|q| q.contains("Genesis 1")));
}

#[tokio::test]
async fn test_study_withUnknownBook_shouldFailWithoutCallingProviders() {
    let h = harness(MockProvider::working(), MockProvider::working(), MockProvider::working());

    let error = h.service.study("Hezekiah 4:2").await.unwrap_err();

    assert!(matches!(error, ReferenceError::UnknownBook { .. }));
    assert_eq!(h.primary.calls(), 0);
    assert_eq!(h.fallback.calls(), 0);
    assert_eq!(h.commentary.calls(), 0);
    assert!(h.cache.is_empty());
}

#[tokio::test]
async fn test_study_withMalformedReference_shouldFail() {
    let h = harness(MockProvider::working(), MockProvider::working(), MockProvider::working());

    for input in ["", "John", "John 3", "3:16", "John 3:16-"] {
        let result = h.service.study(input).await;
        assert!(matches!(result, Err(ReferenceError::InvalidFormat { .. })), "{:?} -> {:?}", input, result);
    }
    assert_eq!(h.primary.calls(), 0);
}

#[tokio::test]
async fn test_study_withFailingPrimary_shouldUseFallbackOnly() {
    let h = harness(MockProvider::failing(), MockProvider::working(), MockProvider::working());

    let material = h.service.study("Romans 8:28").await.unwrap();

    assert_eq!(material.verses.len(), 1);
    let result = &material.verses[FALLBACK_TRANSLATION];
    assert_eq!(result.text, "ROM 8:28 text.");
    assert_eq!(h.fallback.calls(), 1);
}

#[tokio::test]
async fn test_study_withEveryVerseSourceFailing_shouldStillSucceed() {
    let h = harness(MockProvider::failing(), MockProvider::failing(), MockProvider::working());

    let material = h.service.study("Romans 8:28").await.unwrap();

    assert!(material.verses.is_empty());
    assert!(!material.commentary.is_empty());
    let failed = material.sources.iter().filter(|s| s.status == SourceStatus::Failed).count();
    assert_eq!(failed, TRANSLATIONS.len() + 1);
}

#[tokio::test]
async fn test_study_withNoCommentaryAnywhere_shouldUseStudyGuideOnly() {
    let h = harness(MockProvider::working(), MockProvider::working(), MockProvider::failing());

    let material = h.service.study("Obadiah 1:4").await.unwrap();

    assert_eq!(material.commentary.keys().collect::<Vec<_>>(), vec![DEFAULT_KEY]);
    assert_eq!(material.commentary[DEFAULT_KEY].source(), "Study Guide");
}

#[tokio::test]
async fn test_study_calledTwice_shouldServeSecondFromCache() {
    let h = harness(MockProvider::working(), MockProvider::working(), MockProvider::working());

    let first = h.service.study("Psalm 23:1").await.unwrap();
    let primary_calls = h.primary.calls();
    let commentary_calls = h.commentary.calls();
    assert_eq!(primary_calls, TRANSLATIONS.len());
    assert_eq!(commentary_calls, 1);

    let second = h.service.study("Psalms 23:1").await.unwrap();

    assert_eq!(h.primary.calls(), primary_calls);
    assert_eq!(h.commentary.calls(), commentary_calls);
    assert_eq!(first.verses, second.verses);
    assert_eq!(first.commentary, second.commentary);
    assert_ne!(first.reference, second.reference);
    assert!(h.cache.stats().hits >= 4);
}

#[tokio::test]
async fn test_study_afterTtlExpiry_shouldRefetch() {
    let h = harness_with_ttl(
        MockProvider::working(),
        MockProvider::working(),
        MockProvider::working(),
        Duration::from_millis(30),
    );

    h.service.study("John 3:16").await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;
    h.service.study("John 3:16").await.unwrap();

    assert_eq!(h.primary.calls(), 2 * TRANSLATIONS.len());
    assert_eq!(h.commentary.calls(), 2);
}

#[tokio::test]
async fn test_study_templatedSections_shouldNotDependOnNetwork() {
    let healthy = harness(MockProvider::working(), MockProvider::working(), MockProvider::working());
    let broken = harness(MockProvider::failing(), MockProvider::failing(), MockProvider::failing());

    let a = healthy.service.study("1 Corinthians 13:4-7").await.unwrap();
    let b = broken.service.study("1 Corinthians 13:4-7").await.unwrap();

    assert_eq!(a.parsed, b.parsed);
    assert_eq!(a.study_questions, b.study_questions);
    assert_eq!(a.external_links, b.external_links);
    assert_eq!(a.cross_references, b.cross_references);
}

#[tokio::test]
async fn test_study_withSlowProviders_shouldQueryConcurrently() {
    let h = harness(MockProvider::slow(200), MockProvider::working(), MockProvider::slow(200));

    let start = Instant::now();
    let material = h.service.study("Isaiah 40:31").await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(material.verses.len(), TRANSLATIONS.len());
    // Four sequential 200ms calls would take at least 800ms
    assert!(elapsed < Duration::from_millis(700), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_study_concurrentCalls_shouldShareTheCache() {
    let h = harness(MockProvider::working(), MockProvider::working(), MockProvider::working());

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..5 {
        let service = h.service.clone();
        tasks.spawn(async move { service.study("Jeremiah 29:11").await });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        results.push(joined.unwrap().unwrap());
    }

    assert_eq!(results.len(), 5);
    assert!(results.windows(2).all(|pair| pair[0].verses == pair[1].verses));

    h.service.study("Jeremiah 29:11").await.unwrap();
    let calls = h.primary.calls();
    h.service.study("Jeremiah 29:11").await.unwrap();
    assert_eq!(h.primary.calls(), calls);
}

#[tokio::test]
async fn test_study_material_shouldSerializeWithCamelCaseKeys() {
    let h = harness(MockProvider::working(), MockProvider::working(), MockProvider::working());

    let material = h.service.study("John 3:16").await.unwrap();
    let json = serde_json::to_value(&material).unwrap();

    for key in ["reference", "parsed", "verses", "commentary", "crossReferences", "studyQuestions", "externalLinks", "sources"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["parsed"]["providerCode"], "JHN");
    assert_eq!(json["parsed"]["verseStart"], 16);
    assert_eq!(json["verses"]["kjv"]["versionLabel"], "KJV");
    assert!(json["commentary"][STORED_KEY]["byAuthor"].is_object());
    assert_eq!(json["sources"][0]["status"], "success");
}
