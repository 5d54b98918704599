/*!
 * Verse text across several translations.
 *
 * Every configured translation is requested from the primary provider
 * concurrently; failures only drop that translation. When no primary
 * translation succeeds, a chapter-granular secondary provider serving one
 * fixed translation is consulted and the requested verses are sliced out of
 * the chapter.
 */

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::providers::{ChapterProvider, VerseLine, VerseProvider};
use crate::reference::ParsedReference;
use crate::study::cache::{CachedValue, StudyCache, cache_key};
use crate::study::outcome::{SourceOutcome, SourceReport};

/// Verse text for one (reference, translation) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseResult {
    pub text: String,
    /// Short translation label, e.g. "KJV"
    pub version_label: String,
    /// Per-verse breakdown, when the provider supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_verse_breakdown: Option<Vec<VerseLine>>,
}

/// Verses keyed by translation code plus one report per source consulted
#[derive(Debug, Clone, Default)]
pub struct VerseReport {
    pub verses: BTreeMap<String, VerseResult>,
    pub sources: Vec<SourceReport>,
}

#[derive(Debug, Clone)]
struct Fallback {
    provider: Arc<dyn ChapterProvider>,
    /// Map key for the fallback entry
    translation: String,
}

/// Resolves verse text for a reference across translation providers
#[derive(Debug, Clone)]
pub struct VerseFetcher {
    primary: Arc<dyn VerseProvider>,
    translations: Vec<String>,
    fallback: Option<Fallback>,
    cache: StudyCache,
}

impl VerseFetcher {
    pub fn new(primary: Arc<dyn VerseProvider>, translations: Vec<String>, cache: StudyCache) -> Self {
        Self {
            primary,
            translations,
            fallback: None,
            cache,
        }
    }

    /// Use `provider` when every primary translation fails; its entry is keyed `translation`
    pub fn with_fallback(mut self, provider: Arc<dyn ChapterProvider>, translation: impl Into<String>) -> Self {
        self.fallback = Some(Fallback {
            provider,
            translation: translation.into(),
        });
        self
    }

    pub fn translations(&self) -> &[String] {
        &self.translations
    }

    /// Fetch every configured translation; never fails, partial results are normal
    pub async fn fetch_versions(&self, parsed: &ParsedReference) -> VerseReport {
        let reference = parsed.to_string();

        let outcomes = join_all(
            self.translations.iter().map(|code| self.fetch_translation(&reference, code)),
        ).await;

        let mut report = VerseReport::default();
        for (code, outcome) in self.translations.iter().zip(outcomes) {
            report.sources.push(outcome.report(format!("verse:{}", code)));
            if let Some(result) = outcome.into_value() {
                report.verses.insert(code.clone(), result);
            }
        }

        if report.verses.is_empty() {
            if let Some(fallback) = &self.fallback {
                warn!("No primary translation available for {}, trying {}", reference, fallback.provider.name());
                let outcome = self.fetch_fallback(fallback, &reference, parsed).await;
                report.sources.push(outcome.report(format!("verse-fallback:{}", fallback.translation)));
                if let Some(result) = outcome.into_value() {
                    report.verses.insert(fallback.translation.clone(), result);
                }
            }
        }

        info!("Resolved {} translation(s) for {}", report.verses.len(), reference);
        report
    }

    async fn fetch_translation(&self, reference: &str, code: &str) -> SourceOutcome<VerseResult> {
        let key = cache_key("verse", reference, Some(code));
        if let Some(CachedValue::Verse(result)) = self.cache.get(&key) {
            return SourceOutcome::Success(result);
        }

        let outcome = SourceOutcome::from(self.primary.fetch_passage(reference, code).await);
        match outcome {
            SourceOutcome::Success(passage) => {
                let result = VerseResult {
                    text: passage.text,
                    version_label: passage.version_label,
                    source_verse_breakdown: (!passage.verses.is_empty()).then_some(passage.verses),
                };
                self.cache.set(key, CachedValue::Verse(result.clone()));
                SourceOutcome::Success(result)
            }
            SourceOutcome::Empty => {
                debug!("{} has no {} text for {}", self.primary.name(), code, reference);
                SourceOutcome::Empty
            }
            SourceOutcome::Failed(reason) => {
                warn!("Failed to fetch {} ({}) from {}: {}", reference, code, self.primary.name(), reason);
                SourceOutcome::Failed(reason)
            }
        }
    }

    async fn fetch_fallback(&self, fallback: &Fallback, reference: &str, parsed: &ParsedReference) -> SourceOutcome<VerseResult> {
        let key = cache_key("verse-fallback", reference, Some(&fallback.translation));
        if let Some(CachedValue::Verse(result)) = self.cache.get(&key) {
            return SourceOutcome::Success(result);
        }

        let chapter = match fallback.provider.fetch_chapter(&parsed.provider_code, parsed.chapter).await {
            Ok(chapter) => chapter,
            Err(e) => {
                warn!("Fallback {} failed for {}: {}", fallback.provider.name(), reference, e);
                return SourceOutcome::from(Err(e));
            }
        };

        let verses = slice_verses(&chapter.verses, parsed.verse_start, parsed.verse_end);
        if verses.is_empty() {
            debug!("Chapter response for {} does not contain the requested verses", reference);
            return SourceOutcome::Empty;
        }

        let result = VerseResult {
            text: join_verses(&verses),
            version_label: chapter.version_label,
            source_verse_breakdown: Some(verses),
        };
        self.cache.set(key, CachedValue::Verse(result.clone()));
        SourceOutcome::Success(result)
    }
}

/// Keep the verses numbered `start..=end`, in chapter order
pub fn slice_verses(verses: &[VerseLine], start: u32, end: u32) -> Vec<VerseLine> {
    verses.iter()
        .filter(|line| (start..=end).contains(&line.verse))
        .cloned()
        .collect()
}

fn join_verses(verses: &[VerseLine]) -> String {
    verses.iter()
        .map(|line| line.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
