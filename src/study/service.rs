/*!
 * Study aggregation entry point.
 *
 * Parses the reference, then gathers verses, commentary and cross-references
 * concurrently and adds the templated questions and links. Parsing is the
 * only step that can fail; every other source degrades into a smaller result.
 */

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::app_config::Config;
use crate::errors::ReferenceError;
use crate::providers::{BibleApiClient, ChapterApiClient, CommentaryApiClient};
use crate::reference::{self, ParsedReference};
use crate::study::cache::StudyCache;
use crate::study::commentary::{CommentaryAggregator, CommentaryEntry};
use crate::study::cross_references::cross_references;
use crate::study::links::{ExternalLink, external_links};
use crate::study::outcome::SourceReport;
use crate::study::questions::study_questions;
use crate::study::verses::{VerseFetcher, VerseResult};

/// Everything gathered for one reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMaterial {
    /// The reference as the caller supplied it
    pub reference: String,
    pub parsed: ParsedReference,
    /// Verse text keyed by translation code
    pub verses: BTreeMap<String, VerseResult>,
    /// Commentary keyed by source; never empty
    pub commentary: BTreeMap<String, CommentaryEntry>,
    pub cross_references: Vec<String>,
    pub study_questions: Vec<String>,
    pub external_links: Vec<ExternalLink>,
    /// How each upstream source fared
    #[serde(default)]
    pub sources: Vec<SourceReport>,
}

/// Orchestrates every lookup for a reference
#[derive(Debug, Clone)]
pub struct StudyService {
    verses: VerseFetcher,
    commentary: CommentaryAggregator,
    cache: StudyCache,
}

impl StudyService {
    /// Assemble a service from already-built fetchers sharing `cache`
    pub fn new(verses: VerseFetcher, commentary: CommentaryAggregator, cache: StudyCache) -> Self {
        Self { verses, commentary, cache }
    }

    /// Build the HTTP-backed service described by `config`
    pub fn from_config(config: &Config, cache: StudyCache) -> Self {
        let primary = &config.verses.primary;
        let fallback = &config.verses.fallback;

        let mut verses = VerseFetcher::new(
            Arc::new(BibleApiClient::new(&primary.endpoint, Duration::from_secs(primary.timeout_secs))),
            primary.translations.clone(),
            cache.clone(),
        );
        if fallback.enabled {
            verses = verses.with_fallback(
                Arc::new(ChapterApiClient::new(
                    &fallback.endpoint,
                    &fallback.translation,
                    &fallback.label,
                    Duration::from_secs(fallback.timeout_secs),
                )),
                fallback.translation.clone(),
            );
        }

        let remote = &config.commentary.remote;
        let mut commentary = CommentaryAggregator::new(cache.clone());
        if remote.enabled {
            commentary = commentary.with_remote(Arc::new(CommentaryApiClient::new(
                &remote.endpoint,
                Duration::from_secs(remote.timeout_secs),
            )));
        }

        Self::new(verses, commentary, cache)
    }

    /// The cache shared by every fetcher
    pub fn cache(&self) -> &StudyCache {
        &self.cache
    }

    /// Gather study material for a free-text reference
    ///
    /// Returns an error only when the reference cannot be parsed; no upstream
    /// call is made in that case.
    pub async fn study(&self, raw: &str) -> Result<StudyMaterial, ReferenceError> {
        let parsed = reference::parse(raw)?;

        let (verses, commentary, cross_references) = tokio::join!(
            self.verses.fetch_versions(&parsed),
            self.commentary.fetch_commentary(&parsed),
            async { cross_references(&parsed) }
        );

        let mut sources = verses.sources;
        sources.extend(commentary.sources);

        info!(
            "Study material for {}: {} translation(s), {} commentary source(s), {} cross-reference(s)",
            parsed,
            verses.verses.len(),
            commentary.commentary.len(),
            cross_references.len()
        );

        Ok(StudyMaterial {
            reference: raw.trim().to_string(),
            study_questions: study_questions(&parsed),
            external_links: external_links(&parsed),
            parsed,
            verses: verses.verses,
            commentary: commentary.commentary,
            cross_references,
            sources,
        })
    }
}
