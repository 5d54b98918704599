/*!
 * Commentary aggregation.
 *
 * Three kinds of source are consulted concurrently for a reference:
 * - the remote commentary provider (by book and chapter, cached)
 * - the curated local table of well-known verses
 * - any additional [`CommentarySource`] registered by the embedder
 *
 * When none of them contributes, a generic study guide is synthesized, so
 * the returned map is never empty.
 */

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::sync::Arc;

use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::providers::CommentaryProvider;
use crate::reference::ParsedReference;
use crate::study::cache::{CachedValue, StudyCache, cache_key};
use crate::study::outcome::{SourceOutcome, SourceReport};

/// Map key of the curated local table
pub const STORED_KEY: &str = "stored";

/// Map key of the synthesized study guide
pub const DEFAULT_KEY: &str = "default";

/// Attribution of the synthesized study guide
pub const STUDY_GUIDE_SOURCE: &str = "Study Guide";

/// Commentary from one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentaryEntry {
    /// A single body of text
    Single { text: String, source: String },
    /// Several perspectives keyed by author or angle
    MultiAuthor {
        #[serde(rename = "byAuthor")]
        by_author: BTreeMap<String, String>,
        source: String,
    },
}

impl CommentaryEntry {
    pub fn source(&self) -> &str {
        match self {
            Self::Single { source, .. } | Self::MultiAuthor { source, .. } => source,
        }
    }
}

/// A synchronous commentary source consulted alongside the remote provider
///
/// The curated table is the built-in implementation; embedders can register
/// more through [`CommentaryAggregator::with_source`].
pub trait CommentarySource: Send + Sync + Debug {
    /// Key of this source's entry in the commentary map
    fn key(&self) -> &str;

    fn lookup(&self, parsed: &ParsedReference) -> SourceOutcome<CommentaryEntry>;
}

/// Hand-curated notes on frequently studied verses
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredCommentary;

const CURATED_SOURCE: &str = "Curated Commentary";

// table key -> (perspective, note)
static CURATED: Lazy<HashMap<&'static str, Vec<(&'static str, &'static str)>>> = Lazy::new(|| {
    HashMap::from([
        ("john3:16", vec![
            ("theological", "The verse summarizes the gospel: the initiative is God's love, the gift is the Son, the response is belief, and the result is eternal life rather than perishing."),
            ("historical", "Spoken in the setting of Jesus' night conversation with Nicodemus, a Pharisee; the lifted serpent of Numbers 21 in the preceding verses frames the saying."),
            ("devotional", "\"The world\" includes every reader. The love described is measured by what it gives, not by what it receives."),
        ]),
        ("genesis1:1", vec![
            ("theological", "Scripture opens with God already present; creation has a beginning, God does not. Everything that follows depends on Him."),
            ("historical", "Against the creation stories of the ancient Near East, Genesis presents one God who creates by word rather than by conflict among deities."),
        ]),
        ("psalms23:1", vec![
            ("historical", "David, once a shepherd, describes the LORD in the role he himself knew: guiding, providing, and protecting the flock."),
            ("devotional", "\"I shall not want\" is a statement of trust in the Shepherd's provision, not a promise that every desire is granted."),
        ]),
        ("romans8:28", vec![
            ("theological", "Paul does not call all things good; he says God works in all things toward good for those who love Him, the good being conformity to Christ (v. 29)."),
            ("devotional", "The promise is anchored in God's purpose and calling, which gives stability when circumstances do not."),
        ]),
        ("jeremiah29:11", vec![
            ("historical", "Addressed to exiles in Babylon facing seventy years away from home; the hope is real but arrives through, not around, the exile."),
            ("theological", "God's plans for His people are for welfare and a future, grounded in His faithfulness to the covenant."),
        ]),
        ("philippians4:13", vec![
            ("historical", "Written from imprisonment; in context Paul speaks of contentment in both plenty and hunger."),
            ("devotional", "The strength promised is strength to remain faithful and content in every circumstance Christ leads us through."),
        ]),
        ("proverbs3:5", vec![
            ("theological", "Trust involves the whole heart and is set against leaning on one's own understanding, which is limited."),
            ("devotional", "Acknowledging God in all ways (v. 6) turns trust from a feeling into a daily practice."),
        ]),
        ("isaiah40:31", vec![
            ("historical", "Spoken to a discouraged people who felt forgotten by God (v. 27); the chapter answers with God's unwearied power."),
            ("devotional", "Waiting on the LORD is active hope; renewal comes as an exchange of our strength for His."),
        ]),
    ])
});

impl CommentarySource for StoredCommentary {
    fn key(&self) -> &str {
        STORED_KEY
    }

    fn lookup(&self, parsed: &ParsedReference) -> SourceOutcome<CommentaryEntry> {
        match CURATED.get(parsed.table_key().as_str()) {
            Some(notes) => SourceOutcome::Success(CommentaryEntry::MultiAuthor {
                by_author: notes.iter()
                    .map(|(author, note)| (author.to_string(), note.to_string()))
                    .collect(),
                source: CURATED_SOURCE.to_string(),
            }),
            None => SourceOutcome::Empty,
        }
    }
}

/// The five-point generic study guide used when no source contributes
pub fn default_study_guide(parsed: &ParsedReference) -> CommentaryEntry {
    let text = [
        format!("1. Read {} in context, including the verses before and after it.", parsed),
        format!("2. Consider the historical background of {} and its original audience.", parsed.display_name),
        "3. Note repeated words and key themes in the passage.".to_string(),
        format!("4. Relate this passage to the overall message of {}.", parsed.display_name),
        "5. Pray for understanding and for ways to apply what you read.".to_string(),
    ].join("\n");

    CommentaryEntry::Single {
        text,
        source: STUDY_GUIDE_SOURCE.to_string(),
    }
}

/// Commentary keyed by source plus one report per source consulted
#[derive(Debug, Clone, Default)]
pub struct CommentaryReport {
    pub commentary: BTreeMap<String, CommentaryEntry>,
    pub sources: Vec<SourceReport>,
}

/// Gathers commentary from every source and merges the successes
#[derive(Debug, Clone)]
pub struct CommentaryAggregator {
    remote: Option<Arc<dyn CommentaryProvider>>,
    sources: Vec<Arc<dyn CommentarySource>>,
    cache: StudyCache,
}

impl CommentaryAggregator {
    /// Aggregator with the curated table and no remote provider
    pub fn new(cache: StudyCache) -> Self {
        Self {
            remote: None,
            sources: vec![Arc::new(StoredCommentary)],
            cache,
        }
    }

    pub fn with_remote(mut self, provider: Arc<dyn CommentaryProvider>) -> Self {
        self.remote = Some(provider);
        self
    }

    /// Register an additional local source
    pub fn with_source(mut self, source: Arc<dyn CommentarySource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Fetch commentary from every source; the result always has at least one entry
    pub async fn fetch_commentary(&self, parsed: &ParsedReference) -> CommentaryReport {
        let reference = parsed.to_string();

        let (remote, local) = tokio::join!(
            self.fetch_remote(&reference, parsed),
            async {
                self.sources.iter()
                    .map(|source| (source.key().to_string(), source.lookup(parsed)))
                    .collect::<Vec<_>>()
            }
        );

        let mut report = CommentaryReport::default();
        let outcomes = remote.into_iter().chain(local);
        for (key, outcome) in outcomes {
            report.sources.push(outcome.report(format!("commentary:{}", key)));
            if let Some(entry) = outcome.into_value() {
                report.commentary.insert(key, entry);
            }
        }

        if report.commentary.is_empty() {
            debug!("No commentary found for {}, using study guide", reference);
            report.commentary.insert(DEFAULT_KEY.to_string(), default_study_guide(parsed));
        }

        report
    }

    async fn fetch_remote(&self, reference: &str, parsed: &ParsedReference) -> Option<(String, SourceOutcome<CommentaryEntry>)> {
        let provider = self.remote.as_ref()?;
        let key = provider.name().to_string();

        let cache_key = cache_key("commentary-remote", reference, None);
        if let Some(CachedValue::Commentary(entry)) = self.cache.get(&cache_key) {
            return Some((key, SourceOutcome::Success(entry)));
        }

        let outcome = match provider.fetch_commentary(&parsed.display_name, parsed.chapter).await {
            Ok(remote) => {
                let entry = CommentaryEntry::Single {
                    text: remote.text,
                    source: remote.source.unwrap_or_else(|| provider.name().to_string()),
                };
                self.cache.set(cache_key, CachedValue::Commentary(entry.clone()));
                SourceOutcome::Success(entry)
            }
            Err(e) => {
                warn!("Commentary from {} unavailable for {}: {}", provider.name(), reference, e);
                SourceOutcome::from(Err(e))
            }
        };

        Some((key, outcome))
    }
}
