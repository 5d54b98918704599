/*!
 * Multi-source study aggregation.
 *
 * - `service`: the orchestrator, [`StudyService::study`]
 * - `verses`: verse text across translations with a chapter fallback
 * - `commentary`: remote, curated and synthesized commentary
 * - `cross_references`, `questions`, `links`: table and template lookups
 * - `cache`: shared TTL cache with an LRU bound
 * - `outcome`: per-source success/empty/failed reporting
 */

pub mod cache;
pub mod commentary;
pub mod cross_references;
pub mod links;
pub mod outcome;
pub mod questions;
pub mod service;
pub mod verses;

pub use cache::{CacheStats, CachedValue, StudyCache, TtlCache, cache_key};
pub use commentary::{CommentaryAggregator, CommentaryEntry, CommentarySource, StoredCommentary};
pub use links::ExternalLink;
pub use outcome::{SourceOutcome, SourceReport, SourceStatus};
pub use service::{StudyMaterial, StudyService};
pub use verses::{VerseFetcher, VerseResult};
