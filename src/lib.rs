/*!
 * # scripture-study - Scripture reference resolution and study aggregation
 *
 * Turns a free-text scripture reference into a structured reference and
 * gathers everything useful for studying it in one response.
 *
 * ## Features
 *
 * - Parse references such as `John 3:16` or `1 Corinthians 13:4-7`
 * - Fetch verse text in several translations concurrently, with a
 *   chapter-granular fallback provider
 * - Merge remote commentary, curated notes and a synthesized study guide
 * - Cross-references, reflection questions and external study links
 * - Shared TTL cache with an LRU bound
 * - Every upstream failure degrades the result instead of failing it
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `reference`: Book registry and reference parser
 * - `study`: Aggregation services:
 *   - `study::service`: The orchestrator, `StudyService::study`
 *   - `study::verses`: Verse text across translations
 *   - `study::commentary`: Commentary aggregation
 *   - `study::cache`: Shared TTL cache
 * - `providers`: Upstream clients:
 *   - `providers::bible_api`: Primary translation API
 *   - `providers::chapter_api`: Secondary chapter API
 *   - `providers::commentary_api`: Remote commentary API
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod providers;
pub mod reference;
pub mod study;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, ReferenceError};
pub use reference::{BookInfo, ParsedReference, parse};
pub use study::{StudyCache, StudyMaterial, StudyService};
