/*!
 * Free-text scripture reference parsing.
 *
 * Accepts `<Book> <chapter>:<verse>` and `<Book> <chapter>:<start>-<end>`,
 * where the book may carry a leading numeral and internal spaces
 * ("1 Corinthians", "Song of Solomon").
 */

use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ReferenceError;
use crate::reference::books::{self, normalize_book_key};

static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*((?:[1-3]\s*)?[A-Za-z][A-Za-z\s]*?)\s*(\d+)\s*:\s*(\d+)(?:\s*[-\x{2013}]\s*(\d+))?\s*$")
        .expect("reference pattern is a valid regex")
});

/// A structured reference produced by [`parse`]
///
/// Invariants: `chapter >= 1`, `verse_start >= 1`, `verse_start <= verse_end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReference {
    /// Book code used by chapter-granular providers
    pub provider_code: String,
    /// Canonical book name ("1 Corinthians")
    pub display_name: String,
    /// Position of the book in the canon
    pub canonical_ordinal: u8,
    pub chapter: u32,
    pub verse_start: u32,
    pub verse_end: u32,
    /// Registry key of the book ("1corinthians")
    pub normalized_book_key: String,
}

impl ParsedReference {
    /// Whether the reference spans more than one verse
    pub fn is_range(&self) -> bool {
        self.verse_end > self.verse_start
    }

    /// Key used by the static commentary and cross-reference tables ("john3:16")
    pub fn table_key(&self) -> String {
        format!("{}{}:{}", self.normalized_book_key, self.chapter, self.verse_start)
    }

    /// `chapter:verse` or `chapter:start-end`
    pub fn verse_span(&self) -> String {
        if self.is_range() {
            format!("{}:{}-{}", self.chapter, self.verse_start, self.verse_end)
        } else {
            format!("{}:{}", self.chapter, self.verse_start)
        }
    }
}

impl fmt::Display for ParsedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_name, self.verse_span())
    }
}

/// Parse a free-text reference against the book registry
///
/// Total and side-effect free: every input yields either a reference or a
/// [`ReferenceError`] whose message names both accepted formats.
pub fn parse(raw: &str) -> Result<ParsedReference, ReferenceError> {
    let invalid_format = || ReferenceError::InvalidFormat { input: raw.trim().to_string() };

    let captures = REFERENCE_PATTERN.captures(raw).ok_or_else(invalid_format)?;

    let book_text = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    let chapter = parse_number(captures.get(2)).ok_or_else(invalid_format)?;
    let verse_start = parse_number(captures.get(3)).ok_or_else(invalid_format)?;
    let verse_end = match captures.get(4) {
        Some(end) => parse_number(Some(end)).ok_or_else(invalid_format)?,
        None => verse_start,
    };

    let normalized_book_key = normalize_book_key(book_text);
    let book = books::lookup(&normalized_book_key).ok_or_else(|| ReferenceError::UnknownBook {
        book: book_text.to_string(),
    })?;

    if chapter == 0 || verse_start == 0 || verse_end < verse_start {
        return Err(ReferenceError::InvalidRange { input: raw.trim().to_string() });
    }

    Ok(ParsedReference {
        provider_code: book.provider_code.to_string(),
        display_name: book.display_name.to_string(),
        canonical_ordinal: book.canonical_ordinal,
        chapter,
        verse_start,
        verse_end,
        // Aliases resolve to the canonical key so table lookups stay consistent
        normalized_book_key: normalize_book_key(book.display_name),
    })
}

fn parse_number(capture: Option<regex::Match<'_>>) -> Option<u32> {
    capture.and_then(|m| m.as_str().parse().ok())
}
