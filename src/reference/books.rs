/*!
 * Canonical book registry.
 *
 * Maps a normalized book key (lowercase, whitespace stripped, e.g.
 * `1corinthians`) to the book's provider code, display name and canonical
 * ordinal. Built once on first use.
 */

use std::collections::HashMap;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Static information about one canonical book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInfo {
    /// USFM-style code used by chapter-granular providers (e.g. "JHN")
    pub provider_code: &'static str,
    /// Human-readable name (e.g. "John")
    pub display_name: &'static str,
    /// Position in the 66-book Protestant canon, starting at 1
    pub canonical_ordinal: u8,
}

// (provider code, display name) in canonical order
const CANON: [(&str, &str); 66] = [
    ("GEN", "Genesis"),
    ("EXO", "Exodus"),
    ("LEV", "Leviticus"),
    ("NUM", "Numbers"),
    ("DEU", "Deuteronomy"),
    ("JOS", "Joshua"),
    ("JDG", "Judges"),
    ("RUT", "Ruth"),
    ("1SA", "1 Samuel"),
    ("2SA", "2 Samuel"),
    ("1KI", "1 Kings"),
    ("2KI", "2 Kings"),
    ("1CH", "1 Chronicles"),
    ("2CH", "2 Chronicles"),
    ("EZR", "Ezra"),
    ("NEH", "Nehemiah"),
    ("EST", "Esther"),
    ("JOB", "Job"),
    ("PSA", "Psalms"),
    ("PRO", "Proverbs"),
    ("ECC", "Ecclesiastes"),
    ("SNG", "Song of Solomon"),
    ("ISA", "Isaiah"),
    ("JER", "Jeremiah"),
    ("LAM", "Lamentations"),
    ("EZK", "Ezekiel"),
    ("DAN", "Daniel"),
    ("HOS", "Hosea"),
    ("JOL", "Joel"),
    ("AMO", "Amos"),
    ("OBA", "Obadiah"),
    ("JON", "Jonah"),
    ("MIC", "Micah"),
    ("NAM", "Nahum"),
    ("HAB", "Habakkuk"),
    ("ZEP", "Zephaniah"),
    ("HAG", "Haggai"),
    ("ZEC", "Zechariah"),
    ("MAL", "Malachi"),
    ("MAT", "Matthew"),
    ("MRK", "Mark"),
    ("LUK", "Luke"),
    ("JHN", "John"),
    ("ACT", "Acts"),
    ("ROM", "Romans"),
    ("1CO", "1 Corinthians"),
    ("2CO", "2 Corinthians"),
    ("GAL", "Galatians"),
    ("EPH", "Ephesians"),
    ("PHP", "Philippians"),
    ("COL", "Colossians"),
    ("1TH", "1 Thessalonians"),
    ("2TH", "2 Thessalonians"),
    ("1TI", "1 Timothy"),
    ("2TI", "2 Timothy"),
    ("TIT", "Titus"),
    ("PHM", "Philemon"),
    ("HEB", "Hebrews"),
    ("JAS", "James"),
    ("1PE", "1 Peter"),
    ("2PE", "2 Peter"),
    ("1JN", "1 John"),
    ("2JN", "2 John"),
    ("3JN", "3 John"),
    ("JUD", "Jude"),
    ("REV", "Revelation"),
];

// Alternate spellings users commonly type, pointing at canonical keys
const ALIASES: [(&str, &str); 7] = [
    ("psalm", "psalms"),
    ("songofsongs", "songofsolomon"),
    ("song", "songofsolomon"),
    ("canticles", "songofsolomon"),
    ("qoheleth", "ecclesiastes"),
    ("revelations", "revelation"),
    ("acts of the apostles", "acts"),
];

static REGISTRY: Lazy<HashMap<String, BookInfo>> = Lazy::new(|| {
    let mut books = HashMap::with_capacity(CANON.len() + ALIASES.len());

    for (index, (provider_code, display_name)) in CANON.iter().enumerate() {
        books.insert(
            normalize_book_key(display_name),
            BookInfo {
                provider_code: *provider_code,
                display_name: *display_name,
                canonical_ordinal: (index + 1) as u8,
            },
        );
    }

    for (alias, target) in ALIASES {
        if let Some(info) = books.get(target).cloned() {
            books.insert(normalize_book_key(alias), info);
        }
    }

    books
});

/// Normalize a book name into a registry key: trimmed, lowercase, no whitespace
pub fn normalize_book_key(book: &str) -> String {
    book.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Look up a book by its normalized key
pub fn lookup(normalized_key: &str) -> Option<&'static BookInfo> {
    REGISTRY.get(normalized_key)
}

/// Canonical display names in canon order
pub fn canonical_names() -> impl Iterator<Item = &'static str> {
    CANON.iter().map(|(_, name)| *name)
}
