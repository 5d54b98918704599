/*!
 * Cross-reference lookup for well-known verses.
 */

use std::collections::HashMap;
use once_cell::sync::Lazy;

use crate::reference::ParsedReference;

// Keyed like the curated commentary table: book key + chapter + ":" + first verse
static CROSS_REFERENCES: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("john3:16", &["Romans 5:8", "1 John 4:9-10", "John 1:29", "Ephesians 2:8-9", "Romans 6:23"][..]),
        ("genesis1:1", &["John 1:1-3", "Hebrews 11:3", "Psalms 33:6", "Colossians 1:16", "Isaiah 45:18"][..]),
        ("psalms23:1", &["John 10:11", "Isaiah 40:11", "Ezekiel 34:11-12", "1 Peter 2:25", "Philippians 4:19"][..]),
        ("romans8:28", &["Genesis 50:20", "Ephesians 1:11", "2 Corinthians 4:17", "James 1:2-4"][..]),
        ("jeremiah29:11", &["Isaiah 55:8-9", "Romans 15:13", "Lamentations 3:22-23", "Proverbs 19:21"][..]),
        ("philippians4:13", &["2 Corinthians 12:9-10", "Isaiah 41:10", "Ephesians 3:16", "John 15:5"][..]),
        ("proverbs3:5", &["Psalms 37:5", "Isaiah 26:3-4", "Jeremiah 17:7-8", "Psalms 62:8"][..]),
        ("isaiah40:31", &["Psalms 27:14", "2 Corinthians 4:16", "Galatians 6:9", "Psalms 103:5"][..]),
        ("matthew28:19", &["Mark 16:15", "Acts 1:8", "Luke 24:47", "Romans 10:14-15"][..]),
        ("1corinthians13:4", &["Colossians 3:12-14", "Galatians 5:22-23", "1 John 4:7-8", "Romans 12:9-10"][..]),
    ])
});

/// Related references for `parsed`; an empty list when none are known
pub fn cross_references(parsed: &ParsedReference) -> Vec<String> {
    CROSS_REFERENCES.get(parsed.table_key().as_str())
        .map(|refs| refs.iter().map(|r| r.to_string()).collect())
        .unwrap_or_default()
}
