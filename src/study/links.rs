/*!
 * Outbound links to third-party study sites.
 *
 * Each site has its own URL convention: a query-encoded reference, book
 * code and chapter/verse path segments, or a slugged book name.
 */

use serde::{Deserialize, Serialize};
use url::Url;

use crate::reference::ParsedReference;

/// A named external study resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl ExternalLink {
    fn new(name: &str, url: impl Into<String>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.into(),
            description: description.to_string(),
        }
    }
}

/// Links for `parsed`, in a fixed order
pub fn external_links(parsed: &ParsedReference) -> Vec<ExternalLink> {
    let underscored = slug(&parsed.display_name, '_');
    let dashed = slug(&parsed.display_name, '-');

    vec![
        ExternalLink::new(
            "Bible Gateway",
            bible_gateway_url(parsed),
            "Compare this passage across dozens of translations",
        ),
        ExternalLink::new(
            "Blue Letter Bible",
            format!(
                "https://www.blueletterbible.org/kjv/{}/{}/{}/",
                parsed.provider_code.to_lowercase(),
                parsed.chapter,
                parsed.verse_start
            ),
            "Original-language lexicon and interlinear tools",
        ),
        ExternalLink::new(
            "Bible Hub",
            format!("https://biblehub.com/commentaries/{}/{}-{}.htm", underscored, parsed.chapter, parsed.verse_start),
            "Classic commentaries on this verse side by side",
        ),
        ExternalLink::new(
            "Enduring Word",
            format!("https://enduringword.com/bible-commentary/{}-{}/", dashed, parsed.chapter),
            "Chapter-by-chapter commentary by David Guzik",
        ),
    ]
}

fn bible_gateway_url(parsed: &ParsedReference) -> String {
    let reference = parsed.to_string();
    Url::parse_with_params("https://www.biblegateway.com/passage/", &[("search", reference.as_str())])
        .map(String::from)
        .unwrap_or_else(|_| format!("https://www.biblegateway.com/passage/?search={}", reference))
}

/// Lowercase the book name and replace spaces with `separator`
fn slug(name: &str, separator: char) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}
