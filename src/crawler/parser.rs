//! HTML parser for extracting page text and links
//!
//! This module handles parsing HTML content to extract:
//! - Visible text, whitespace-normalized
//! - Links to follow (from `<a href>` tags)

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Elements whose text content is never shown to a reader
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Visible text joined by single spaces
    pub text: String,

    /// All followable links found on the page (absolute, fragment removed)
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts visible text and links
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` and data URIs
/// - same-page `#fragment` links
///
/// Relative links are resolved against `base_url`.
///
/// # Example
///
/// ```
/// use content_agent::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><p>Hello   world</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.text, "Test Hello world Link");
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        text: visible_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the visible text of an HTML document
///
/// Tags are stripped and every run of whitespace collapses to a single space.
pub fn extract_visible_text(html: &str) -> String {
    visible_text(&Html::parse_document(html))
}

fn visible_text(document: &Html) -> String {
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| INVISIBLE_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}
