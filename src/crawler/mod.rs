//! Crawler module for collecting page text from a single site
//!
//! This module contains the crawl logic, including:
//! - HTTP fetching with a bounded timeout
//! - HTML parsing, visible text and link extraction
//! - The breadth-first frontier with its visited set
//! - Overall crawl coordination and pacing

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::Frontier;
pub use parser::{extract_visible_text, parse_html, ParsedPage};

use crate::config::Config;
use crate::AgentError;

/// One crawled document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL the page was requested from
    pub url: String,
    /// Whitespace-normalized visible text
    pub content: String,
}

/// Crawled pages in the order they were successfully fetched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pages: Vec<Page>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    /// URLs of the pages, in corpus order
    pub fn urls(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.url.as_str()).collect()
    }
}

impl From<Vec<Page>> for Corpus {
    fn from(pages: Vec<Page>) -> Self {
        Self { pages }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Crawls the configured site
///
/// This is the main entry point for a crawl. It builds a [`Crawler`] from the
/// configuration and walks the site breadth-first from `crawler.start-url`,
/// visiting at most `crawler.max-pages` URLs.
///
/// # Returns
///
/// * `Ok(Corpus)` - The pages fetched, possibly empty
/// * `Err(AgentError)` - The start URL is invalid or the HTTP client could not be built
pub async fn crawl(config: &Config) -> Result<Corpus, AgentError> {
    let crawler = Crawler::new(config)?;
    crawler
        .crawl(&config.crawler.start_url, config.crawler.max_pages)
        .await
}
