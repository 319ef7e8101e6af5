//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop that coordinates:
//! - The frontier queue and visited set
//! - Fetching and parsing each page
//! - Filtering discovered links to the start URL's site
//! - Pacing between successful requests

use crate::config::{Config, CrawlerConfig};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_html;
use crate::crawler::{build_http_client, fetch_url, Corpus, FetchResult, Page};
use crate::url::{is_same_site, parse_http_url};
use crate::AgentError;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Bounded, single-site, breadth-first crawler
pub struct Crawler {
    client: Client,
    config: CrawlerConfig,
}

impl Crawler {
    /// Creates a crawler with its own HTTP client
    pub fn new(config: &Config) -> Result<Self, AgentError> {
        let client = build_http_client(&config.crawler, &config.user_agent)?;
        Ok(Self::with_client(client, config.crawler.clone()))
    }

    /// Creates a crawler around an existing HTTP client
    pub fn with_client(client: Client, config: CrawlerConfig) -> Self {
        Self { client, config }
    }

    /// Crawls from `start_url`, visiting at most `max_pages` URLs
    ///
    /// Pages are fetched one at a time. A page that fails to load is logged
    /// and dropped; it still counts as visited. Only links on the same network
    /// location as `start_url` are followed.
    ///
    /// # Returns
    ///
    /// * `Ok(Corpus)` - Successfully fetched pages in BFS order (empty if the
    ///   start page failed)
    /// * `Err(AgentError)` - `start_url` is not a valid HTTP(S) URL
    pub async fn crawl(&self, start_url: &str, max_pages: usize) -> Result<Corpus, AgentError> {
        let origin = parse_http_url(start_url)?;
        let pacing = Duration::from_millis(self.config.pacing_delay_ms);

        let mut frontier = Frontier::new(origin.clone());
        let mut corpus = Corpus::new();
        let start_time = Instant::now();

        tracing::info!("Starting crawl of {} (max {} pages)", origin, max_pages);

        while !frontier.is_empty() && frontier.visited_count() < max_pages {
            let Some(url) = frontier.next_unvisited() else {
                break;
            };

            tracing::debug!("Processing URL: {}", url);

            if let Some(page) = self.process_url(&url, &origin, &mut frontier).await {
                corpus.push(page);
                tokio::time::sleep(pacing).await;
            }
        }

        tracing::info!(
            "Crawl completed: {} pages collected, {} URLs visited in {:?}",
            corpus.len(),
            frontier.visited_count(),
            start_time.elapsed()
        );

        Ok(corpus)
    }

    /// Fetches and parses a single URL, queueing its same-site links
    ///
    /// Returns the page on success, None if the fetch failed.
    async fn process_url(&self, url: &Url, origin: &Url, frontier: &mut Frontier) -> Option<Page> {
        match fetch_url(&self.client, url.as_str()).await {
            FetchResult::Success {
                final_url,
                status_code,
                content_type,
                body,
            } => {
                tracing::debug!(
                    "Fetched {} ({} {}, final URL {})",
                    url,
                    status_code,
                    content_type,
                    final_url
                );

                let parsed = parse_html(&body, url);
                self.handle_discovered_links(&parsed.links, origin, frontier);

                Some(Page {
                    url: url.to_string(),
                    content: truncate_chars(parsed.text, self.config.max_page_chars),
                })
            }

            FetchResult::HttpError { status_code } => {
                tracing::warn!("Error fetching {}: HTTP {}", url, status_code);
                None
            }

            FetchResult::NetworkError { error } => {
                tracing::warn!("Error fetching {}: {}", url, error);
                None
            }
        }
    }

    /// Queues discovered links that stay on the start URL's site
    fn handle_discovered_links(&self, links: &[Url], origin: &Url, frontier: &mut Frontier) {
        for link in links {
            if !is_same_site(origin, link) {
                tracing::trace!("Discarding cross-site link: {}", link);
                continue;
            }
            frontier.enqueue(link.clone());
        }
    }
}

/// Keeps at most `max_chars` characters of `text`
fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_index, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_index);
    }
    text
}
