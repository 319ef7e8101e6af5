//! Breadth-first crawl frontier
//!
//! The frontier keeps a FIFO queue of URLs still to visit and the set of
//! URLs already visited, keyed by their exact string form.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO queue plus visited set
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be visited, oldest first
    queue: VecDeque<Url>,

    /// Exact URL strings already taken off the queue and visited
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier seeded with a single URL
    pub fn new(seed: Url) -> Self {
        let mut frontier = Self::default();
        frontier.queue.push_back(seed);
        frontier
    }

    /// Takes the next URL that has not been visited yet
    ///
    /// URLs that were queued more than once are dropped here without counting
    /// as a visit. The returned URL is marked visited immediately, so it is
    /// never handed out again even if fetching it fails.
    pub fn next_unvisited(&mut self) -> Option<Url> {
        while let Some(url) = self.queue.pop_front() {
            if self.visited.insert(url.as_str().to_string()) {
                return Some(url);
            }
            tracing::trace!("Skipping already visited URL: {}", url);
        }
        None
    }

    /// Queues a URL unless it was already visited
    ///
    /// Returns true if the URL was added to the queue.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.is_visited(&url) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Number of URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of queued entries, duplicates included
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
