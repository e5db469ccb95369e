//! Frontier for breadth-first crawling
//!
//! This module handles:
//! - The FIFO queue of URLs waiting to be fetched
//! - The visited set, claimed at dequeue time
//! - The page ceiling
//! - The crawl filter applied to discovered links

use crate::crawler::record::LinkRecord;
use crate::url::{normalize_url, CrawlFilter};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Pending queue plus visited set for one crawl run
///
/// A URL can sit in the queue more than once if it was discovered again
/// before its first copy was dequeued. Duplicates are discarded when popped,
/// so each URL is claimed, and fetched, at most once.
#[derive(Debug)]
pub struct Frontier {
    /// URLs awaiting fetch, in discovery order
    queue: VecDeque<Url>,

    /// URLs already claimed for fetching
    visited: HashSet<Url>,

    /// Claim order of `visited`
    visit_order: Vec<Url>,

    /// Origin and extension rules
    filter: CrawlFilter,

    /// Ceiling on `visited.len()`
    max_pages: Option<usize>,
}

impl Frontier {
    /// Creates a frontier holding only the seed
    pub fn new(seed: Url, filter: CrawlFilter, max_pages: Option<usize>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(seed);

        Self {
            queue,
            visited: HashSet::new(),
            visit_order: Vec::new(),
            filter,
            max_pages,
        }
    }

    /// Claims and returns the next URL to fetch
    ///
    /// Already-visited entries are dropped silently. Returns `None` when the
    /// queue is empty or the page ceiling has been reached.
    pub fn next_url(&mut self) -> Option<Url> {
        loop {
            if self.ceiling_reached() {
                return None;
            }

            let url = self.queue.pop_front()?;
            if self.claim(&url) {
                return Some(url);
            }

            tracing::trace!("Skipping already visited URL: {}", url);
        }
    }

    /// Marks a URL as visited; returns false if it already was
    ///
    /// This is the only way into the visited set, so test and insert happen
    /// as one step.
    pub fn claim(&mut self, url: &Url) -> bool {
        if self.visited.insert(url.clone()) {
            self.visit_order.push(url.clone());
            true
        } else {
            false
        }
    }

    /// Returns true if `url` passes the crawl filter and has not been visited
    pub fn should_crawl(&self, url: &Url) -> bool {
        self.filter.allows(url) && !self.visited.contains(url)
    }

    /// Normalizes and enqueues a discovered URL if it should be crawled
    ///
    /// Returns true if the URL was pushed.
    pub fn enqueue(&mut self, candidate: &str) -> bool {
        let url = match normalize_url(candidate) {
            Ok(url) => url,
            Err(e) => {
                tracing::trace!("Not enqueuing {}: {}", candidate, e);
                return false;
            }
        };

        if !self.should_crawl(&url) {
            return false;
        }

        self.queue.push_back(url);
        true
    }

    /// Enqueues every crawlable link of a page; returns how many were pushed
    pub fn enqueue_links(&mut self, links: &[LinkRecord]) -> usize {
        links
            .iter()
            .filter(|link| self.enqueue(&link.url))
            .count()
    }

    /// Returns true once `max_pages` URLs have been claimed
    pub fn ceiling_reached(&self) -> bool {
        self.max_pages
            .map(|max| self.visited.len() >= max)
            .unwrap_or(false)
    }

    /// Number of URLs waiting in the queue (duplicates included)
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs claimed so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Visited URLs in the order they were claimed
    pub fn visited_in_order(&self) -> &[Url] {
        &self.visit_order
    }

    /// Consumes the frontier, returning the visited URLs in claim order
    pub fn into_visited(self) -> Vec<Url> {
        self.visit_order
    }
}
