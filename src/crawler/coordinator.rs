//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that drives one run:
//! - Dequeuing URLs from the frontier in breadth-first order
//! - Shaping each request with a user agent and proxy
//! - Fetching, extracting and recording pages
//! - Enqueuing same-origin links
//! - Applying the politeness delay and honoring cancellation

use crate::config::{Config, ProxyRotation};
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::Frontier;
use crate::identity::UserAgentPool;
use crate::output::ResultStore;
use crate::proxy::{load_proxies, ProxyEndpoint, ProxyRotator};
use crate::state::CrawlPhase;
use crate::url::{normalize_parsed, CrawlFilter};
use crate::{HarvestError, UrlError};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Everything a finished crawl hands to the exporter
#[derive(Debug)]
pub struct CrawlReport {
    /// The seed the run started from
    pub seed: Url,

    /// One record per successfully fetched page
    pub store: ResultStore,

    /// URLs claimed for fetching, in claim order
    pub visited: Vec<Url>,

    /// Number of fetches that failed
    pub failures: usize,

    /// True if the run stopped because cancellation was requested
    pub cancelled: bool,

    /// Final lifecycle phase, `Done` for a completed drain
    pub phase: CrawlPhase,
}

impl CrawlReport {
    /// Size of the visited set
    pub fn pages_scraped(&self) -> usize {
        self.visited.len()
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    seed: Url,
    frontier: Frontier,
    fetcher: Fetcher,
    identity: UserAgentPool,
    proxies: ProxyRotator,
    session_proxy: Option<ProxyEndpoint>,
    store: ResultStore,
    phase: CrawlPhase,
    cancel: CancellationToken,
    failures: usize,
}

impl Coordinator {
    /// Creates a coordinator with explicit identity and proxy sources
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run, in the `Idle` phase
    /// * `Err(HarvestError)` - Seed unusable or HTTP client construction failed
    pub fn new(
        config: Config,
        seed: Url,
        identity: UserAgentPool,
        proxies: ProxyRotator,
    ) -> Result<Self, HarvestError> {
        let seed = normalize_parsed(seed)?;
        let filter = CrawlFilter::new(&seed, &config.crawler).ok_or(UrlError::MissingHost)?;
        let frontier = Frontier::new(seed.clone(), filter, config.crawler.max_pages);
        let fetcher = Fetcher::new(&config.crawler, proxies.endpoints())?;

        Ok(Self {
            config: Arc::new(config),
            seed,
            frontier,
            fetcher,
            identity,
            proxies,
            session_proxy: None,
            store: ResultStore::new(),
            phase: CrawlPhase::Idle,
            cancel: CancellationToken::new(),
            failures: 0,
        })
    }

    /// Creates a coordinator whose user agents and proxies come from `config`
    pub fn from_config(config: Config, seed: Url) -> Result<Self, HarvestError> {
        let identity = UserAgentPool::from_config(&config.identity);
        let proxies = ProxyRotator::new(load_proxies(Path::new(&config.proxy.file)));
        Self::new(config, seed, identity, proxies)
    }

    /// A handle that stops the crawl when cancelled
    ///
    /// Cancellation stops dequeuing and interrupts the politeness delay; the
    /// pages collected so far are still returned.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The current lifecycle phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// The normalized seed URL
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), HarvestError> {
        if !self.phase.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!("Crawl phase: {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Runs the crawl loop to completion
    ///
    /// The loop stops when the frontier is empty, the page ceiling is
    /// reached, or cancellation is requested. Fetch failures never stop it.
    pub async fn run(mut self) -> Result<CrawlReport, HarvestError> {
        self.transition(CrawlPhase::Running)?;
        self.open_session();

        tracing::info!("Starting crawl of {}", self.seed);

        let mut pages_processed: usize = 0;
        let mut cancelled = false;
        let start_time = Instant::now();

        loop {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let url = match self.frontier.next_url() {
                Some(url) => url,
                None => {
                    if self.frontier.ceiling_reached() {
                        tracing::info!(
                            "Page limit of {} reached",
                            self.frontier.visited_count()
                        );
                    } else {
                        tracing::info!("Frontier is empty, crawl complete");
                    }
                    break;
                }
            };

            self.process_url(&url).await;
            pages_processed += 1;

            if pages_processed % 10 == 0 {
                let elapsed = start_time.elapsed();
                let rate = pages_processed as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {} pages processed, {} in frontier, {:.2} pages/sec",
                    pages_processed,
                    self.frontier.pending(),
                    rate
                );
            }

            if !self.politeness_delay().await {
                cancelled = true;
                break;
            }
        }

        if cancelled {
            tracing::warn!(
                "Crawl cancelled after {} pages, exporting partial results",
                pages_processed
            );
        }

        tracing::info!(
            "Crawl finished: {} pages processed ({} recorded, {} failed) in {:?}",
            pages_processed,
            self.store.len(),
            self.failures,
            start_time.elapsed()
        );

        self.transition(CrawlPhase::Draining)?;
        self.drain(cancelled)
    }

    /// Picks the session proxy, once per run
    fn open_session(&mut self) {
        if self.config.proxy.rotation == ProxyRotation::PerSession {
            self.session_proxy = self.proxies.advance().cloned();
        }

        match (&self.session_proxy, self.config.proxy.rotation) {
            (Some(proxy), _) => tracing::info!("Using proxy {} for this session", proxy),
            (None, ProxyRotation::PerRequest) if !self.proxies.is_empty() => tracing::info!(
                "Rotating through {} proxies per request",
                self.proxies.endpoints().len()
            ),
            _ => tracing::info!("No proxies configured, connecting directly"),
        }
    }

    fn proxy_for_request(&mut self) -> Option<ProxyEndpoint> {
        match self.config.proxy.rotation {
            ProxyRotation::PerSession => self.session_proxy.clone(),
            ProxyRotation::PerRequest => self.proxies.advance().cloned(),
        }
    }

    /// Processes a single claimed URL
    ///
    /// On success the page is extracted, recorded and its crawlable links
    /// enqueued. On failure, or when the body is empty, nothing is recorded;
    /// the URL stays visited.
    async fn process_url(&mut self, url: &Url) {
        tracing::info!("Crawling: {}", url);

        let user_agent = self.identity.next().to_string();
        let proxy = self.proxy_for_request();

        match self.fetcher.fetch(url, &user_agent, proxy.as_ref()).await {
            Ok(body) if body.is_empty() => {
                tracing::warn!("Empty response body from {}, nothing recorded", url);
            }
            Ok(body) => {
                let record = extract(&body, url);
                let queued = self.frontier.enqueue_links(&record.links);
                tracing::debug!(
                    "{}: {} links ({} queued), {} emails, {} phones, {} forms",
                    url,
                    record.links.len(),
                    queued,
                    record.emails.len(),
                    record.phones.len(),
                    record.forms.len()
                );
                self.store.append(record);
            }
            Err(_) => {
                // Already logged by the fetcher
                self.failures += 1;
            }
        }
    }

    /// Sleeps for the politeness delay; returns false if cancelled meanwhile
    async fn politeness_delay(&self) -> bool {
        let delay = self.config.crawler.delay();
        if delay.is_zero() {
            return !self.cancel.is_cancelled();
        }

        tokio::select! {
            _ = tokio::time::sleep(delay) => true,
            _ = self.cancel.cancelled() => false,
        }
    }

    /// Closes the network session and hands the results over
    fn drain(mut self, cancelled: bool) -> Result<CrawlReport, HarvestError> {
        self.transition(CrawlPhase::Done)?;

        let Self {
            seed,
            frontier,
            fetcher,
            store,
            phase,
            failures,
            ..
        } = self;

        fetcher.close();

        Ok(CrawlReport {
            seed,
            store,
            visited: frontier.into_visited(),
            failures,
            cancelled,
            phase,
        })
    }
}

/// Runs a complete crawl from a seed using the configured sources
///
/// # Example
///
/// ```no_run
/// use site_harvester::config::Config;
/// use site_harvester::crawler::run_crawl;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seed = Url::parse("https://example.com/")?;
/// let report = run_crawl(Config::default(), seed).await?;
/// println!("Visited {} pages", report.pages_scraped());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, seed: Url) -> Result<CrawlReport, HarvestError> {
    Coordinator::from_config(config, seed)?.run().await
}
