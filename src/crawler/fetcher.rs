//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building one HTTP client per proxy endpoint (plus a direct one)
//! - Shaping each GET with a browser-like header set
//! - Classifying the outcome as body, bad status or network failure
//!
//! Fetches are single-shot. There is no retry at this level or above it.

use crate::config::CrawlerConfig;
use crate::identity::DEFAULT_USER_AGENT;
use crate::proxy::ProxyEndpoint;
use crate::{FetchError, FetchResult};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, DNT,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";
const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate";

/// Builds an HTTP client, optionally routed through a proxy
///
/// The User-Agent is not set here; it changes per request.
///
/// # Example
///
/// ```no_run
/// use site_harvester::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(Duration::from_secs(30), None).unwrap();
/// ```
pub fn build_http_client(
    timeout: Duration,
    proxy: Option<&ProxyEndpoint>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .gzip(true)
        .deflate(true)
        .brotli(true);

    if let Some(endpoint) = proxy {
        builder = builder.proxy(endpoint.to_reqwest()?);
    }

    builder.build()
}

/// Builds the fixed request header set around a user agent
///
/// An agent string that is not a valid header value is replaced by the
/// default one.
pub fn request_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let agent = HeaderValue::from_str(user_agent).unwrap_or_else(|_| {
        tracing::warn!("Invalid user agent {:?}, using default", user_agent);
        HeaderValue::from_static(DEFAULT_USER_AGENT)
    });
    headers.insert(USER_AGENT, agent);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING_VALUE));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Performs page GETs for one crawl session
pub struct Fetcher {
    direct: Client,
    proxied: HashMap<ProxyEndpoint, Client>,
    timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher with a client for direct connections and one per proxy
    pub fn new(config: &CrawlerConfig, proxies: &[ProxyEndpoint]) -> Result<Self, reqwest::Error> {
        let timeout = config.timeout();
        let direct = build_http_client(timeout, None)?;

        let mut proxied = HashMap::with_capacity(proxies.len());
        for endpoint in proxies {
            let client = build_http_client(timeout, Some(endpoint))?;
            proxied.insert(endpoint.clone(), client);
        }

        Ok(Self {
            direct,
            proxied,
            timeout,
        })
    }

    /// Fetches a URL and returns its body
    ///
    /// # Outcomes
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 200 | `Ok(body)` |
    /// | Any other status | `Err(BadStatus(code))` |
    /// | Timeout | `Err(Network(..))` |
    /// | Connect/DNS/TLS failure | `Err(Network(..))` |
    /// | Body read failure | `Err(Network(..))` |
    ///
    /// Every failure is logged with the URL before it is returned.
    pub async fn fetch(
        &self,
        url: &Url,
        user_agent: &str,
        proxy: Option<&ProxyEndpoint>,
    ) -> FetchResult<String> {
        let result = self.fetch_inner(url, user_agent, proxy).await;
        match &result {
            Ok(_) => {}
            Err(FetchError::BadStatus(code)) => {
                tracing::warn!("Failed to fetch {}: Status {}", url, code);
            }
            Err(FetchError::Network(detail)) => {
                tracing::error!("Error fetching {}: {}", url, detail);
            }
        }
        result
    }

    async fn fetch_inner(
        &self,
        url: &Url,
        user_agent: &str,
        proxy: Option<&ProxyEndpoint>,
    ) -> FetchResult<String> {
        let client = match proxy {
            None => &self.direct,
            Some(endpoint) => self.proxied.get(endpoint).ok_or_else(|| {
                FetchError::Network(format!("no client configured for proxy {}", endpoint))
            })?,
        };

        let response = client
            .get(url.clone())
            .headers(request_headers(user_agent))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    /// Maps a transport error to a readable network failure
    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Network(format!(
                "Request timeout after {}s",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            FetchError::Network(format!("Connection failed: {}", error))
        } else {
            FetchError::Network(error.to_string())
        }
    }

    /// Number of proxy clients held
    pub fn proxy_count(&self) -> usize {
        self.proxied.len()
    }

    /// Closes the session, dropping every pooled connection
    pub fn close(self) {
        tracing::debug!(
            "Closing HTTP session ({} proxy clients)",
            self.proxied.len()
        );
    }
}
