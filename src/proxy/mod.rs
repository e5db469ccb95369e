//! Proxy module: endpoint loading and rotation
//!
//! Proxies come from a newline-delimited file read once at startup. A missing
//! file is not an error; the crawl simply connects directly.

mod rotator;

pub use rotator::ProxyRotator;

use std::fmt;
use std::path::Path;

/// One proxy endpoint, e.g. `http://10.0.0.1:3128` or `socks5://host:1080`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyEndpoint(String);

impl ProxyEndpoint {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(endpoint.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the reqwest proxy routing all schemes through this endpoint
    pub fn to_reqwest(&self) -> Result<reqwest::Proxy, reqwest::Error> {
        reqwest::Proxy::all(self.0.as_str())
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a newline-delimited proxy list
///
/// Lines are trimmed and blank lines ignored. Lines reqwest cannot turn into a
/// proxy are dropped with a warning.
pub fn parse_proxy_list(content: &str) -> Vec<ProxyEndpoint> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let endpoint = ProxyEndpoint::new(line);
            match endpoint.to_reqwest() {
                Ok(_) => Some(endpoint),
                Err(e) => {
                    tracing::warn!("Ignoring invalid proxy '{}': {}", line, e);
                    None
                }
            }
        })
        .collect()
}

/// Loads proxy endpoints from `path`
///
/// A missing or unreadable file yields an empty list (direct connections).
pub fn load_proxies(path: &Path) -> Vec<ProxyEndpoint> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let proxies = parse_proxy_list(&content);
            tracing::info!("Loaded {} proxies from {}", proxies.len(), path.display());
            proxies
        }
        Err(e) => {
            tracing::debug!(
                "No proxy list at {} ({}), using direct connections",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_trims_and_skips_blank_lines() {
        let content = "  http://a.test:8080  \n\n\nhttp://b.test:3128\n   \n";
        let proxies = parse_proxy_list(content);
        assert_eq!(
            proxies,
            vec![
                ProxyEndpoint::new("http://a.test:8080"),
                ProxyEndpoint::new("http://b.test:3128"),
            ]
        );
    }

    #[test]
    fn test_parse_accepts_socks() {
        let proxies = parse_proxy_list("socks5://127.0.0.1:1080\n");
        assert_eq!(proxies.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let proxies = load_proxies(Path::new("/nonexistent/proxies.txt"));
        assert!(proxies.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http://p1.test:8080").unwrap();
        writeln!(file, "http://p2.test:8080").unwrap();
        file.flush().unwrap();

        let proxies = load_proxies(file.path());
        assert_eq!(proxies.len(), 2);
        assert_eq!(proxies[1].as_str(), "http://p2.test:8080");
    }

    #[test]
    fn test_empty_file_means_direct() {
        let file = NamedTempFile::new().unwrap();
        let rotator = ProxyRotator::new(load_proxies(file.path()));
        assert!(rotator.current().is_none());
    }
}
