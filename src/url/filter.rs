use crate::config::CrawlerConfig;
use url::Url;

/// Network location (host + explicit port) used for the same-origin check
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetLoc {
    pub host: String,
    pub port: Option<u16>,
}

impl NetLoc {
    /// Extracts the network location of a URL, if it has a host
    pub fn of(url: &Url) -> Option<Self> {
        url.host_str().map(|host| Self {
            host: host.to_lowercase(),
            port: url.port(),
        })
    }
}

/// Decides whether a discovered URL belongs to the crawl
///
/// Only the origin and extension rules live here; the visited-set check is
/// done by the frontier, which owns that set.
#[derive(Debug, Clone)]
pub struct CrawlFilter {
    origin: NetLoc,
    skip_extensions: Vec<String>,
    case_insensitive: bool,
}

impl CrawlFilter {
    /// Creates a filter bound to the seed's network location
    ///
    /// Returns `None` if the seed has no host.
    pub fn new(seed: &Url, config: &CrawlerConfig) -> Option<Self> {
        let case_insensitive = config.case_insensitive_extensions;
        let skip_extensions = config
            .skip_extensions
            .iter()
            .map(|ext| {
                if case_insensitive {
                    ext.to_ascii_lowercase()
                } else {
                    ext.clone()
                }
            })
            .collect();

        Some(Self {
            origin: NetLoc::of(seed)?,
            skip_extensions,
            case_insensitive,
        })
    }

    /// Returns true if `url` shares the seed's host and port
    pub fn is_same_origin(&self, url: &Url) -> bool {
        NetLoc::of(url).as_ref() == Some(&self.origin)
    }

    /// Returns true if the path ends in one of the skipped suffixes
    pub fn has_skipped_extension(&self, url: &Url) -> bool {
        let path = url.path();
        if self.case_insensitive {
            let lowered = path.to_ascii_lowercase();
            self.skip_extensions.iter().any(|ext| lowered.ends_with(ext))
        } else {
            self.skip_extensions.iter().any(|ext| path.ends_with(ext))
        }
    }

    /// Origin and extension rules combined
    pub fn allows(&self, url: &Url) -> bool {
        self.is_same_origin(url) && !self.has_skipped_extension(url)
    }
}
