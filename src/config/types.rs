use serde::Deserialize;
use std::time::Duration;

/// Suffixes never followed by the crawl filter unless overridden
pub const DEFAULT_SKIP_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".png", ".gif"];

/// Main configuration structure for Site-Harvester
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub identity: IdentityConfig,
    pub proxy: ProxyConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause after every processed URL (seconds)
    #[serde(rename = "delay-secs")]
    pub delay_secs: f64,

    /// Ceiling on the number of URLs claimed for fetching
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Path suffixes that are never enqueued
    #[serde(rename = "skip-extensions")]
    pub skip_extensions: Vec<String>,

    /// Match `skip-extensions` ignoring ASCII case
    #[serde(rename = "case-insensitive-extensions")]
    pub case_insensitive_extensions: bool,
}

impl CrawlerConfig {
    /// The politeness delay as a `Duration`; zero if the value is unusable
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_secs).unwrap_or(Duration::ZERO)
    }

    /// The request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            delay_secs: 1.0,
            max_pages: None,
            timeout_secs: 30,
            skip_extensions: DEFAULT_SKIP_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            case_insensitive_extensions: false,
        }
    }
}

/// User agent source configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Inline user agent strings; empty means the built-in list
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,

    /// Newline-delimited file of user agent strings, takes precedence
    #[serde(rename = "user-agents-file")]
    pub user_agents_file: Option<String>,
}

/// When the proxy cursor advances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProxyRotation {
    /// Once, when the session opens
    #[default]
    PerSession,

    /// Before every fetch
    PerRequest,
}

/// Proxy configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Newline-delimited list of proxy endpoints
    pub file: String,

    /// Rotation cadence
    pub rotation: ProxyRotation,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            file: "proxies.txt".to_string(),
            rotation: ProxyRotation::PerSession,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the result, table and summary artifacts
    pub directory: String,

    /// Directory receiving the per-run log file
    #[serde(rename = "log-directory")]
    pub log_directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            log_directory: ".".to_string(),
        }
    }
}
