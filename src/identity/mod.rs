//! Identity module: rotating browser User-Agent strings
//!
//! The pool is built once per run from the configuration and owns its own
//! random generator, so nothing here is global.

use crate::config::IdentityConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::Path;

/// Used when a configured user agent source is unusable
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Built-in desktop browser strings used when nothing is configured
const BUILTIN_USER_AGENTS: &[&str] = &[
    DEFAULT_USER_AGENT,
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
];

/// Supplies a User-Agent string per request
#[derive(Debug)]
pub struct UserAgentPool {
    agents: Vec<String>,
    rng: StdRng,
}

impl UserAgentPool {
    /// Creates a pool over the given strings
    ///
    /// An empty list yields a pool that always returns [`DEFAULT_USER_AGENT`].
    pub fn new(agents: Vec<String>) -> Self {
        Self::with_rng(agents, StdRng::from_entropy())
    }

    /// Creates a pool with a deterministic generator
    pub fn with_seed(agents: Vec<String>, seed: u64) -> Self {
        Self::with_rng(agents, StdRng::seed_from_u64(seed))
    }

    fn with_rng(agents: Vec<String>, rng: StdRng) -> Self {
        let agents = if agents.is_empty() {
            vec![DEFAULT_USER_AGENT.to_string()]
        } else {
            agents
        };
        Self { agents, rng }
    }

    /// The built-in browser list
    pub fn builtin() -> Self {
        Self::new(BUILTIN_USER_AGENTS.iter().map(|s| s.to_string()).collect())
    }

    /// Builds the pool from configuration
    ///
    /// Source priority: `user-agents-file`, then inline `user-agents`, then
    /// the built-in list. A configured file that cannot be read or is empty
    /// degrades to the single default string.
    pub fn from_config(config: &IdentityConfig) -> Self {
        if let Some(path) = &config.user_agents_file {
            return match load_user_agents(Path::new(path)) {
                Ok(agents) if !agents.is_empty() => {
                    tracing::info!("Loaded {} user agents from {}", agents.len(), path);
                    Self::new(agents)
                }
                Ok(_) => {
                    tracing::warn!("User agent file {} is empty, using default", path);
                    Self::new(Vec::new())
                }
                Err(e) => {
                    tracing::warn!("Cannot read user agent file {}: {}, using default", path, e);
                    Self::new(Vec::new())
                }
            };
        }

        if !config.user_agents.is_empty() {
            return Self::new(config.user_agents.clone());
        }

        Self::builtin()
    }

    /// Returns a user agent for the next request; values may repeat
    pub fn next(&mut self) -> &str {
        self.agents
            .choose(&mut self.rng)
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Number of distinct strings available
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Always false; an empty source falls back to the default string
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Reads a newline-delimited list, skipping blank lines
fn load_user_agents(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
