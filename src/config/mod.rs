//! Configuration module for Site-Harvester
//!
//! Settings come from an optional TOML file; the command line overrides the
//! delay and page ceiling.
//!
//! # Example
//!
//! ```no_run
//! use site_harvester::config::load_optional_config;
//! use std::path::Path;
//!
//! let (config, _hash) = load_optional_config(Path::new("harvest.toml")).unwrap();
//! println!("Timeout: {}s", config.crawler.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, IdentityConfig, OutputConfig, ProxyConfig, ProxyRotation,
    DEFAULT_SKIP_EXTENSIONS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, load_optional_config};
pub use validation::{validate, validate_seed_url};

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_FILE: &str = "harvest.toml";
