//! URL handling module for Site-Harvester
//!
//! This module provides crawl-target normalization and the crawl filter that
//! keeps the harvest on the seed's network location.

mod filter;
mod normalize;

// Re-export main functions
pub use filter::{CrawlFilter, NetLoc};
pub use normalize::{normalize_parsed, normalize_url};
