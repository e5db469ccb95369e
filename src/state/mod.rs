//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: lifecycle of a run (idle, running, draining, done)

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
