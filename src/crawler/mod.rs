//! Crawler module for page fetching and harvesting
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with rotating identities and proxies
//! - HTML extraction into page records
//! - The breadth-first frontier
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod record;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use extractor::{extract, extract_emails, extract_phones, extract_with_timestamp};
pub use fetcher::{build_http_client, request_headers, Fetcher};
pub use frontier::Frontier;
pub use record::{FormRecord, InputRecord, LinkRecord, PageRecord};
