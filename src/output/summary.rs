//! Aggregate statistics for a finished crawl
//!
//! This module computes the run summary from the harvested records,
//! writes it as JSON and prints it for the operator.

use crate::crawler::PageRecord;
use crate::output::json::write_pretty;
use crate::HarvestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Crawl summary written next to the results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    /// Number of URLs claimed for fetching, failures included
    pub pages_scraped: usize,

    /// Links across all records
    pub total_links: usize,

    /// Emails across all records (distinct per page, not across pages)
    pub total_emails: usize,

    /// Phone numbers across all records
    pub total_phones: usize,

    /// Forms across all records
    pub total_forms: usize,

    /// Earliest record timestamp
    pub start_time: DateTime<Utc>,

    /// Latest record timestamp
    pub end_time: DateTime<Utc>,
}

/// Summarizes the records of a run
///
/// # Arguments
///
/// * `records` - Every record in the result store
/// * `pages_scraped` - Size of the visited set
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - The aggregate counts and time span
/// * `Err(HarvestError::EmptyResultSet)` - There is no record to take a time span from
pub fn summarize(records: &[PageRecord], pages_scraped: usize) -> Result<CrawlSummary, HarvestError> {
    let start_time = records
        .iter()
        .map(|r| r.timestamp)
        .min()
        .ok_or(HarvestError::EmptyResultSet)?;
    let end_time = records
        .iter()
        .map(|r| r.timestamp)
        .max()
        .ok_or(HarvestError::EmptyResultSet)?;

    Ok(CrawlSummary {
        pages_scraped,
        total_links: records.iter().map(|r| r.links.len()).sum(),
        total_emails: records.iter().map(|r| r.emails.len()).sum(),
        total_phones: records.iter().map(|r| r.phones.len()).sum(),
        total_forms: records.iter().map(|r| r.forms.len()).sum(),
        start_time,
        end_time,
    })
}

/// Writes the summary as pretty-printed JSON
pub fn write_summary(path: &Path, summary: &CrawlSummary) -> Result<(), HarvestError> {
    write_pretty(path, summary)?;
    tracing::info!("Wrote summary to {}", path.display());
    Ok(())
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Scraping Summary ===\n");

    println!("Overview:");
    println!("  Pages scraped: {}", summary.pages_scraped);
    println!(
        "  Started: {}",
        summary.start_time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Finished: {}",
        summary.end_time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Duration: {}s",
        (summary.end_time - summary.start_time).num_seconds()
    );
    println!();

    println!("Harvested:");
    println!("  Links: {}", summary.total_links);
    println!("  Emails: {}", summary.total_emails);
    println!("  Phone numbers: {}", summary.total_phones);
    println!("  Forms: {}", summary.total_forms);
    println!();
}
