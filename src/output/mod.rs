//! Output module for exporting crawl results
//!
//! This module handles:
//! - Accumulating page records during the crawl
//! - Writing the full JSON dump and the CSV projection
//! - Computing, writing and printing the run summary

mod json;
mod store;
mod summary;
mod tabular;

pub use json::{read_results_json, write_results_json};
pub use store::ResultStore;
pub use summary::{print_summary, summarize, write_summary, CrawlSummary};
pub use tabular::write_results_csv;

use crate::crawler::CrawlReport;
use crate::HarvestError;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Formats a run start time for artifact names
pub fn run_timestamp(started: &DateTime<Local>) -> String {
    started.format("%Y%m%d_%H%M%S").to_string()
}

/// Locations of the three artifacts of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub results_json: PathBuf,
    pub results_csv: PathBuf,
    pub summary_json: PathBuf,
}

impl ExportPaths {
    /// Artifact paths under `directory`, stamped with the run start time
    pub fn for_run(directory: &Path, started: &DateTime<Local>) -> Self {
        let ts = run_timestamp(started);
        Self {
            results_json: directory.join(format!("scraping_results_{}.json", ts)),
            results_csv: directory.join(format!("scraping_results_{}.csv", ts)),
            summary_json: directory.join(format!("scraping_summary_{}.json", ts)),
        }
    }
}

/// Exports a finished crawl
///
/// Writes the JSON dump, then the CSV projection, then the summary. With no
/// records the first two are still written and the call fails with
/// [`HarvestError::EmptyResultSet`].
///
/// # Arguments
///
/// * `report` - The crawl loop's output
/// * `directory` - Destination directory, created if missing
/// * `started` - Run start time used to name the artifacts
pub fn export(
    report: &CrawlReport,
    directory: &Path,
    started: &DateTime<Local>,
) -> Result<(ExportPaths, CrawlSummary), HarvestError> {
    std::fs::create_dir_all(directory)?;
    let paths = ExportPaths::for_run(directory, started);
    let records = report.store.records();

    write_results_json(&paths.results_json, records)?;
    write_results_csv(&paths.results_csv, records)?;

    let summary = summarize(records, report.pages_scraped())?;
    write_summary(&paths.summary_json, &summary)?;

    Ok((paths, summary))
}
