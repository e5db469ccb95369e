//! Full JSON dump of the harvested records

use crate::crawler::PageRecord;
use crate::HarvestError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes `value` as JSON indented with four spaces
pub(crate) fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), HarvestError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

/// Writes every record as one pretty-printed JSON array
pub fn write_results_json(path: &Path, records: &[PageRecord]) -> Result<(), HarvestError> {
    write_pretty(path, records)?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Reads back a dump written by [`write_results_json`]
pub fn read_results_json(path: &Path) -> Result<Vec<PageRecord>, HarvestError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
