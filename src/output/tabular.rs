//! Tabular (CSV) projection of the harvested records
//!
//! Each record becomes one row. Nested objects are flattened into dotted
//! column names (`metadata.description`), arrays are written as compact JSON
//! text and nulls as empty cells. The header is the union of all keys in
//! first-seen order.

use crate::crawler::PageRecord;
use crate::HarvestError;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// One flattened record: column name to cell text
type FlatRow = HashMap<String, String>;

/// Flattens a record into dotted columns, preserving key order
fn flatten_record(record: &PageRecord) -> Result<Vec<(String, String)>, HarvestError> {
    let mut cells = Vec::new();
    if let Value::Object(map) = serde_json::to_value(record)? {
        flatten_object(&map, "", &mut cells)?;
    }
    Ok(cells)
}

fn flatten_object(
    map: &Map<String, Value>,
    prefix: &str,
    cells: &mut Vec<(String, String)>,
) -> Result<(), HarvestError> {
    for (key, value) in map {
        let column = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(nested) => flatten_object(nested, &column, cells)?,
            Value::Array(_) => cells.push((column, serde_json::to_string(value)?)),
            Value::Null => cells.push((column, String::new())),
            Value::String(s) => cells.push((column, s.clone())),
            Value::Bool(b) => cells.push((column, b.to_string())),
            Value::Number(n) => cells.push((column, n.to_string())),
        }
    }
    Ok(())
}

/// Flattens every record and computes the column union
fn build_table(records: &[PageRecord]) -> Result<(Vec<String>, Vec<FlatRow>), HarvestError> {
    let mut columns = Vec::new();
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        let cells = flatten_record(record)?;
        for (column, _) in &cells {
            if seen.insert(column.clone()) {
                columns.push(column.clone());
            }
        }
        rows.push(cells.into_iter().collect());
    }

    Ok((columns, rows))
}

/// Writes the CSV projection of `records` to `path`
///
/// An empty record list produces an empty file.
pub fn write_results_csv(path: &Path, records: &[PageRecord]) -> Result<(), HarvestError> {
    let (columns, rows) = build_table(records)?;
    let mut writer = csv::Writer::from_path(path)?;

    if !columns.is_empty() {
        writer.write_record(&columns)?;
        for row in &rows {
            writer.write_record(
                columns
                    .iter()
                    .map(|column| row.get(column).map(String::as_str).unwrap_or("")),
            )?;
        }
    }

    writer.flush()?;
    tracing::info!(
        "Wrote {} rows x {} columns to {}",
        rows.len(),
        columns.len(),
        path.display()
    );
    Ok(())
}
