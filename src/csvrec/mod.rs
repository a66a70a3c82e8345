use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::warn;

use crate::merge::ExternalRecord;

/// Loads the authoritative product record from a CSV file: header row plus
/// one data row. Extra rows are tolerated with a warning; only the first is
/// used. Empty cells are dropped, keys and values trimmed.
pub fn load_record(path: &Path) -> Result<ExternalRecord> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open CSV {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let mut rows = reader.records();
    let first = match rows.next() {
        Some(row) => row.with_context(|| format!("failed to read CSV row in {}", path.display()))?,
        None => anyhow::bail!("no data rows in {}", path.display()),
    };
    let extra = rows.count();
    if extra > 0 {
        warn!(extra, path = %path.display(), "more than one data row in CSV, only the first is used");
    }

    let record = headers
        .iter()
        .zip(first.iter())
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Ok(record)
}
