//! Identifier input
//!
//! Reads the list of API numbers to scrape from a CSV file with an
//! `api` column. Rows with a blank value are counted as skipped and
//! never reach the pipeline.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::warn;

/// Identifiers read from a CSV, plus the count of rows skipped for a
/// missing value.
#[derive(Debug, Clone, Default)]
pub struct IdentifierList {
    pub identifiers: Vec<String>,
    pub skipped: u64,
}

/// Read API numbers from the `api` column (case-insensitive) of a CSV
/// file.
pub fn read_identifiers(path: impl AsRef<Path>) -> Result<IdentifierList> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open identifier CSV '{}'", path.display()))?;

    let headers = reader
        .headers()
        .context("failed to read CSV header row")?
        .clone();

    // A leading BOM ends up glued to the first header name.
    let api_column = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case("api"));
    let Some(api_column) = api_column else {
        bail!(
            "identifier CSV '{}' has no 'api' column (headers: {:?})",
            path.display(),
            headers.iter().collect::<Vec<_>>()
        );
    };

    let mut list = IdentifierList::default();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read CSV row {}", row + 2))?;
        match record.get(api_column).map(str::trim) {
            Some(api) if !api.is_empty() => list.identifiers.push(api.to_string()),
            _ => {
                warn!(row = row + 2, "skipping row: missing API number");
                list.skipped += 1;
            }
        }
    }

    Ok(list)
}
