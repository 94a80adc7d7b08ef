//! Reading semicolon-delimited statement exports.

use anyhow::{Context, Result};
use csv::StringRecord;
use std::path::Path;
use tracing::debug;

/// Read every row of a `;`-delimited CSV file. No header handling is done here.
pub fn read_statement(path: impl AsRef<Path>) -> Result<Vec<StringRecord>> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("input file could not be opened: {}", path.display()))?;

    let rows = rdr
        .records()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("csv file could not be read: {}", path.display()))?;

    debug!(rows = rows.len(), path = %path.display(), "read statement");
    Ok(rows)
}
